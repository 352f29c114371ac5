use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "change_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub category_id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::change_control::Entity")]
    ChangeControl,
}

impl Related<super::change_control::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangeControl.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
