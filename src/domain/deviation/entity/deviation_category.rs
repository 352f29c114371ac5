use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deviation_category")]
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
    #[sea_orm(has_many = "super::deviation::Entity")]
    Deviation,
}

impl Related<super::deviation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deviation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
