use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "equipment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub equipment_id: i64,
    pub name: String,
    /// 설비 관리 코드 (자산 태그 등)
    pub code: Option<String>,
    pub location_id: Option<i64>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::location::entity::location::Entity",
        from = "Column::LocationId",
        to = "crate::domain::location::entity::location::Column::LocationId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Location,
}

impl Related<crate::domain::location::entity::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
