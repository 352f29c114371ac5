use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub review_id: i64,
    pub version_id: i64,
    pub reviewer_id: i64,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document_version::Entity",
        from = "Column::VersionId",
        to = "super::document_version::Column::VersionId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DocumentVersion,
}

impl Related<super::document_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
