use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 문서 버전 상태
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "DocumentStatus")]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "under_review")]
    UnderReview,
    #[sea_orm(string_value = "under_approval")]
    UnderApproval,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "archived")]
    Archived,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_version")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub version_id: i64,
    pub document_id: i64,
    /// `major.minor` 형식, 첫 버전은 1.0
    pub version_number: String,
    pub status: DocumentStatus,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub change_summary: Option<String>,
    pub created_by: i64,
    pub submitted_at: Option<DateTime>,
    pub approved_by: Option<i64>,
    pub approved_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::document::Entity",
        from = "Column::DocumentId",
        to = "super::document::Column::DocumentId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Document,
    #[sea_orm(has_many = "super::document_review::Entity")]
    DocumentReview,
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Document.def()
    }
}

impl Related<super::document_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentReview.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
