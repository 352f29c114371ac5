use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::WorkflowKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attachment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub attachment_id: i64,
    pub parent_kind: WorkflowKind,
    pub parent_id: i64,
    /// 업로드 폼의 파일 필드명 (detailedDescriptionAttachments 등)
    pub field_name: String,
    pub file_name: String,
    pub url: String,
    pub uploaded_by: i64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
