use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 문서 종류
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "DocumentType")]
pub enum DocumentType {
    #[sea_orm(string_value = "Manual")]
    #[serde(rename = "Manual")]
    Manual,
    #[sea_orm(string_value = "Policy")]
    #[serde(rename = "Policy")]
    Policy,
    #[sea_orm(string_value = "Procedure")]
    #[serde(rename = "Procedure")]
    Procedure,
    #[sea_orm(string_value = "Work Instruction")]
    #[serde(rename = "Work Instruction")]
    WorkInstruction,
}

impl DocumentType {
    /// 참조 번호에 쓰이는 엔터티 코드
    pub fn code(&self) -> &'static str {
        match self {
            DocumentType::Manual => "MAN",
            DocumentType::Policy => "POL",
            DocumentType::Procedure => "PRO",
            DocumentType::WorkInstruction => "WIN",
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub document_id: i64,
    pub doc_type: DocumentType,
    pub name: String,
    pub department_id: i64,
    /// 생성 시 한 번 부여되는 참조 번호 (불변)
    #[sea_orm(unique)]
    pub document_number: String,
    pub created_by: i64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::department::entity::department::Entity",
        from = "Column::DepartmentId",
        to = "crate::domain::department::entity::department::Column::DepartmentId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Department,
    #[sea_orm(has_many = "super::document_version::Entity")]
    DocumentVersion,
}

impl Related<super::document_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DocumentVersion.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
