use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::workflow::WorkflowStatus;

/// 영향 품목 종류
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ItemKind")]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[sea_orm(string_value = "product")]
    Product,
    #[sea_orm(string_value = "material")]
    Material,
    #[sea_orm(string_value = "equipment")]
    Equipment,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deviation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub deviation_id: i64,
    /// 생성 시 한 번 부여되는 참조 번호 (불변)
    #[sea_orm(unique)]
    pub deviation_number: String,
    pub department_id: i64,
    pub category_id: Option<i64>,
    pub location_id: Option<i64>,
    pub equipment_id: Option<i64>,
    /// 계획된 일탈 여부
    pub planned: bool,
    pub gmp_relevant: bool,
    pub item_kind: Option<ItemKind>,
    /// 품목 식별자 (제품/자재 이름 또는 설비 ID)
    pub item_ref: Option<String>,
    pub governing_document_id: Option<i64>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub immediate_actions: Option<String>,
    pub status: WorkflowStatus,
    pub created_by: i64,
    pub submitted_by: Option<i64>,
    pub submitted_at: Option<DateTime>,
    pub reviewed_by: Option<i64>,
    pub reviewed_at: Option<DateTime>,
    pub review_comments: Option<String>,
    pub qa_reviewer: Option<i64>,
    pub qa_reviewed_at: Option<DateTime>,
    pub qa_comments: Option<String>,
    pub investigation_team_id: Option<i64>,
    pub team_assigned_by: Option<i64>,
    pub impact_assessment_id: Option<i64>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
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
    #[sea_orm(
        belongs_to = "super::deviation_category::Entity",
        from = "Column::CategoryId",
        to = "super::deviation_category::Column::CategoryId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DeviationCategory,
    #[sea_orm(has_many = "crate::domain::capa::entity::capa::Entity")]
    Capa,
}

impl Related<crate::domain::department::entity::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<crate::domain::capa::entity::capa::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Capa.def()
    }
}

impl Related<super::deviation_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviationCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
