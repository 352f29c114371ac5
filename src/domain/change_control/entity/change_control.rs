use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::deviation::entity::deviation::ItemKind;
use crate::workflow::WorkflowStatus;

/// 변경 등급
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ChangeClass")]
#[serde(rename_all = "snake_case")]
pub enum ChangeClass {
    #[sea_orm(string_value = "major")]
    Major,
    #[sea_orm(string_value = "minor")]
    Minor,
    #[sea_orm(string_value = "administrative")]
    Administrative,
}

/// 변경 지속성
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "Permanence")]
#[serde(rename_all = "snake_case")]
pub enum Permanence {
    #[sea_orm(string_value = "permanent")]
    Permanent,
    #[sea_orm(string_value = "temporary")]
    Temporary,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "change_control")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub change_control_id: i64,
    /// 생성 시 한 번 부여되는 참조 번호 (불변)
    #[sea_orm(unique)]
    pub change_number: String,
    pub department_id: i64,
    pub category_id: Option<i64>,
    /// 이 변경을 촉발한 CAPA (있는 경우)
    pub capa_id: Option<i64>,
    pub classification: ChangeClass,
    pub permanence: Permanence,
    pub item_kind: Option<ItemKind>,
    pub item_ref: Option<String>,
    pub document_id: Option<i64>,
    pub location_id: Option<i64>,
    /// 유사 변경 사례 참조 (자유 서술)
    #[sea_orm(column_type = "Text", nullable)]
    pub similar_changes: Option<String>,
    pub risk_score: Option<i32>,
    pub implementation_timeline: Option<String>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
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
    pub acknowledged_by: Option<i64>,
    pub acknowledged_at: Option<DateTime>,
    pub closed_by: Option<i64>,
    pub closed_at: Option<DateTime>,
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
        belongs_to = "super::change_category::Entity",
        from = "Column::CategoryId",
        to = "super::change_category::Column::CategoryId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ChangeCategory,
    #[sea_orm(has_many = "super::historical_check::Entity")]
    HistoricalCheck,
}

impl Related<super::historical_check::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HistoricalCheck.def()
    }
}

impl Related<super::change_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangeCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
