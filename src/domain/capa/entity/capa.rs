use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::WorkflowStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "capa")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub capa_id: i64,
    /// 상위 일탈 번호 범위의 참조 번호 (예: QUA-DEV001-CAPA01, 불변)
    #[sea_orm(unique)]
    pub capa_number: String,
    pub deviation_id: i64,
    pub department_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub root_cause: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub corrective_action: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub preventive_action: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub investigation_summary: Option<String>,
    pub change_control_id: Option<i64>,
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
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::deviation::entity::deviation::Entity",
        from = "Column::DeviationId",
        to = "crate::domain::deviation::entity::deviation::Column::DeviationId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Deviation,
    #[sea_orm(
        belongs_to = "crate::domain::change_control::entity::change_control::Entity",
        from = "Column::ChangeControlId",
        to = "crate::domain::change_control::entity::change_control::Column::ChangeControlId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ChangeControl,
}

impl Related<crate::domain::deviation::entity::deviation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deviation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
