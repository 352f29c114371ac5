use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 과거 유사 변경 이력 점검 기록
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "historical_check")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub check_id: i64,
    pub change_control_id: i64,
    pub checked_by: i64,
    /// 검토한 유사 변경 번호 목록 (자유 서술)
    #[sea_orm(column_type = "Text", nullable)]
    pub similar_references: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub summary: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::change_control::Entity",
        from = "Column::ChangeControlId",
        to = "super::change_control::Column::ChangeControlId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ChangeControl,
}

impl Related<super::change_control::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangeControl.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
