use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 답변 행. 질문의 응답 유형에 따라 yes_no 또는 rating 중 정확히
/// 하나만 채워집니다 (서비스 계층에서 검증).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "impact_answer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub answer_id: i64,
    pub impact_id: i64,
    pub question_id: i64,
    pub yes_no: Option<bool>,
    pub rating: Option<i16>,
    pub comment: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::impact_assessment::Entity",
        from = "Column::ImpactId",
        to = "super::impact_assessment::Column::ImpactId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ImpactAssessment,
    #[sea_orm(
        belongs_to = "crate::domain::question::entity::question::Entity",
        from = "Column::QuestionId",
        to = "crate::domain::question::entity::question::Column::QuestionId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Question,
}

impl Related<super::impact_assessment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ImpactAssessment.def()
    }
}

impl Related<crate::domain::question::entity::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
