use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::workflow::WorkflowKind;

use super::entity::{impact_answer, impact_assessment};

/// 답변 한 건 (answer는 질문 유형에 따라 boolean 또는 1~5 정수)
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnswerItem {
    pub question_id: i64,
    #[schema(value_type = Object)]
    pub answer: serde_json::Value,
    pub comment: Option<String>,
}

/// 영향 평가 기록 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessmentRequest {
    #[validate(length(min = 1, message = "답변이 최소 1개 필요합니다."))]
    pub answers: Vec<ImpactAnswerItem>,
    #[validate(length(max = 500, message = "비고는 최대 500자까지 허용됩니다."))]
    pub remarks: Option<String>,
}

/// 답변 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnswerResponse {
    pub answer_id: i64,
    pub question_id: i64,
    pub yes_no: Option<bool>,
    pub rating: Option<i16>,
    pub comment: Option<String>,
}

impl From<impact_answer::Model> for ImpactAnswerResponse {
    fn from(model: impact_answer::Model) -> Self {
        Self {
            answer_id: model.answer_id,
            question_id: model.question_id,
            yes_no: model.yes_no,
            rating: model.rating,
            comment: model.comment,
        }
    }
}

/// 영향 평가 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAssessmentResponse {
    pub impact_id: i64,
    pub parent_kind: WorkflowKind,
    pub parent_id: i64,
    pub recorded_by: i64,
    pub remarks: Option<String>,
    pub answers: Vec<ImpactAnswerResponse>,
    pub created_at: String,
}

impl ImpactAssessmentResponse {
    pub fn from_model(
        model: impact_assessment::Model,
        answers: Vec<impact_answer::Model>,
    ) -> Self {
        Self {
            impact_id: model.impact_id,
            parent_kind: model.parent_kind,
            parent_id: model.parent_id,
            recorded_by: model.recorded_by,
            remarks: model.remarks,
            answers: answers.into_iter().map(|a| a.into()).collect(),
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
