use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::question::{self, ResponseKind};

/// 질문 생성/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest {
    #[validate(length(min = 1, max = 500, message = "질문 내용은 1~500자여야 합니다."))]
    pub text: String,
    pub response_kind: ResponseKind,
}

/// 질문 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: i64,
    pub text: String,
    pub response_kind: ResponseKind,
    pub created_at: String,
}

impl From<question::Model> for QuestionResponse {
    fn from(model: question::Model) -> Self {
        Self {
            question_id: model.question_id,
            text: model.text,
            response_kind: model.response_kind,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
