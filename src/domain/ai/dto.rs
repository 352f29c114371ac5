use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// 정책 초안 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDraftRequest {
    /// 초안 주제 (예: "원자재 입고 검사 정책")
    #[validate(length(min = 1, max = 500, message = "주제는 1~500자여야 합니다."))]
    pub topic: String,
    /// 반영할 배경 설명 (선택)
    #[validate(length(max = 2000, message = "배경 설명은 최대 2000자까지 허용됩니다."))]
    pub context: Option<String>,
    /// 0.0 ~ 2.0 (기본 0.7)
    #[validate(range(min = 0.0, max = 2.0, message = "temperature는 0~2 범위여야 합니다."))]
    pub temperature: Option<f32>,
}

/// 정책 초안 생성 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDraftResponse {
    pub draft: String,
}
