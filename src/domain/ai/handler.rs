use axum::{extract::State, Json};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

use super::dto::{PolicyDraftRequest, PolicyDraftResponse};
use super::service::AiService;

/// 정책 초안 생성 API
///
/// 텍스트 생성 모델로 정책 문서 초안을 만들어 반환합니다.
#[utoipa::path(
    post,
    path = "/api/ai/policy-draft",
    request_body = PolicyDraftRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "초안 생성 성공", body = PolicyDraftResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 500, description = "생성 호출 실패", body = ErrorResponse)
    ),
    tag = "AI"
)]
pub async fn draft_policy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<PolicyDraftRequest>,
) -> Result<Json<BaseResponse<PolicyDraftResponse>>, AppError> {
    req.validate()?;

    let user_id = user.user_id()?;
    let result = AiService::draft_policy(state, user_id, req).await?;
    Ok(Json(BaseResponse::success(result)))
}
