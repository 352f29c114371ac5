use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use validator::Validate;

use crate::domain::attachment::dto::AttachmentResponse;
use crate::domain::attachment::multipart::parse_multipart;
use crate::domain::impact::dto::{ImpactAssessmentRequest, ImpactAssessmentResponse};
use crate::domain::investigation::dto::InvestigationTeamRequest;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;
use crate::workflow::ReviewRequest;

use super::dto::{
    DeviationCategoryRequest, DeviationCategoryResponse, DeviationCreateRequest,
    DeviationQueryParams, DeviationResponse,
};
use super::service::DeviationService;

/// 일탈 생성 API (multipart: `data` JSON + 첨부 파일)
#[utoipa::path(
    post,
    path = "/api/deviations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "일탈 생성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse),
        (status = 404, description = "부서 없음", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn create_deviation(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<BaseResponse<DeviationResponse>>, AppError> {
    let (req, files): (DeviationCreateRequest, _) = parse_multipart(multipart).await?;
    req.validate()?;

    let current = user.load(&state).await?;
    let result = DeviationService::create(state, &current, req, files).await?;
    Ok(Json(BaseResponse::with_message(
        "일탈이 생성되었습니다.",
        result,
    )))
}

/// 일탈 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/deviations",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "일탈 목록 조회 성공")),
    tag = "Deviation"
)]
pub async fn list_deviations(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<DeviationQueryParams>,
) -> Result<Json<BaseResponse<Vec<DeviationResponse>>>, AppError> {
    let result = DeviationService::list(state, params).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 일탈 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/deviations/{deviationId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "일탈 조회 성공"),
        (status = 404, description = "일탈 없음", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn get_deviation(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(deviation_id): Path<i64>,
) -> Result<Json<BaseResponse<DeviationResponse>>, AppError> {
    let result = DeviationService::get(state, deviation_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 일탈 제출 API (Draft → Under Department Head Review)
#[utoipa::path(
    post,
    path = "/api/deviations/{deviationId}/submit",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "제출 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn submit_deviation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(deviation_id): Path<i64>,
) -> Result<Json<BaseResponse<DeviationResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = DeviationService::submit(state, &current, deviation_id).await?;
    Ok(Json(BaseResponse::with_message(
        "일탈이 제출되었습니다.",
        result,
    )))
}

/// 일탈 부서장 검토 API
#[utoipa::path(
    post,
    path = "/api/deviations/{deviationId}/review",
    request_body = ReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "검토 처리 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn review_deviation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(deviation_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<BaseResponse<DeviationResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = DeviationService::review(state, &current, deviation_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "검토가 처리되었습니다.",
        result,
    )))
}

/// 일탈 QA 검토 API
#[utoipa::path(
    post,
    path = "/api/deviations/{deviationId}/qa-review",
    request_body = ReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "QA 검토 처리 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn qa_review_deviation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(deviation_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<BaseResponse<DeviationResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = DeviationService::qa_review(state, &current, deviation_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "QA 검토가 처리되었습니다.",
        result,
    )))
}

/// 일탈 조사팀 구성 API (Accepted By QA → Investigation Team Assigned)
#[utoipa::path(
    post,
    path = "/api/deviations/{deviationId}/investigation-team",
    request_body = InvestigationTeamRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조사팀 구성 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn create_deviation_team(
    State(state): State<AppState>,
    user: AuthUser,
    Path(deviation_id): Path<i64>,
    Json(req): Json<InvestigationTeamRequest>,
) -> Result<Json<BaseResponse<DeviationResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = DeviationService::create_team(state, &current, deviation_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "조사팀이 구성되었습니다.",
        result,
    )))
}

/// 일탈 영향 평가 기록 API (조사팀 구성원 전용)
#[utoipa::path(
    post,
    path = "/api/deviations/{deviationId}/impact-assessment",
    request_body = ImpactAssessmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "영향 평가 기록 성공"),
        (status = 400, description = "상태 오류 또는 답변 유형 불일치", body = ErrorResponse),
        (status = 403, description = "조사팀 구성원 아님", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn record_deviation_impact(
    State(state): State<AppState>,
    user: AuthUser,
    Path(deviation_id): Path<i64>,
    Json(req): Json<ImpactAssessmentRequest>,
) -> Result<Json<BaseResponse<DeviationResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = DeviationService::record_impact(state, &current, deviation_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "영향 평가가 기록되었습니다.",
        result,
    )))
}

/// 일탈 영향 평가 조회 API
#[utoipa::path(
    get,
    path = "/api/deviations/{deviationId}/impact-assessment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "영향 평가 조회 성공"),
        (status = 404, description = "영향 평가 없음", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn get_deviation_impact(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(deviation_id): Path<i64>,
) -> Result<Json<BaseResponse<ImpactAssessmentResponse>>, AppError> {
    let result = DeviationService::get_impact(state, deviation_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 일탈 첨부 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/deviations/{deviationId}/attachments",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "첨부 목록 조회 성공")),
    tag = "Deviation"
)]
pub async fn list_deviation_attachments(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(deviation_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<AttachmentResponse>>>, AppError> {
    let result = DeviationService::list_attachments(state, deviation_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 일탈 카테고리 생성 API
#[utoipa::path(
    post,
    path = "/api/deviation-categories",
    request_body = DeviationCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "카테고리 생성 성공"),
        (status = 409, description = "이름 중복", body = ErrorResponse)
    ),
    tag = "Deviation"
)]
pub async fn create_deviation_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<DeviationCategoryRequest>,
) -> Result<Json<BaseResponse<DeviationCategoryResponse>>, AppError> {
    req.validate()?;

    let result = DeviationService::create_category(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "카테고리가 생성되었습니다.",
        result,
    )))
}

/// 일탈 카테고리 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/deviation-categories",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "카테고리 목록 조회 성공")),
    tag = "Deviation"
)]
pub async fn list_deviation_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<DeviationCategoryResponse>>>, AppError> {
    let result = DeviationService::list_categories(state).await?;
    Ok(Json(BaseResponse::success(result)))
}
