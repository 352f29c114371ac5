use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use validator::Validate;

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
    ChangeCategoryRequest, ChangeCategoryResponse, ChangeControlCreateRequest,
    ChangeControlQueryParams, ChangeControlResponse, HistoricalCheckRequest,
    HistoricalCheckResponse,
};
use super::service::ChangeControlService;

/// 변경 관리 생성 API (multipart: `data` JSON + 첨부 파일)
#[utoipa::path(
    post,
    path = "/api/change-controls",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 관리 생성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "부서 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn create_change_control(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    let (req, files): (ChangeControlCreateRequest, _) = parse_multipart(multipart).await?;
    req.validate()?;

    let current = user.load(&state).await?;
    let result = ChangeControlService::create(state, &current, req, files).await?;
    Ok(Json(BaseResponse::with_message(
        "변경 관리가 생성되었습니다.",
        result,
    )))
}

/// 변경 관리 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/change-controls",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "변경 관리 목록 조회 성공")),
    tag = "ChangeControl"
)]
pub async fn list_change_controls(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<ChangeControlQueryParams>,
) -> Result<Json<BaseResponse<Vec<ChangeControlResponse>>>, AppError> {
    let result = ChangeControlService::list(state, params).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 변경 관리 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/change-controls/{changeControlId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 관리 조회 성공"),
        (status = 404, description = "변경 관리 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn get_change_control(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(change_control_id): Path<i64>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    let result = ChangeControlService::get(state, change_control_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 변경 관리 제출 API
#[utoipa::path(
    post,
    path = "/api/change-controls/{changeControlId}/submit",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "제출 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn submit_change_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(change_control_id): Path<i64>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = ChangeControlService::submit(state, &current, change_control_id).await?;
    Ok(Json(BaseResponse::with_message(
        "변경 관리가 제출되었습니다.",
        result,
    )))
}

/// 변경 관리 부서장 검토 API
#[utoipa::path(
    post,
    path = "/api/change-controls/{changeControlId}/review",
    request_body = ReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "검토 처리 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn review_change_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(change_control_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = ChangeControlService::review(state, &current, change_control_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "검토가 처리되었습니다.",
        result,
    )))
}

/// 변경 관리 QA 검토 API
#[utoipa::path(
    post,
    path = "/api/change-controls/{changeControlId}/qa-review",
    request_body = ReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "QA 검토 처리 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn qa_review_change_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(change_control_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = ChangeControlService::qa_review(state, &current, change_control_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "QA 검토가 처리되었습니다.",
        result,
    )))
}

/// 변경 관리 조사팀 구성 API
#[utoipa::path(
    post,
    path = "/api/change-controls/{changeControlId}/investigation-team",
    request_body = InvestigationTeamRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조사팀 구성 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn create_change_control_team(
    State(state): State<AppState>,
    user: AuthUser,
    Path(change_control_id): Path<i64>,
    Json(req): Json<InvestigationTeamRequest>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = ChangeControlService::create_team(state, &current, change_control_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "조사팀이 구성되었습니다.",
        result,
    )))
}

/// 변경 관리 영향 평가 기록 API (조사팀 구성원 전용)
#[utoipa::path(
    post,
    path = "/api/change-controls/{changeControlId}/impact-assessment",
    request_body = ImpactAssessmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "영향 평가 기록 성공"),
        (status = 400, description = "상태 오류 또는 답변 유형 불일치", body = ErrorResponse),
        (status = 403, description = "조사팀 구성원 아님", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn record_change_control_impact(
    State(state): State<AppState>,
    user: AuthUser,
    Path(change_control_id): Path<i64>,
    Json(req): Json<ImpactAssessmentRequest>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result =
        ChangeControlService::record_impact(state, &current, change_control_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "영향 평가가 기록되었습니다.",
        result,
    )))
}

/// 변경 관리 영향 평가 조회 API
#[utoipa::path(
    get,
    path = "/api/change-controls/{changeControlId}/impact-assessment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "영향 평가 조회 성공"),
        (status = 404, description = "영향 평가 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn get_change_control_impact(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(change_control_id): Path<i64>,
) -> Result<Json<BaseResponse<ImpactAssessmentResponse>>, AppError> {
    let result = ChangeControlService::get_impact(state, change_control_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 변경 관리 과거 이력 점검 API (조사팀 구성원 전용)
#[utoipa::path(
    post,
    path = "/api/change-controls/{changeControlId}/historical-check",
    request_body = HistoricalCheckRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "이력 점검 기록 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "조사팀 구성원 아님", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn record_historical_check(
    State(state): State<AppState>,
    user: AuthUser,
    Path(change_control_id): Path<i64>,
    Json(req): Json<HistoricalCheckRequest>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result =
        ChangeControlService::record_historical_check(state, &current, change_control_id, req)
            .await?;
    Ok(Json(BaseResponse::with_message(
        "이력 점검이 기록되었습니다.",
        result,
    )))
}

/// 변경 관리 과거 이력 점검 조회 API
#[utoipa::path(
    get,
    path = "/api/change-controls/{changeControlId}/historical-check",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "이력 점검 조회 성공")),
    tag = "ChangeControl"
)]
pub async fn list_historical_checks(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(change_control_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<HistoricalCheckResponse>>>, AppError> {
    let result = ChangeControlService::list_historical_checks(state, change_control_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 변경 관리 승인자 확인 API
#[utoipa::path(
    post,
    path = "/api/change-controls/{changeControlId}/acknowledge",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "확인 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn acknowledge_change_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(change_control_id): Path<i64>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = ChangeControlService::acknowledge(state, &current, change_control_id).await?;
    Ok(Json(BaseResponse::with_message(
        "변경 관리가 확인되었습니다.",
        result,
    )))
}

/// 변경 관리 종결 API
#[utoipa::path(
    post,
    path = "/api/change-controls/{changeControlId}/close",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "종결 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn close_change_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(change_control_id): Path<i64>,
) -> Result<Json<BaseResponse<ChangeControlResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = ChangeControlService::close(state, &current, change_control_id).await?;
    Ok(Json(BaseResponse::with_message(
        "변경 관리가 종결되었습니다.",
        result,
    )))
}

/// 변경 분류 카테고리 생성 API
#[utoipa::path(
    post,
    path = "/api/change-categories",
    request_body = ChangeCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "카테고리 생성 성공"),
        (status = 409, description = "이름 중복", body = ErrorResponse)
    ),
    tag = "ChangeControl"
)]
pub async fn create_change_category(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<ChangeCategoryRequest>,
) -> Result<Json<BaseResponse<ChangeCategoryResponse>>, AppError> {
    req.validate()?;

    let result = ChangeControlService::create_category(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "카테고리가 생성되었습니다.",
        result,
    )))
}

/// 변경 분류 카테고리 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/change-categories",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "카테고리 목록 조회 성공")),
    tag = "ChangeControl"
)]
pub async fn list_change_categories(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<ChangeCategoryResponse>>>, AppError> {
    let result = ChangeControlService::list_categories(state).await?;
    Ok(Json(BaseResponse::success(result)))
}
