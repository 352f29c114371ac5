use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use validator::Validate;

use crate::domain::attachment::multipart::parse_multipart;
use crate::domain::impact::dto::ImpactAssessmentResponse;
use crate::domain::investigation::dto::InvestigationTeamRequest;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;
use crate::workflow::ReviewRequest;

use super::dto::{
    CapaCreateRequest, CapaQueryParams, CapaResponse, ImmediateActionsRequest,
    InitiateChangeControlRequest, InvestigationRecordRequest,
};
use super::service::CapaService;

/// CAPA 생성 API (multipart: `data` JSON + 첨부 파일)
#[utoipa::path(
    post,
    path = "/api/capa",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CAPA 생성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 404, description = "일탈 없음", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn create_capa(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    let (req, files): (CapaCreateRequest, _) = parse_multipart(multipart).await?;
    req.validate()?;

    let current = user.load(&state).await?;
    let result = CapaService::create(state, &current, req, files).await?;
    Ok(Json(BaseResponse::with_message(
        "CAPA가 생성되었습니다.",
        result,
    )))
}

/// CAPA 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/capa",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "CAPA 목록 조회 성공")),
    tag = "Capa"
)]
pub async fn list_capa(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<CapaQueryParams>,
) -> Result<Json<BaseResponse<Vec<CapaResponse>>>, AppError> {
    let result = CapaService::list(state, params).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// CAPA 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/capa/{capaId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CAPA 조회 성공"),
        (status = 404, description = "CAPA 없음", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn get_capa(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(capa_id): Path<i64>,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    let result = CapaService::get(state, capa_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// CAPA 제출 API
#[utoipa::path(
    post,
    path = "/api/capa/{capaId}/submit",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "제출 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn submit_capa(
    State(state): State<AppState>,
    user: AuthUser,
    Path(capa_id): Path<i64>,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = CapaService::submit(state, &current, capa_id).await?;
    Ok(Json(BaseResponse::with_message(
        "CAPA가 제출되었습니다.",
        result,
    )))
}

/// CAPA 부서장 검토 API
#[utoipa::path(
    post,
    path = "/api/capa/{capaId}/review",
    request_body = ReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "검토 처리 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn review_capa(
    State(state): State<AppState>,
    user: AuthUser,
    Path(capa_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = CapaService::review(state, &current, capa_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "검토가 처리되었습니다.",
        result,
    )))
}

/// CAPA QA 검토 API
#[utoipa::path(
    post,
    path = "/api/capa/{capaId}/qa-review",
    request_body = ReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "QA 검토 처리 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn qa_review_capa(
    State(state): State<AppState>,
    user: AuthUser,
    Path(capa_id): Path<i64>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = CapaService::qa_review(state, &current, capa_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "QA 검토가 처리되었습니다.",
        result,
    )))
}

/// CAPA 조사팀 구성 API
#[utoipa::path(
    post,
    path = "/api/capa/{capaId}/investigation-team",
    request_body = InvestigationTeamRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조사팀 구성 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn create_capa_team(
    State(state): State<AppState>,
    user: AuthUser,
    Path(capa_id): Path<i64>,
    Json(req): Json<InvestigationTeamRequest>,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = CapaService::create_team(state, &current, capa_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "조사팀이 구성되었습니다.",
        result,
    )))
}

/// CAPA 조사 결과 기록 API (조사팀 구성원 전용)
#[utoipa::path(
    post,
    path = "/api/capa/{capaId}/investigation",
    request_body = InvestigationRecordRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조사 결과 기록 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "조사팀 구성원 아님", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn record_capa_investigation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(capa_id): Path<i64>,
    Json(req): Json<InvestigationRecordRequest>,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = CapaService::record_investigation(state, &current, capa_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "조사 결과가 기록되었습니다.",
        result,
    )))
}

/// CAPA 조사 질문지(영향 평가) 조회 API
#[utoipa::path(
    get,
    path = "/api/capa/{capaId}/impact-assessment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "영향 평가 조회 성공"),
        (status = 404, description = "영향 평가 없음", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn get_capa_impact(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(capa_id): Path<i64>,
) -> Result<Json<BaseResponse<ImpactAssessmentResponse>>, AppError> {
    let result = CapaService::get_impact(state, capa_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// CAPA 즉시 조치 착수 API (조사팀 구성원 전용)
#[utoipa::path(
    post,
    path = "/api/capa/{capaId}/immediate-actions",
    request_body = ImmediateActionsRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "즉시 조치 착수 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "조사팀 구성원 아님", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn start_capa_immediate_actions(
    State(state): State<AppState>,
    user: AuthUser,
    Path(capa_id): Path<i64>,
    Json(req): Json<ImmediateActionsRequest>,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = CapaService::start_immediate_actions(state, &current, capa_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "즉시 조치가 시작되었습니다.",
        result,
    )))
}

/// CAPA발 변경 관리 개시 API (조사팀 구성원 전용)
#[utoipa::path(
    post,
    path = "/api/capa/{capaId}/initiate-change-control",
    request_body = InitiateChangeControlRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "변경 관리 개시 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "조사팀 구성원 아님", body = ErrorResponse)
    ),
    tag = "Capa"
)]
pub async fn initiate_capa_change_control(
    State(state): State<AppState>,
    user: AuthUser,
    Path(capa_id): Path<i64>,
    Json(req): Json<InitiateChangeControlRequest>,
) -> Result<Json<BaseResponse<CapaResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = CapaService::initiate_change_control(state, &current, capa_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "변경 관리가 개시되었습니다.",
        result,
    )))
}
