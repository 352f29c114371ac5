use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

use super::dto::{
    DocumentCreateRequest, DocumentQueryParams, DocumentResponse, ReviewResponse,
    VersionApproveRequest, VersionCreateRequest, VersionResponse, VersionReviewRequest,
};
use super::service::DocumentService;

/// 문서 컨테이너 생성 API
///
/// 부서 접두어와 문서 종류 코드로 참조 번호를 부여합니다 (예: QUA-POL001).
#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = DocumentCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "문서 생성 성공"),
        (status = 404, description = "부서 없음", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn create_document(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<DocumentCreateRequest>,
) -> Result<Json<BaseResponse<DocumentResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = DocumentService::create(state, &current, req).await?;
    Ok(Json(BaseResponse::with_message(
        "문서가 생성되었습니다.",
        result,
    )))
}

/// 문서 목록 조회 API (종류/부서 필터)
#[utoipa::path(
    get,
    path = "/api/documents",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "문서 목록 조회 성공")),
    tag = "Document"
)]
pub async fn list_documents(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<DocumentQueryParams>,
) -> Result<Json<BaseResponse<Vec<DocumentResponse>>>, AppError> {
    let result = DocumentService::list(state, params).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 문서 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/documents/{documentId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "문서 조회 성공"),
        (status = 404, description = "문서 없음", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn get_document(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(document_id): Path<i64>,
) -> Result<Json<BaseResponse<DocumentResponse>>, AppError> {
    let result = DocumentService::get(state, document_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 문서 버전 생성 API
///
/// 첫 버전은 1.0, 이후는 minor/major 증가 방식에 따라 번호가 계산됩니다.
#[utoipa::path(
    post,
    path = "/api/documents/{documentId}/versions",
    request_body = VersionCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "버전 생성 성공"),
        (status = 404, description = "문서 없음", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn create_version(
    State(state): State<AppState>,
    user: AuthUser,
    Path(document_id): Path<i64>,
    Json(req): Json<VersionCreateRequest>,
) -> Result<Json<BaseResponse<VersionResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = DocumentService::create_version(state, &current, document_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "문서 버전이 생성되었습니다.",
        result,
    )))
}

/// 문서 버전 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/documents/{documentId}/versions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "버전 목록 조회 성공")),
    tag = "Document"
)]
pub async fn list_versions(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(document_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<VersionResponse>>>, AppError> {
    let result = DocumentService::list_versions(state, document_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 문서 버전 제출 API (draft → under_review)
#[utoipa::path(
    post,
    path = "/api/document-versions/{versionId}/submit",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "제출 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn submit_version(
    State(state): State<AppState>,
    user: AuthUser,
    Path(version_id): Path<i64>,
) -> Result<Json<BaseResponse<VersionResponse>>, AppError> {
    let current = user.load(&state).await?;
    let result = DocumentService::submit_version(state, &current, version_id).await?;
    Ok(Json(BaseResponse::with_message(
        "문서 버전이 제출되었습니다.",
        result,
    )))
}

/// 문서 버전 검토 API (under_review → under_approval | draft)
#[utoipa::path(
    post,
    path = "/api/document-versions/{versionId}/reviews",
    request_body = VersionReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "검토 처리 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn review_version(
    State(state): State<AppState>,
    user: AuthUser,
    Path(version_id): Path<i64>,
    Json(req): Json<VersionReviewRequest>,
) -> Result<Json<BaseResponse<VersionResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = DocumentService::review_version(state, &current, version_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "검토가 처리되었습니다.",
        result,
    )))
}

/// 문서 버전 승인 API
///
/// 승인 시 같은 문서의 직전 승인본 하나가 archived로 전환됩니다.
#[utoipa::path(
    post,
    path = "/api/document-versions/{versionId}/approve",
    request_body = VersionApproveRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "승인 처리 성공"),
        (status = 400, description = "상태 오류", body = ErrorResponse),
        (status = 403, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Document"
)]
pub async fn approve_version(
    State(state): State<AppState>,
    user: AuthUser,
    Path(version_id): Path<i64>,
    Json(req): Json<VersionApproveRequest>,
) -> Result<Json<BaseResponse<VersionResponse>>, AppError> {
    req.validate()?;

    let current = user.load(&state).await?;
    let result = DocumentService::approve_version(state, &current, version_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "승인이 처리되었습니다.",
        result,
    )))
}

/// 문서 버전 검토 이력 조회 API
#[utoipa::path(
    get,
    path = "/api/document-versions/{versionId}/reviews",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "검토 이력 조회 성공")),
    tag = "Document"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(version_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<ReviewResponse>>>, AppError> {
    let result = DocumentService::list_reviews(state, version_id).await?;
    Ok(Json(BaseResponse::success(result)))
}
