use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

use super::dto::{
    PermissionRequest, PermissionResponse, RolePermissionRequest, RolePermissionResponse,
};
use super::service::PermissionService;

/// 권한 생성 API
#[utoipa::path(
    post,
    path = "/api/permissions",
    request_body = PermissionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "권한 생성 성공"),
        (status = 409, description = "권한 이름 중복", body = ErrorResponse)
    ),
    tag = "Permission"
)]
pub async fn create_permission(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<PermissionRequest>,
) -> Result<Json<BaseResponse<PermissionResponse>>, AppError> {
    req.validate()?;

    let result = PermissionService::create(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "권한이 생성되었습니다.",
        result,
    )))
}

/// 권한 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/permissions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "권한 목록 조회 성공")),
    tag = "Permission"
)]
pub async fn list_permissions(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<PermissionResponse>>>, AppError> {
    let result = PermissionService::list(state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 권한 삭제 API
#[utoipa::path(
    delete,
    path = "/api/permissions/{permissionId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "권한 삭제 성공"),
        (status = 404, description = "권한 없음", body = ErrorResponse)
    ),
    tag = "Permission"
)]
pub async fn delete_permission(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(permission_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    PermissionService::delete(state, permission_id).await?;
    Ok(Json(BaseResponse::message_only("권한이 삭제되었습니다.")))
}

/// 역할-권한 연결 API
#[utoipa::path(
    post,
    path = "/api/role-permissions",
    request_body = RolePermissionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "연결 성공"),
        (status = 404, description = "역할 또는 권한 없음", body = ErrorResponse),
        (status = 409, description = "이미 연결됨", body = ErrorResponse)
    ),
    tag = "Permission"
)]
pub async fn assign_role_permission(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<RolePermissionRequest>,
) -> Result<Json<BaseResponse<RolePermissionResponse>>, AppError> {
    req.validate()?;

    let result = PermissionService::assign(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "역할에 권한이 연결되었습니다.",
        result,
    )))
}

/// 역할별 권한 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/roles/{roleId}/permissions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "역할별 권한 목록 조회 성공")),
    tag = "Permission"
)]
pub async fn list_role_permissions(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(role_id): Path<i64>,
) -> Result<Json<BaseResponse<Vec<PermissionResponse>>>, AppError> {
    let result = PermissionService::list_for_role(state, role_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 역할-권한 연결 해제 API
#[utoipa::path(
    delete,
    path = "/api/role-permissions/{rolePermissionId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "연결 해제 성공"),
        (status = 404, description = "연결 없음", body = ErrorResponse)
    ),
    tag = "Permission"
)]
pub async fn unassign_role_permission(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(role_permission_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    PermissionService::unassign(state, role_permission_id).await?;
    Ok(Json(BaseResponse::message_only(
        "역할-권한 연결이 해제되었습니다.",
    )))
}
