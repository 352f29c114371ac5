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

use super::dto::{RoleRequest, RoleResponse};
use super::service::RoleService;

/// 역할 생성 API
#[utoipa::path(
    post,
    path = "/api/roles",
    request_body = RoleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "역할 생성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "역할 이름 중복", body = ErrorResponse)
    ),
    tag = "Role"
)]
pub async fn create_role(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<RoleRequest>,
) -> Result<Json<BaseResponse<RoleResponse>>, AppError> {
    req.validate()?;

    let result = RoleService::create(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "역할이 생성되었습니다.",
        result,
    )))
}

/// 역할 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/roles",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "역할 목록 조회 성공")),
    tag = "Role"
)]
pub async fn list_roles(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<RoleResponse>>>, AppError> {
    let result = RoleService::list(state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 역할 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/roles/{roleId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "역할 조회 성공"),
        (status = 404, description = "역할 없음", body = ErrorResponse)
    ),
    tag = "Role"
)]
pub async fn get_role(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(role_id): Path<i64>,
) -> Result<Json<BaseResponse<RoleResponse>>, AppError> {
    let result = RoleService::get(state, role_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 역할 수정 API
#[utoipa::path(
    put,
    path = "/api/roles/{roleId}",
    request_body = RoleRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "역할 수정 성공"),
        (status = 404, description = "역할 없음", body = ErrorResponse)
    ),
    tag = "Role"
)]
pub async fn update_role(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(role_id): Path<i64>,
    Json(req): Json<RoleRequest>,
) -> Result<Json<BaseResponse<RoleResponse>>, AppError> {
    req.validate()?;

    let result = RoleService::update(state, role_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "역할이 수정되었습니다.",
        result,
    )))
}

/// 역할 삭제 API
#[utoipa::path(
    delete,
    path = "/api/roles/{roleId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "역할 삭제 성공"),
        (status = 404, description = "역할 없음", body = ErrorResponse)
    ),
    tag = "Role"
)]
pub async fn delete_role(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(role_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    RoleService::delete(state, role_id).await?;
    Ok(Json(BaseResponse::message_only("역할이 삭제되었습니다.")))
}
