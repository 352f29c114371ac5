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

use super::dto::{LocationRequest, LocationResponse};
use super::service::LocationService;

/// 장소 생성 API
#[utoipa::path(
    post,
    path = "/api/locations",
    request_body = LocationRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, description = "장소 생성 성공")),
    tag = "Location"
)]
pub async fn create_location(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<LocationRequest>,
) -> Result<Json<BaseResponse<LocationResponse>>, AppError> {
    req.validate()?;

    let result = LocationService::create(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "장소가 생성되었습니다.",
        result,
    )))
}

/// 장소 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/locations",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "장소 목록 조회 성공")),
    tag = "Location"
)]
pub async fn list_locations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<LocationResponse>>>, AppError> {
    let result = LocationService::list(state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 장소 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/locations/{locationId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "장소 조회 성공"),
        (status = 404, description = "장소 없음", body = ErrorResponse)
    ),
    tag = "Location"
)]
pub async fn get_location(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(location_id): Path<i64>,
) -> Result<Json<BaseResponse<LocationResponse>>, AppError> {
    let result = LocationService::get(state, location_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 장소 수정 API
#[utoipa::path(
    put,
    path = "/api/locations/{locationId}",
    request_body = LocationRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "장소 수정 성공"),
        (status = 404, description = "장소 없음", body = ErrorResponse)
    ),
    tag = "Location"
)]
pub async fn update_location(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(location_id): Path<i64>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<BaseResponse<LocationResponse>>, AppError> {
    req.validate()?;

    let result = LocationService::update(state, location_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "장소가 수정되었습니다.",
        result,
    )))
}

/// 장소 삭제 API
#[utoipa::path(
    delete,
    path = "/api/locations/{locationId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "장소 삭제 성공"),
        (status = 404, description = "장소 없음", body = ErrorResponse)
    ),
    tag = "Location"
)]
pub async fn delete_location(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(location_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    LocationService::delete(state, location_id).await?;
    Ok(Json(BaseResponse::message_only("장소가 삭제되었습니다.")))
}
