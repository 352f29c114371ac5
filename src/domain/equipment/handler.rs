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

use super::dto::{EquipmentRequest, EquipmentResponse};
use super::service::EquipmentService;

/// 설비 생성 API
#[utoipa::path(
    post,
    path = "/api/equipment",
    request_body = EquipmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "설비 생성 성공"),
        (status = 404, description = "장소 없음", body = ErrorResponse)
    ),
    tag = "Equipment"
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<EquipmentRequest>,
) -> Result<Json<BaseResponse<EquipmentResponse>>, AppError> {
    req.validate()?;

    let result = EquipmentService::create(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "설비가 생성되었습니다.",
        result,
    )))
}

/// 설비 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/equipment",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "설비 목록 조회 성공")),
    tag = "Equipment"
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<EquipmentResponse>>>, AppError> {
    let result = EquipmentService::list(state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 설비 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/equipment/{equipmentId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "설비 조회 성공"),
        (status = 404, description = "설비 없음", body = ErrorResponse)
    ),
    tag = "Equipment"
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(equipment_id): Path<i64>,
) -> Result<Json<BaseResponse<EquipmentResponse>>, AppError> {
    let result = EquipmentService::get(state, equipment_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 설비 수정 API
#[utoipa::path(
    put,
    path = "/api/equipment/{equipmentId}",
    request_body = EquipmentRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "설비 수정 성공"),
        (status = 404, description = "설비 없음", body = ErrorResponse)
    ),
    tag = "Equipment"
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(equipment_id): Path<i64>,
    Json(req): Json<EquipmentRequest>,
) -> Result<Json<BaseResponse<EquipmentResponse>>, AppError> {
    req.validate()?;

    let result = EquipmentService::update(state, equipment_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "설비가 수정되었습니다.",
        result,
    )))
}

/// 설비 삭제 API
#[utoipa::path(
    delete,
    path = "/api/equipment/{equipmentId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "설비 삭제 성공"),
        (status = 404, description = "설비 없음", body = ErrorResponse)
    ),
    tag = "Equipment"
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(equipment_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    EquipmentService::delete(state, equipment_id).await?;
    Ok(Json(BaseResponse::message_only("설비가 삭제되었습니다.")))
}
