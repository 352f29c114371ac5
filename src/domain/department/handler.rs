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

use super::dto::{DepartmentCreateRequest, DepartmentResponse, DepartmentUpdateRequest};
use super::service::DepartmentService;

/// 부서 생성 API
///
/// 부서명 앞 3글자로 참조 번호 접두어를 부여합니다.
#[utoipa::path(
    post,
    path = "/api/departments",
    request_body = DepartmentCreateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "부서 생성 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "부서 이름 중복", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn create_department(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<DepartmentCreateRequest>,
) -> Result<Json<BaseResponse<DepartmentResponse>>, AppError> {
    req.validate()?;

    let result = DepartmentService::create(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "부서가 생성되었습니다.",
        result,
    )))
}

/// 부서 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/departments",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "부서 목록 조회 성공")),
    tag = "Department"
)]
pub async fn list_departments(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<DepartmentResponse>>>, AppError> {
    let result = DepartmentService::list(state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 부서 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/departments/{departmentId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "부서 조회 성공"),
        (status = 404, description = "부서 없음", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn get_department(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(department_id): Path<i64>,
) -> Result<Json<BaseResponse<DepartmentResponse>>, AppError> {
    let result = DepartmentService::get(state, department_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 부서 수정 API
#[utoipa::path(
    put,
    path = "/api/departments/{departmentId}",
    request_body = DepartmentUpdateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "부서 수정 성공"),
        (status = 404, description = "부서 없음", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn update_department(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(department_id): Path<i64>,
    Json(req): Json<DepartmentUpdateRequest>,
) -> Result<Json<BaseResponse<DepartmentResponse>>, AppError> {
    req.validate()?;

    let result = DepartmentService::update(state, department_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "부서가 수정되었습니다.",
        result,
    )))
}

/// 부서 삭제 API
#[utoipa::path(
    delete,
    path = "/api/departments/{departmentId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "부서 삭제 성공"),
        (status = 404, description = "부서 없음", body = ErrorResponse)
    ),
    tag = "Department"
)]
pub async fn delete_department(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(department_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    DepartmentService::delete(state, department_id).await?;
    Ok(Json(BaseResponse::message_only("부서가 삭제되었습니다.")))
}
