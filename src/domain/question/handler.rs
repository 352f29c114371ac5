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

use super::dto::{QuestionRequest, QuestionResponse};
use super::service::QuestionService;

/// 질문 생성 API
///
/// 영향 평가에서 쓰일 질문과 응답 유형(yes_no | rating)을 등록합니다.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = QuestionRequest,
    security(("bearer_auth" = [])),
    responses((status = 200, description = "질문 생성 성공")),
    tag = "Question"
)]
pub async fn create_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<BaseResponse<QuestionResponse>>, AppError> {
    req.validate()?;

    let result = QuestionService::create(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "질문이 생성되었습니다.",
        result,
    )))
}

/// 질문 목록 조회 API
#[utoipa::path(
    get,
    path = "/api/questions",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "질문 목록 조회 성공")),
    tag = "Question"
)]
pub async fn list_questions(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<QuestionResponse>>>, AppError> {
    let result = QuestionService::list(state).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 질문 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/questions/{questionId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "질문 조회 성공"),
        (status = 404, description = "질문 없음", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn get_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(question_id): Path<i64>,
) -> Result<Json<BaseResponse<QuestionResponse>>, AppError> {
    let result = QuestionService::get(state, question_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 질문 수정 API
#[utoipa::path(
    put,
    path = "/api/questions/{questionId}",
    request_body = QuestionRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "질문 수정 성공"),
        (status = 404, description = "질문 없음", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn update_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(question_id): Path<i64>,
    Json(req): Json<QuestionRequest>,
) -> Result<Json<BaseResponse<QuestionResponse>>, AppError> {
    req.validate()?;

    let result = QuestionService::update(state, question_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "질문이 수정되었습니다.",
        result,
    )))
}

/// 질문 삭제 API
#[utoipa::path(
    delete,
    path = "/api/questions/{questionId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "질문 삭제 성공"),
        (status = 404, description = "질문 없음", body = ErrorResponse)
    ),
    tag = "Question"
)]
pub async fn delete_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(question_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    QuestionService::delete(state, question_id).await?;
    Ok(Json(BaseResponse::message_only("질문이 삭제되었습니다.")))
}
