use axum::{extract::State, Json};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

use super::dto::{
    LoginRequest, OtpSendRequest, OtpVerifyRequest, ProfileResponse, SignupRequest, TokenResponse,
    UserResponse,
};
use super::service::AuthService;

/// 회원 가입 API
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "가입 성공"),
        (status = 400, description = "잘못된 요청", body = ErrorResponse),
        (status = 409, description = "이메일 중복", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<BaseResponse<UserResponse>>, AppError> {
    req.validate()?;

    let result = AuthService::signup(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "가입이 완료되었습니다.",
        result,
    )))
}

/// 로그인 API
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<BaseResponse<TokenResponse>>, AppError> {
    req.validate()?;

    let result = AuthService::login(state, req).await?;
    Ok(Json(BaseResponse::with_message(
        "로그인되었습니다.",
        result,
    )))
}

/// 내 프로필 조회 API
#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "프로필 조회 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<ProfileResponse>>, AppError> {
    let user_id = user.user_id()?;
    let result = AuthService::me(state, user_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// OTP 발송 API
#[utoipa::path(
    post,
    path = "/api/otp/send",
    request_body = OtpSendRequest,
    responses(
        (status = 200, description = "발송 성공"),
        (status = 500, description = "메일 발송 실패", body = ErrorResponse)
    ),
    tag = "Otp"
)]
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<OtpSendRequest>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    req.validate()?;

    AuthService::send_otp(state, req).await?;
    Ok(Json(BaseResponse::message_only(
        "인증 코드가 발송되었습니다.",
    )))
}

/// OTP 검증 API
#[utoipa::path(
    post,
    path = "/api/otp/verify",
    request_body = OtpVerifyRequest,
    responses(
        (status = 200, description = "검증 성공"),
        (status = 400, description = "코드 불일치 또는 만료", body = ErrorResponse)
    ),
    tag = "Otp"
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<OtpVerifyRequest>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    req.validate()?;

    AuthService::verify_otp(state, req).await?;
    Ok(Json(BaseResponse::message_only("인증되었습니다.")))
}
