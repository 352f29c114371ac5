use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::user;

/// 회원 가입 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "이름은 1~100자여야 합니다."))]
    pub name: String,
    #[validate(email(message = "올바른 이메일 형식이 아닙니다."))]
    pub email: String,
    #[validate(length(min = 8, max = 100, message = "비밀번호는 8자 이상이어야 합니다."))]
    pub password: String,
    #[validate(range(min = 1, message = "roleId는 1 이상이어야 합니다."))]
    pub role_id: i64,
    #[validate(range(min = 1, message = "departmentId는 1 이상이어야 합니다."))]
    pub department_id: i64,
}

/// 로그인 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다."))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요."))]
    pub password: String,
}

/// 사용자 프로필
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub department_id: i64,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            user_id: model.user_id,
            name: model.name,
            email: model.email,
            role_id: model.role_id,
            department_id: model.department_id,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 역할/부서 이름이 포함된 프로필
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role_name: String,
    pub department_name: String,
    pub is_qa: bool,
}

/// 로그인 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub user: UserResponse,
}

/// OTP 발송 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpSendRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다."))]
    pub email: String,
}

/// OTP 검증 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpVerifyRequest {
    #[validate(email(message = "올바른 이메일 형식이 아닙니다."))]
    pub email: String,
    #[validate(length(equal = 6, message = "인증 코드는 6자리입니다."))]
    pub code: String,
}
