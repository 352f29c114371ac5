use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    InternalError(String),
    ValidationError(String),
    JsonParseFailed(String),

    /// 현재 상태에서 허용되지 않는 워크플로우 전이
    InvalidStatus(String),
    /// 해당 엔터티 종류에 존재하지 않는 동작
    UnsupportedAction(String),
    /// 역할이 요구 조건을 충족하지 않음
    RoleNotAllowed(String),
    /// 부서가 일치하지 않음
    DepartmentMismatch(String),
    /// 조사팀 구성원이 아님
    NotTeamMember(String),

    /// OTP 코드 불일치
    OtpInvalid(String),
    /// OTP 코드 만료
    OtpExpired(String),

    /// 오브젝트 스토리지 업로드 실패
    StorageError(String),
    /// 메일 발송 실패
    MailError(String),
    /// 텍스트 생성 호출 실패
    AiError(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg)
            | AppError::InternalError(msg)
            | AppError::ValidationError(msg)
            | AppError::InvalidStatus(msg)
            | AppError::UnsupportedAction(msg)
            | AppError::RoleNotAllowed(msg)
            | AppError::DepartmentMismatch(msg)
            | AppError::NotTeamMember(msg)
            | AppError::OtpInvalid(msg)
            | AppError::OtpExpired(msg)
            | AppError::StorageError(msg)
            | AppError::MailError(msg)
            | AppError::AiError(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::NotFound(_) => "COMMON404",
            AppError::Unauthorized(_) => "COMMON401",
            AppError::Forbidden(_) => "COMMON403",
            AppError::Conflict(_) => "COMMON409",
            AppError::InternalError(_) => "COMMON500",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::InvalidStatus(_) => "WF4001",
            AppError::UnsupportedAction(_) => "WF4002",
            AppError::RoleNotAllowed(_) => "WF4031",
            AppError::DepartmentMismatch(_) => "WF4032",
            AppError::NotTeamMember(_) => "WF4033",
            AppError::OtpInvalid(_) => "OTP4001",
            AppError::OtpExpired(_) => "OTP4002",
            AppError::StorageError(_) => "FILE5001",
            AppError::MailError(_) => "MAIL5001",
            AppError::AiError(_) => "AI5001",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_)
            | AppError::InvalidStatus(_)
            | AppError::UnsupportedAction(_)
            | AppError::OtpInvalid(_)
            | AppError::OtpExpired(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_)
            | AppError::RoleNotAllowed(_)
            | AppError::DepartmentMismatch(_)
            | AppError::NotTeamMember(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalError(_)
            | AppError::StorageError(_)
            | AppError::MailError(_)
            | AppError::AiError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        // 에러 로깅
        match &self {
            AppError::InternalError(_)
            | AppError::StorageError(_)
            | AppError::MailError(_)
            | AppError::AiError(_) => {
                error!("Internal Server Error [{}]: {}", error_code, message);
            }
            _ => {
                error!("Error [{}]: {}", error_code, message);
            }
        }

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.to_string())
    }
}

/// DTO 유효성 검증 실패를 AppError로 변환
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

/// 영속성 계층 에러를 AppError로 변환
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// 편의 함수들
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }
}
