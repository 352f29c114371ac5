//! 인증/계정 DTO 테스트
//!
//! 테스트 대상:
//! - SignupRequest / LoginRequest 유효성 검증
//! - 응답 직렬화 (camelCase)

use qms_server::domain::auth::dto::{LoginRequest, OtpVerifyRequest, SignupRequest};
use validator::Validate;

// ============== 유효성 검증 테스트 ==============

#[test]
fn should_validate_signup_request_success() {
    // Arrange
    let req = SignupRequest {
        name: "홍길동".to_string(),
        email: "hong@example.com".to_string(),
        password: "secret-password".to_string(),
        role_id: 1,
        department_id: 2,
    };

    // Act & Assert
    assert!(req.validate().is_ok());
}

#[test]
fn should_fail_validation_when_email_malformed() {
    let req = SignupRequest {
        name: "홍길동".to_string(),
        email: "not-an-email".to_string(),
        password: "secret-password".to_string(),
        role_id: 1,
        department_id: 2,
    };

    let result = req.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().field_errors().contains_key("email"));
}

#[test]
fn should_fail_validation_when_password_too_short() {
    let req = SignupRequest {
        name: "홍길동".to_string(),
        email: "hong@example.com".to_string(),
        password: "short".to_string(),
        role_id: 1,
        department_id: 2,
    };

    let result = req.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().field_errors().contains_key("password"));
}

#[test]
fn should_fail_validation_when_login_password_empty() {
    let req = LoginRequest {
        email: "hong@example.com".to_string(),
        password: "".to_string(),
    };

    assert!(req.validate().is_err());
}

#[test]
fn should_require_six_digit_otp_code() {
    let valid = OtpVerifyRequest {
        email: "hong@example.com".to_string(),
        code: "123456".to_string(),
    };
    assert!(valid.validate().is_ok());

    let invalid = OtpVerifyRequest {
        email: "hong@example.com".to_string(),
        code: "12345".to_string(),
    };
    assert!(invalid.validate().is_err());
}

// ============== 역직렬화 테스트 ==============

#[test]
fn should_deserialize_signup_request_in_camel_case() {
    let req: SignupRequest = serde_json::from_str(
        r#"{
            "name": "홍길동",
            "email": "hong@example.com",
            "password": "secret-password",
            "roleId": 1,
            "departmentId": 2
        }"#,
    )
    .unwrap();

    assert_eq!(req.role_id, 1);
    assert_eq!(req.department_id, 2);
}
