//! 문서 버전 번호 테스트
//!
//! 테스트 대상:
//! - 첫 버전 1.0, minor/major 증가 규칙
//! - DocumentStatus / VersionCreateRequest 직렬화·검증

use qms_server::domain::document::dto::{VersionCreateRequest, VersionType};
use qms_server::domain::document::entity::document::DocumentType;
use qms_server::domain::document::entity::document_version::DocumentStatus;
use qms_server::domain::document::service::next_version_number;
use validator::Validate;

// ============== 버전 번호 테스트 ==============

#[test]
fn should_default_first_version_to_1_0() {
    assert_eq!(
        next_version_number(None, VersionType::Minor).unwrap(),
        "1.0"
    );
}

#[test]
fn should_increment_minor_version() {
    assert_eq!(
        next_version_number(Some("1.0"), VersionType::Minor).unwrap(),
        "1.1"
    );
    assert_eq!(
        next_version_number(Some("1.9"), VersionType::Minor).unwrap(),
        "1.10"
    );
}

#[test]
fn should_increment_major_and_reset_minor() {
    assert_eq!(
        next_version_number(Some("1.7"), VersionType::Major).unwrap(),
        "2.0"
    );
}

#[test]
fn should_reject_malformed_previous_version() {
    assert!(next_version_number(Some("v1"), VersionType::Minor).is_err());
    assert!(next_version_number(Some("1.2.3"), VersionType::Minor).is_err());
}

// ============== 직렬화/검증 테스트 ==============

#[test]
fn should_serialize_document_status_in_snake_case() {
    assert_eq!(
        serde_json::to_string(&DocumentStatus::UnderReview).unwrap(),
        "\"under_review\""
    );
    assert_eq!(
        serde_json::to_string(&DocumentStatus::UnderApproval).unwrap(),
        "\"under_approval\""
    );
    assert_eq!(
        serde_json::to_string(&DocumentStatus::Archived).unwrap(),
        "\"archived\""
    );
}

#[test]
fn should_serialize_document_type_as_display_names() {
    assert_eq!(
        serde_json::to_string(&DocumentType::WorkInstruction).unwrap(),
        "\"Work Instruction\""
    );
    assert_eq!(DocumentType::WorkInstruction.code(), "WIN");
    assert_eq!(DocumentType::Manual.code(), "MAN");
}

#[test]
fn should_fail_validation_when_content_empty() {
    // Arrange
    let req = VersionCreateRequest {
        content: "".to_string(),
        change_summary: None,
        version_type: Some(VersionType::Minor),
    };

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_accept_version_request_without_version_type() {
    let req: VersionCreateRequest = serde_json::from_str(
        r#"{ "content": "1. 목적 ...", "changeSummary": "최초 제정" }"#,
    )
    .unwrap();

    assert!(req.validate().is_ok());
    assert!(req.version_type.is_none());
}
