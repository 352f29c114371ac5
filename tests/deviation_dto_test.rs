//! 일탈/변경 관리 DTO 테스트
//!
//! 테스트 대상:
//! - DeviationCreateRequest / ChangeControlCreateRequest 역직렬화·검증
//! - AffectedItem 태그 합집합 직렬화
//! - ReviewRequest 판정 역직렬화

use qms_server::domain::change_control::dto::ChangeControlCreateRequest;
use qms_server::domain::deviation::dto::{AffectedItem, DeviationCreateRequest};
use qms_server::domain::deviation::entity::deviation::ItemKind;
use qms_server::workflow::{ReviewDecision, ReviewRequest};
use validator::Validate;

// ============== AffectedItem 테스트 ==============

#[test]
fn should_deserialize_tagged_product_item() {
    // Arrange & Act
    let item: AffectedItem =
        serde_json::from_str(r#"{ "kind": "product", "name": "정제 A-10" }"#).unwrap();

    // Assert
    let (kind, reference) = item.into_columns();
    assert_eq!(kind, ItemKind::Product);
    assert_eq!(reference, "정제 A-10");
}

#[test]
fn should_deserialize_tagged_equipment_item() {
    let item: AffectedItem =
        serde_json::from_str(r#"{ "kind": "equipment", "equipmentId": 42 }"#).unwrap();

    let (kind, reference) = item.into_columns();
    assert_eq!(kind, ItemKind::Equipment);
    assert_eq!(reference, "42");
}

#[test]
fn should_reject_item_without_kind_tag() {
    let result: Result<AffectedItem, _> = serde_json::from_str(r#"{ "name": "정제 A-10" }"#);
    assert!(result.is_err());
}

// ============== 생성 요청 테스트 ==============

#[test]
fn should_validate_minimal_deviation_create_request() {
    // multipart data 파트에 들어오는 최소 JSON
    let req: DeviationCreateRequest = serde_json::from_str(
        r#"{
            "title": "칭량실 온도 이탈",
            "description": "칭량실 온도가 관리 상한을 2시간 초과",
            "departmentId": 3
        }"#,
    )
    .unwrap();

    assert!(req.validate().is_ok());
    assert!(!req.planned);
    assert!(!req.gmp_relevant);
    assert!(req.affected_item.is_none());
}

#[test]
fn should_fail_validation_when_title_missing_content() {
    let req: DeviationCreateRequest = serde_json::from_str(
        r#"{ "title": "", "description": "내용", "departmentId": 3 }"#,
    )
    .unwrap();

    assert!(req.validate().is_err());
}

#[test]
fn should_validate_change_control_request_with_classification() {
    let req: ChangeControlCreateRequest = serde_json::from_str(
        r#"{
            "title": "정제수 배관 교체",
            "description": "정제수 제조 라인 배관 재질 변경",
            "departmentId": 3,
            "classification": "major",
            "permanence": "permanent",
            "riskScore": 35
        }"#,
    )
    .unwrap();

    assert!(req.validate().is_ok());
}

#[test]
fn should_fail_validation_when_risk_score_out_of_range() {
    let req: ChangeControlCreateRequest = serde_json::from_str(
        r#"{
            "title": "정제수 배관 교체",
            "description": "내용",
            "departmentId": 3,
            "classification": "minor",
            "permanence": "temporary",
            "riskScore": 101
        }"#,
    )
    .unwrap();

    assert!(req.validate().is_err());
}

// ============== 검토 요청 테스트 ==============

#[test]
fn should_deserialize_review_request_actions() {
    let approved: ReviewRequest =
        serde_json::from_str(r#"{ "action": "Approved", "comments": "이상 없음" }"#).unwrap();
    assert_eq!(approved.action, ReviewDecision::Approved);

    let rejected: ReviewRequest =
        serde_json::from_str(r#"{ "action": "Rejected" }"#).unwrap();
    assert_eq!(rejected.action, ReviewDecision::Rejected);
    assert!(rejected.comments.is_none());
}
