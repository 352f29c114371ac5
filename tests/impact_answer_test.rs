//! 영향 평가 답변 검증 테스트
//!
//! 테스트 대상:
//! - rating 답변: 1~5 정수만 허용
//! - yes_no 답변: boolean만 허용
//! - ImpactAssessmentRequest 유효성 검증

use qms_server::domain::impact::dto::ImpactAssessmentRequest;
use qms_server::domain::impact::service::{validate_answer, AnswerValue};
use qms_server::domain::question::entity::question::ResponseKind;
use serde_json::json;
use validator::Validate;

// ============== rating 검증 ==============

#[test]
fn should_accept_rating_3() {
    // Arrange & Act
    let result = validate_answer(ResponseKind::Rating, &json!(3)).unwrap();

    // Assert
    assert_eq!(result, AnswerValue::Rating(3));
}

#[test]
fn should_reject_rating_6() {
    let result = validate_answer(ResponseKind::Rating, &json!(6));
    assert!(result.is_err());
}

#[test]
fn should_reject_rating_below_1() {
    assert!(validate_answer(ResponseKind::Rating, &json!(0)).is_err());
    assert!(validate_answer(ResponseKind::Rating, &json!(-1)).is_err());
}

#[test]
fn should_reject_non_integer_rating() {
    assert!(validate_answer(ResponseKind::Rating, &json!("3")).is_err());
    assert!(validate_answer(ResponseKind::Rating, &json!(2.5)).is_err());
    assert!(validate_answer(ResponseKind::Rating, &json!(true)).is_err());
}

// ============== yes_no 검증 ==============

#[test]
fn should_accept_boolean_true() {
    let result = validate_answer(ResponseKind::YesNo, &json!(true)).unwrap();
    assert_eq!(result, AnswerValue::YesNo(true));
}

#[test]
fn should_reject_string_true() {
    // 문자열 "true"는 boolean이 아니므로 거부
    let result = validate_answer(ResponseKind::YesNo, &json!("true"));
    assert!(result.is_err());
}

#[test]
fn should_reject_numeric_yes_no() {
    assert!(validate_answer(ResponseKind::YesNo, &json!(1)).is_err());
    assert!(validate_answer(ResponseKind::YesNo, &json!(0)).is_err());
}

// ============== 요청 본문 검증 ==============

#[test]
fn should_fail_validation_when_answers_empty() {
    // Arrange
    let req: ImpactAssessmentRequest = serde_json::from_value(json!({
        "answers": [],
        "remarks": null
    }))
    .unwrap();

    // Act & Assert
    assert!(req.validate().is_err());
}

#[test]
fn should_deserialize_answers_in_camel_case() {
    let req: ImpactAssessmentRequest = serde_json::from_value(json!({
        "answers": [
            { "questionId": 1, "answer": true, "comment": "영향 없음" },
            { "questionId": 2, "answer": 4 }
        ],
        "remarks": "1차 평가"
    }))
    .unwrap();

    assert!(req.validate().is_ok());
    assert_eq!(req.answers.len(), 2);
    assert_eq!(req.answers[0].question_id, 1);
    assert_eq!(req.answers[1].answer, json!(4));
}
