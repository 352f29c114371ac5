use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::domain::question::entity::question::{self, ResponseKind};
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::workflow::WorkflowKind;

use super::dto::{ImpactAnswerItem, ImpactAssessmentRequest, ImpactAssessmentResponse};
use super::entity::{impact_answer, impact_assessment};

/// 유형 검증을 통과한 답변 값
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerValue {
    YesNo(bool),
    Rating(i16),
}

/// 원시 JSON 답변을 질문의 응답 유형에 맞게 검증합니다.
///
/// rating은 1~5 정수만, yes_no는 boolean만 허용합니다. 문자열 "true"나
/// 실수 3.0 같은 유사 값은 거부합니다.
pub fn validate_answer(
    kind: ResponseKind,
    raw: &serde_json::Value,
) -> Result<AnswerValue, AppError> {
    match kind {
        ResponseKind::YesNo => match raw {
            serde_json::Value::Bool(b) => Ok(AnswerValue::YesNo(*b)),
            _ => Err(AppError::BadRequest(
                "yes_no 질문의 답변은 boolean이어야 합니다.".to_string(),
            )),
        },
        ResponseKind::Rating => {
            // as_i64는 3.5, "3", true 모두에 None을 반환한다 (정수만 통과)
            let n = raw.as_i64().ok_or_else(|| {
                AppError::BadRequest("rating 질문의 답변은 정수여야 합니다.".to_string())
            })?;
            if !(1..=5).contains(&n) {
                return Err(AppError::BadRequest(
                    "rating 답변은 1~5 범위여야 합니다.".to_string(),
                ));
            }
            Ok(AnswerValue::Rating(n as i16))
        }
    }
}

pub struct ImpactService;

impl ImpactService {
    /// 상위 엔터티의 트랜잭션 안에서 영향 평가와 답변 행을 기록합니다.
    ///
    /// 답변 하나라도 유형이 맞지 않으면 아무 행도 쓰지 않고 전체를 거부합니다.
    /// 세 워크플로우 종류 모두 동일한 검증을 거칩니다.
    pub async fn record_for_parent(
        txn: &DatabaseTransaction,
        kind: WorkflowKind,
        parent_id: i64,
        recorded_by: i64,
        req: ImpactAssessmentRequest,
    ) -> Result<impact_assessment::Model, AppError> {
        // 1. 질문 일괄 조회
        let question_ids: Vec<i64> = req.answers.iter().map(|a| a.question_id).collect();
        let questions = question::Entity::find()
            .filter(question::Column::QuestionId.is_in(question_ids.clone()))
            .all(txn)
            .await?;

        // 2. 전체 답변 선검증 (쓰기 전에 실패 확정)
        let mut validated: Vec<(&ImpactAnswerItem, AnswerValue)> =
            Vec::with_capacity(req.answers.len());
        for item in &req.answers {
            let question_model = questions
                .iter()
                .find(|q| q.question_id == item.question_id)
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "존재하지 않는 질문입니다: {}",
                        item.question_id
                    ))
                })?;

            let value = validate_answer(question_model.response_kind, &item.answer)?;
            validated.push((item, value));
        }

        // 3. 평가 + 답변 기록
        let now = Utc::now().naive_utc();
        let assessment = impact_assessment::ActiveModel {
            parent_kind: Set(kind),
            parent_id: Set(parent_id),
            recorded_by: Set(recorded_by),
            remarks: Set(req.remarks.clone()),
            created_at: Set(now),
            ..Default::default()
        };
        let assessment_model = assessment.insert(txn).await?;

        for (item, value) in validated {
            let (yes_no, rating) = match value {
                AnswerValue::YesNo(b) => (Some(b), None),
                AnswerValue::Rating(r) => (None, Some(r)),
            };

            let answer = impact_answer::ActiveModel {
                impact_id: Set(assessment_model.impact_id),
                question_id: Set(item.question_id),
                yes_no: Set(yes_no),
                rating: Set(rating),
                comment: Set(item.comment.clone()),
                created_at: Set(now),
                ..Default::default()
            };
            answer.insert(txn).await?;
        }

        info!(
            impact_id = assessment_model.impact_id,
            parent_id = parent_id,
            answer_count = req.answers.len(),
            "impact assessment recorded"
        );

        Ok(assessment_model)
    }

    /// 상위 엔터티의 영향 평가 조회
    pub async fn get_for_parent(
        state: AppState,
        kind: WorkflowKind,
        parent_id: i64,
    ) -> Result<ImpactAssessmentResponse, AppError> {
        let assessment_model = impact_assessment::Entity::find()
            .filter(impact_assessment::Column::ParentKind.eq(kind))
            .filter(impact_assessment::Column::ParentId.eq(parent_id))
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("기록된 영향 평가가 없습니다.".to_string())
            })?;

        let answers = impact_answer::Entity::find()
            .filter(impact_answer::Column::ImpactId.eq(assessment_model.impact_id))
            .order_by_asc(impact_answer::Column::AnswerId)
            .all(&state.db)
            .await?;

        Ok(ImpactAssessmentResponse::from_model(
            assessment_model,
            answers,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rating_accepts_integers_in_range() {
        for n in 1..=5 {
            let result = validate_answer(ResponseKind::Rating, &json!(n)).unwrap();
            assert_eq!(result, AnswerValue::Rating(n as i16));
        }
    }

    #[test]
    fn rating_rejects_out_of_range() {
        assert!(validate_answer(ResponseKind::Rating, &json!(0)).is_err());
        assert!(validate_answer(ResponseKind::Rating, &json!(6)).is_err());
        assert!(validate_answer(ResponseKind::Rating, &json!(-3)).is_err());
    }

    #[test]
    fn rating_rejects_non_integers() {
        assert!(validate_answer(ResponseKind::Rating, &json!("3")).is_err());
        assert!(validate_answer(ResponseKind::Rating, &json!(3.5)).is_err());
        assert!(validate_answer(ResponseKind::Rating, &json!(true)).is_err());
        assert!(validate_answer(ResponseKind::Rating, &json!(null)).is_err());
    }

    #[test]
    fn yes_no_accepts_booleans_only() {
        assert_eq!(
            validate_answer(ResponseKind::YesNo, &json!(true)).unwrap(),
            AnswerValue::YesNo(true)
        );
        assert_eq!(
            validate_answer(ResponseKind::YesNo, &json!(false)).unwrap(),
            AnswerValue::YesNo(false)
        );
    }

    #[test]
    fn yes_no_rejects_string_true() {
        assert!(validate_answer(ResponseKind::YesNo, &json!("true")).is_err());
        assert!(validate_answer(ResponseKind::YesNo, &json!(1)).is_err());
        assert!(validate_answer(ResponseKind::YesNo, &json!(null)).is_err());
    }
}
