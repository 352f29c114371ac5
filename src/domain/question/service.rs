use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{QuestionRequest, QuestionResponse};
use super::entity::question;

pub struct QuestionService;

impl QuestionService {
    pub async fn create(state: AppState, req: QuestionRequest) -> Result<QuestionResponse, AppError> {
        let model = question::ActiveModel {
            text: Set(req.text),
            response_kind: Set(req.response_kind),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;
        Ok(inserted.into())
    }

    pub async fn list(state: AppState) -> Result<Vec<QuestionResponse>, AppError> {
        let questions = question::Entity::find()
            .order_by_asc(question::Column::QuestionId)
            .all(&state.db)
            .await?;

        Ok(questions.into_iter().map(|q| q.into()).collect())
    }

    pub async fn get(state: AppState, question_id: i64) -> Result<QuestionResponse, AppError> {
        let model = question::Entity::find_by_id(question_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 질문입니다.".to_string()))?;

        Ok(model.into())
    }

    pub async fn update(
        state: AppState,
        question_id: i64,
        req: QuestionRequest,
    ) -> Result<QuestionResponse, AppError> {
        let model = question::Entity::find_by_id(question_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 질문입니다.".to_string()))?;

        let mut active: question::ActiveModel = model.into();
        active.text = Set(req.text);
        active.response_kind = Set(req.response_kind);

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete(state: AppState, question_id: i64) -> Result<(), AppError> {
        let result = question::Entity::delete_by_id(question_id)
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 질문입니다.".to_string()));
        }
        Ok(())
    }
}
