use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{RoleRequest, RoleResponse};
use super::entity::role;

pub struct RoleService;

impl RoleService {
    pub async fn create(state: AppState, req: RoleRequest) -> Result<RoleResponse, AppError> {
        // 이름 중복 확인
        let exists = role::Entity::find()
            .filter(role::Column::Name.eq(&req.name))
            .one(&state.db)
            .await?;

        if exists.is_some() {
            return Err(AppError::Conflict(
                "이미 존재하는 역할 이름입니다.".to_string(),
            ));
        }

        let now = Utc::now().naive_utc();
        let model = role::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;
        Ok(inserted.into())
    }

    pub async fn list(state: AppState) -> Result<Vec<RoleResponse>, AppError> {
        let roles = role::Entity::find()
            .order_by_asc(role::Column::RoleId)
            .all(&state.db)
            .await?;

        Ok(roles.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get(state: AppState, role_id: i64) -> Result<RoleResponse, AppError> {
        let model = role::Entity::find_by_id(role_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 역할입니다.".to_string()))?;

        Ok(model.into())
    }

    pub async fn update(
        state: AppState,
        role_id: i64,
        req: RoleRequest,
    ) -> Result<RoleResponse, AppError> {
        let model = role::Entity::find_by_id(role_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 역할입니다.".to_string()))?;

        let mut active: role::ActiveModel = model.into();
        active.name = Set(req.name);
        active.description = Set(req.description);

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete(state: AppState, role_id: i64) -> Result<(), AppError> {
        let result = role::Entity::delete_by_id(role_id).exec(&state.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 역할입니다.".to_string()));
        }
        Ok(())
    }
}
