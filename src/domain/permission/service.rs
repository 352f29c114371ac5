use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::domain::role::entity::role;
use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{
    PermissionRequest, PermissionResponse, RolePermissionRequest, RolePermissionResponse,
};
use super::entity::{permission, role_permission};

pub struct PermissionService;

impl PermissionService {
    pub async fn create(
        state: AppState,
        req: PermissionRequest,
    ) -> Result<PermissionResponse, AppError> {
        let exists = permission::Entity::find()
            .filter(permission::Column::Name.eq(&req.name))
            .one(&state.db)
            .await?;

        if exists.is_some() {
            return Err(AppError::Conflict(
                "이미 존재하는 권한 이름입니다.".to_string(),
            ));
        }

        let model = permission::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;
        Ok(inserted.into())
    }

    pub async fn list(state: AppState) -> Result<Vec<PermissionResponse>, AppError> {
        let permissions = permission::Entity::find()
            .order_by_asc(permission::Column::PermissionId)
            .all(&state.db)
            .await?;

        Ok(permissions.into_iter().map(|p| p.into()).collect())
    }

    pub async fn delete(state: AppState, permission_id: i64) -> Result<(), AppError> {
        let result = permission::Entity::delete_by_id(permission_id)
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 권한입니다.".to_string()));
        }
        Ok(())
    }

    /// 역할에 권한을 연결합니다.
    pub async fn assign(
        state: AppState,
        req: RolePermissionRequest,
    ) -> Result<RolePermissionResponse, AppError> {
        // 1. 역할/권한 존재 확인
        let role_exists = role::Entity::find_by_id(req.role_id).one(&state.db).await?;
        if role_exists.is_none() {
            return Err(AppError::NotFound("존재하지 않는 역할입니다.".to_string()));
        }

        let permission_exists = permission::Entity::find_by_id(req.permission_id)
            .one(&state.db)
            .await?;
        if permission_exists.is_none() {
            return Err(AppError::NotFound("존재하지 않는 권한입니다.".to_string()));
        }

        // 2. 중복 연결 확인
        let duplicated = role_permission::Entity::find()
            .filter(role_permission::Column::RoleId.eq(req.role_id))
            .filter(role_permission::Column::PermissionId.eq(req.permission_id))
            .one(&state.db)
            .await?;

        if duplicated.is_some() {
            return Err(AppError::Conflict(
                "이미 연결된 역할-권한입니다.".to_string(),
            ));
        }

        let model = role_permission::ActiveModel {
            role_id: Set(req.role_id),
            permission_id: Set(req.permission_id),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;
        Ok(inserted.into())
    }

    /// 역할에 연결된 권한 목록을 조회합니다.
    pub async fn list_for_role(
        state: AppState,
        role_id: i64,
    ) -> Result<Vec<PermissionResponse>, AppError> {
        let links = role_permission::Entity::find()
            .filter(role_permission::Column::RoleId.eq(role_id))
            .all(&state.db)
            .await?;

        let permission_ids: Vec<i64> = links.iter().map(|l| l.permission_id).collect();
        if permission_ids.is_empty() {
            return Ok(vec![]);
        }

        let permissions = permission::Entity::find()
            .filter(permission::Column::PermissionId.is_in(permission_ids))
            .order_by_asc(permission::Column::PermissionId)
            .all(&state.db)
            .await?;

        Ok(permissions.into_iter().map(|p| p.into()).collect())
    }

    /// 역할-권한 연결을 해제합니다.
    pub async fn unassign(state: AppState, role_permission_id: i64) -> Result<(), AppError> {
        let result = role_permission::Entity::delete_by_id(role_permission_id)
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(
                "존재하지 않는 역할-권한 연결입니다.".to_string(),
            ));
        }
        Ok(())
    }
}
