use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::refnum;

use super::dto::{DepartmentCreateRequest, DepartmentResponse, DepartmentUpdateRequest};
use super::entity::department;

pub struct DepartmentService;

impl DepartmentService {
    pub async fn create(
        state: AppState,
        req: DepartmentCreateRequest,
    ) -> Result<DepartmentResponse, AppError> {
        // 1. 이름 중복 확인
        let exists = department::Entity::find()
            .filter(department::Column::Name.eq(&req.name))
            .one(&state.db)
            .await?;

        if exists.is_some() {
            return Err(AppError::Conflict(
                "이미 존재하는 부서 이름입니다.".to_string(),
            ));
        }

        // 2. 접두어 유도. 앞 3글자가 이미 다른 부서에 쓰이면 3자리 숫자를 붙여 구분
        let base = refnum::department_prefix(&req.name);
        if base.is_empty() {
            return Err(AppError::BadRequest(
                "부서 이름에 접두어로 쓸 알파벳이 필요합니다.".to_string(),
            ));
        }

        let prefix = if Self::prefix_taken(&state, &base).await? {
            let mut candidate = refnum::disambiguated_prefix(&base);
            // 임의 접미사끼리 충돌하는 드문 경우 재시도
            while Self::prefix_taken(&state, &candidate).await? {
                candidate = refnum::disambiguated_prefix(&base);
            }
            candidate
        } else {
            base
        };

        let now = Utc::now().naive_utc();
        let model = department::ActiveModel {
            name: Set(req.name),
            prefix: Set(prefix.clone()),
            is_qa: Set(req.is_qa),
            created_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;

        info!(
            department_id = inserted.department_id,
            prefix = %prefix,
            "department created"
        );

        Ok(inserted.into())
    }

    async fn prefix_taken(state: &AppState, prefix: &str) -> Result<bool, AppError> {
        let existing = department::Entity::find()
            .filter(department::Column::Prefix.eq(prefix))
            .one(&state.db)
            .await?;
        Ok(existing.is_some())
    }

    pub async fn list(state: AppState) -> Result<Vec<DepartmentResponse>, AppError> {
        let departments = department::Entity::find()
            .order_by_asc(department::Column::DepartmentId)
            .all(&state.db)
            .await?;

        Ok(departments.into_iter().map(|d| d.into()).collect())
    }

    pub async fn get(state: AppState, department_id: i64) -> Result<DepartmentResponse, AppError> {
        let model = department::Entity::find_by_id(department_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 부서입니다.".to_string()))?;

        Ok(model.into())
    }

    pub async fn update(
        state: AppState,
        department_id: i64,
        req: DepartmentUpdateRequest,
    ) -> Result<DepartmentResponse, AppError> {
        let model = department::Entity::find_by_id(department_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 부서입니다.".to_string()))?;

        // 접두어는 이미 발급된 참조 번호와 묶여 있어 변경하지 않는다
        let mut active: department::ActiveModel = model.into();
        active.name = Set(req.name);
        active.is_qa = Set(req.is_qa);

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete(state: AppState, department_id: i64) -> Result<(), AppError> {
        let result = department::Entity::delete_by_id(department_id)
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 부서입니다.".to_string()));
        }
        Ok(())
    }
}
