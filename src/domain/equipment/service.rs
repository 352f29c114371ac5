use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::domain::location::entity::location;
use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{EquipmentRequest, EquipmentResponse};
use super::entity::equipment;

pub struct EquipmentService;

impl EquipmentService {
    pub async fn create(
        state: AppState,
        req: EquipmentRequest,
    ) -> Result<EquipmentResponse, AppError> {
        // 장소를 지정했다면 존재 확인
        if let Some(location_id) = req.location_id {
            let exists = location::Entity::find_by_id(location_id)
                .one(&state.db)
                .await?;
            if exists.is_none() {
                return Err(AppError::NotFound("존재하지 않는 장소입니다.".to_string()));
            }
        }

        let model = equipment::ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            location_id: Set(req.location_id),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;
        Ok(inserted.into())
    }

    pub async fn list(state: AppState) -> Result<Vec<EquipmentResponse>, AppError> {
        let rows = equipment::Entity::find()
            .order_by_asc(equipment::Column::EquipmentId)
            .all(&state.db)
            .await?;

        Ok(rows.into_iter().map(|e| e.into()).collect())
    }

    pub async fn get(state: AppState, equipment_id: i64) -> Result<EquipmentResponse, AppError> {
        let model = equipment::Entity::find_by_id(equipment_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 설비입니다.".to_string()))?;

        Ok(model.into())
    }

    pub async fn update(
        state: AppState,
        equipment_id: i64,
        req: EquipmentRequest,
    ) -> Result<EquipmentResponse, AppError> {
        let model = equipment::Entity::find_by_id(equipment_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 설비입니다.".to_string()))?;

        let mut active: equipment::ActiveModel = model.into();
        active.name = Set(req.name);
        active.code = Set(req.code);
        active.location_id = Set(req.location_id);

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete(state: AppState, equipment_id: i64) -> Result<(), AppError> {
        let result = equipment::Entity::delete_by_id(equipment_id)
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 설비입니다.".to_string()));
        }
        Ok(())
    }
}
