use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{LocationRequest, LocationResponse};
use super::entity::location;

pub struct LocationService;

impl LocationService {
    pub async fn create(state: AppState, req: LocationRequest) -> Result<LocationResponse, AppError> {
        let model = location::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;
        Ok(inserted.into())
    }

    pub async fn list(state: AppState) -> Result<Vec<LocationResponse>, AppError> {
        let locations = location::Entity::find()
            .order_by_asc(location::Column::LocationId)
            .all(&state.db)
            .await?;

        Ok(locations.into_iter().map(|l| l.into()).collect())
    }

    pub async fn get(state: AppState, location_id: i64) -> Result<LocationResponse, AppError> {
        let model = location::Entity::find_by_id(location_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 장소입니다.".to_string()))?;

        Ok(model.into())
    }

    pub async fn update(
        state: AppState,
        location_id: i64,
        req: LocationRequest,
    ) -> Result<LocationResponse, AppError> {
        let model = location::Entity::find_by_id(location_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 장소입니다.".to_string()))?;

        let mut active: location::ActiveModel = model.into();
        active.name = Set(req.name);
        active.description = Set(req.description);

        let updated = active.update(&state.db).await?;
        Ok(updated.into())
    }

    pub async fn delete(state: AppState, location_id: i64) -> Result<(), AppError> {
        let result = location::Entity::delete_by_id(location_id)
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("존재하지 않는 장소입니다.".to_string()));
        }
        Ok(())
    }
}
