use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::location;

/// 장소 생성/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    #[validate(length(min = 1, max = 100, message = "장소 이름은 1~100자여야 합니다."))]
    pub name: String,
    #[validate(length(max = 255, message = "설명은 최대 255자까지 허용됩니다."))]
    pub description: Option<String>,
}

/// 장소 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub location_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<location::Model> for LocationResponse {
    fn from(model: location::Model) -> Self {
        Self {
            location_id: model.location_id,
            name: model.name,
            description: model.description,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
