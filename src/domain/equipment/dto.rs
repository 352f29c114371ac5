use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::equipment;

/// 설비 생성/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRequest {
    #[validate(length(min = 1, max = 100, message = "설비 이름은 1~100자여야 합니다."))]
    pub name: String,
    #[validate(length(max = 50, message = "설비 코드는 최대 50자까지 허용됩니다."))]
    pub code: Option<String>,
    pub location_id: Option<i64>,
}

/// 설비 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentResponse {
    pub equipment_id: i64,
    pub name: String,
    pub code: Option<String>,
    pub location_id: Option<i64>,
    pub created_at: String,
}

impl From<equipment::Model> for EquipmentResponse {
    fn from(model: equipment::Model) -> Self {
        Self {
            equipment_id: model.equipment_id,
            name: model.name,
            code: model.code,
            location_id: model.location_id,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
