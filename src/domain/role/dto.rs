use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::role;

/// 역할 생성/수정 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    #[validate(length(min = 1, max = 50, message = "역할 이름은 1~50자여야 합니다."))]
    pub name: String,
    #[validate(length(max = 255, message = "설명은 최대 255자까지 허용됩니다."))]
    pub description: Option<String>,
}

/// 역할 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub role_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<role::Model> for RoleResponse {
    fn from(model: role::Model) -> Self {
        Self {
            role_id: model.role_id,
            name: model.name,
            description: model.description,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
