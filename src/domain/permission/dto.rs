use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::{permission, role_permission};

/// 권한 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRequest {
    #[validate(length(min = 1, max = 100, message = "권한 이름은 1~100자여야 합니다."))]
    pub name: String,
    #[validate(length(max = 255, message = "설명은 최대 255자까지 허용됩니다."))]
    pub description: Option<String>,
}

/// 권한 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    pub permission_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl From<permission::Model> for PermissionResponse {
    fn from(model: permission::Model) -> Self {
        Self {
            permission_id: model.permission_id,
            name: model.name,
            description: model.description,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 역할-권한 연결 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionRequest {
    #[validate(range(min = 1, message = "roleId는 1 이상이어야 합니다."))]
    pub role_id: i64,
    #[validate(range(min = 1, message = "permissionId는 1 이상이어야 합니다."))]
    pub permission_id: i64,
}

/// 역할-권한 연결 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionResponse {
    pub role_permission_id: i64,
    pub role_id: i64,
    pub permission_id: i64,
}

impl From<role_permission::Model> for RolePermissionResponse {
    fn from(model: role_permission::Model) -> Self {
        Self {
            role_permission_id: model.role_permission_id,
            role_id: model.role_id,
            permission_id: model.permission_id,
        }
    }
}
