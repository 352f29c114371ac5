use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::department;

/// 부서 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCreateRequest {
    #[validate(length(min = 1, max = 100, message = "부서 이름은 1~100자여야 합니다."))]
    pub name: String,
    /// QA 부서 여부 (기본 false)
    #[serde(default)]
    pub is_qa: bool,
}

/// 부서 수정 요청 (접두어는 불변이므로 이름/QA 여부만 허용)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentUpdateRequest {
    #[validate(length(min = 1, max = 100, message = "부서 이름은 1~100자여야 합니다."))]
    pub name: String,
    pub is_qa: bool,
}

/// 부서 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentResponse {
    pub department_id: i64,
    pub name: String,
    pub prefix: String,
    pub is_qa: bool,
    pub created_at: String,
}

impl From<department::Model> for DepartmentResponse {
    fn from(model: department::Model) -> Self {
        Self {
            department_id: model.department_id,
            name: model.name,
            prefix: model.prefix,
            is_qa: model.is_qa,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
