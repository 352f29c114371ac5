use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::workflow::WorkflowStatus;

use super::entity::deviation::{self, ItemKind};
use super::entity::deviation_category;

/// 영향 품목 (제품/자재/설비 구분 합집합)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum AffectedItem {
    Product { name: String },
    Material { name: String },
    Equipment { equipment_id: i64 },
}

impl AffectedItem {
    /// 저장용 (종류, 식별자) 분해
    pub fn into_columns(self) -> (ItemKind, String) {
        match self {
            AffectedItem::Product { name } => (ItemKind::Product, name),
            AffectedItem::Material { name } => (ItemKind::Material, name),
            AffectedItem::Equipment { equipment_id } => {
                (ItemKind::Equipment, equipment_id.to_string())
            }
        }
    }
}

/// 일탈 분류 카테고리 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviationCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "카테고리 이름은 1~100자여야 합니다."))]
    pub name: String,
    #[validate(length(max = 255, message = "설명은 최대 255자까지 허용됩니다."))]
    pub description: Option<String>,
}

/// 일탈 분류 카테고리 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviationCategoryResponse {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<deviation_category::Model> for DeviationCategoryResponse {
    fn from(model: deviation_category::Model) -> Self {
        Self {
            category_id: model.category_id,
            name: model.name,
            description: model.description,
        }
    }
}

/// 일탈 생성 요청 (multipart `data` 파트의 JSON)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviationCreateRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다."))]
    pub title: String,
    #[validate(length(min = 1, message = "상세 내용을 입력해주세요."))]
    pub description: String,
    #[validate(range(min = 1, message = "departmentId는 1 이상이어야 합니다."))]
    pub department_id: i64,
    pub category_id: Option<i64>,
    pub location_id: Option<i64>,
    pub equipment_id: Option<i64>,
    /// 계획된 일탈 여부 (기본 false)
    #[serde(default)]
    pub planned: bool,
    #[serde(default)]
    pub gmp_relevant: bool,
    pub affected_item: Option<AffectedItem>,
    pub governing_document_id: Option<i64>,
    pub immediate_actions: Option<String>,
}

/// 일탈 목록 조회 파라미터
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviationQueryParams {
    pub department_id: Option<i64>,
    pub status: Option<WorkflowStatus>,
}

/// 일탈 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviationResponse {
    pub deviation_id: i64,
    pub deviation_number: String,
    pub department_id: i64,
    pub category_id: Option<i64>,
    pub location_id: Option<i64>,
    pub equipment_id: Option<i64>,
    pub planned: bool,
    pub gmp_relevant: bool,
    pub item_kind: Option<ItemKind>,
    pub item_ref: Option<String>,
    pub governing_document_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub immediate_actions: Option<String>,
    pub status: WorkflowStatus,
    pub created_by: i64,
    pub submitted_by: Option<i64>,
    pub reviewed_by: Option<i64>,
    pub review_comments: Option<String>,
    pub qa_reviewer: Option<i64>,
    pub qa_comments: Option<String>,
    pub investigation_team_id: Option<i64>,
    pub impact_assessment_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<deviation::Model> for DeviationResponse {
    fn from(model: deviation::Model) -> Self {
        Self {
            deviation_id: model.deviation_id,
            deviation_number: model.deviation_number,
            department_id: model.department_id,
            category_id: model.category_id,
            location_id: model.location_id,
            equipment_id: model.equipment_id,
            planned: model.planned,
            gmp_relevant: model.gmp_relevant,
            item_kind: model.item_kind,
            item_ref: model.item_ref,
            governing_document_id: model.governing_document_id,
            title: model.title,
            description: model.description,
            immediate_actions: model.immediate_actions,
            status: model.status,
            created_by: model.created_by,
            submitted_by: model.submitted_by,
            reviewed_by: model.reviewed_by,
            review_comments: model.review_comments,
            qa_reviewer: model.qa_reviewer,
            qa_comments: model.qa_comments,
            investigation_team_id: model.investigation_team_id,
            impact_assessment_id: model.impact_assessment_id,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: model.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
