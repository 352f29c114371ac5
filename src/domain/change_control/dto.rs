use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::deviation::dto::AffectedItem;
use crate::domain::deviation::entity::deviation::ItemKind;
use crate::workflow::WorkflowStatus;

use super::entity::change_category;
use super::entity::change_control::{self, ChangeClass, Permanence};
use super::entity::historical_check;

/// 변경 분류 카테고리 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCategoryRequest {
    #[validate(length(min = 1, max = 100, message = "카테고리 이름은 1~100자여야 합니다."))]
    pub name: String,
    #[validate(length(max = 255, message = "설명은 최대 255자까지 허용됩니다."))]
    pub description: Option<String>,
}

/// 변경 분류 카테고리 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCategoryResponse {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<change_category::Model> for ChangeCategoryResponse {
    fn from(model: change_category::Model) -> Self {
        Self {
            category_id: model.category_id,
            name: model.name,
            description: model.description,
        }
    }
}

/// 변경 관리 생성 요청 (multipart `data` 파트의 JSON)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeControlCreateRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다."))]
    pub title: String,
    #[validate(length(min = 1, message = "상세 내용을 입력해주세요."))]
    pub description: String,
    #[validate(range(min = 1, message = "departmentId는 1 이상이어야 합니다."))]
    pub department_id: i64,
    pub category_id: Option<i64>,
    pub classification: ChangeClass,
    pub permanence: Permanence,
    pub affected_item: Option<AffectedItem>,
    pub document_id: Option<i64>,
    pub location_id: Option<i64>,
    pub similar_changes: Option<String>,
    #[validate(range(min = 0, max = 100, message = "riskScore는 0~100 범위여야 합니다."))]
    pub risk_score: Option<i32>,
    pub implementation_timeline: Option<String>,
}

/// 변경 관리 목록 조회 파라미터
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeControlQueryParams {
    pub department_id: Option<i64>,
    pub capa_id: Option<i64>,
    pub status: Option<WorkflowStatus>,
}

/// 과거 이력 점검 기록 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalCheckRequest {
    #[validate(length(min = 1, message = "점검 요약을 입력해주세요."))]
    pub summary: String,
    pub similar_references: Option<String>,
}

/// 과거 이력 점검 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalCheckResponse {
    pub check_id: i64,
    pub change_control_id: i64,
    pub checked_by: i64,
    pub similar_references: Option<String>,
    pub summary: String,
    pub created_at: String,
}

impl From<historical_check::Model> for HistoricalCheckResponse {
    fn from(model: historical_check::Model) -> Self {
        Self {
            check_id: model.check_id,
            change_control_id: model.change_control_id,
            checked_by: model.checked_by,
            similar_references: model.similar_references,
            summary: model.summary,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 변경 관리 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeControlResponse {
    pub change_control_id: i64,
    pub change_number: String,
    pub department_id: i64,
    pub category_id: Option<i64>,
    pub capa_id: Option<i64>,
    pub classification: ChangeClass,
    pub permanence: Permanence,
    pub item_kind: Option<ItemKind>,
    pub item_ref: Option<String>,
    pub document_id: Option<i64>,
    pub location_id: Option<i64>,
    pub similar_changes: Option<String>,
    pub risk_score: Option<i32>,
    pub implementation_timeline: Option<String>,
    pub title: String,
    pub description: String,
    pub status: WorkflowStatus,
    pub created_by: i64,
    pub submitted_by: Option<i64>,
    pub reviewed_by: Option<i64>,
    pub review_comments: Option<String>,
    pub qa_reviewer: Option<i64>,
    pub qa_comments: Option<String>,
    pub investigation_team_id: Option<i64>,
    pub impact_assessment_id: Option<i64>,
    pub acknowledged_by: Option<i64>,
    pub closed_by: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<change_control::Model> for ChangeControlResponse {
    fn from(model: change_control::Model) -> Self {
        Self {
            change_control_id: model.change_control_id,
            change_number: model.change_number,
            department_id: model.department_id,
            category_id: model.category_id,
            capa_id: model.capa_id,
            classification: model.classification,
            permanence: model.permanence,
            item_kind: model.item_kind,
            item_ref: model.item_ref,
            document_id: model.document_id,
            location_id: model.location_id,
            similar_changes: model.similar_changes,
            risk_score: model.risk_score,
            implementation_timeline: model.implementation_timeline,
            title: model.title,
            description: model.description,
            status: model.status,
            created_by: model.created_by,
            submitted_by: model.submitted_by,
            reviewed_by: model.reviewed_by,
            review_comments: model.review_comments,
            qa_reviewer: model.qa_reviewer,
            qa_comments: model.qa_comments,
            investigation_team_id: model.investigation_team_id,
            impact_assessment_id: model.impact_assessment_id,
            acknowledged_by: model.acknowledged_by,
            closed_by: model.closed_by,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: model.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
