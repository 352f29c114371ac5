use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::change_control::entity::change_control::{ChangeClass, Permanence};
use crate::domain::impact::dto::ImpactAnswerItem;
use crate::workflow::WorkflowStatus;

use super::entity::capa;

/// CAPA 생성 요청 (multipart `data` 파트의 JSON)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CapaCreateRequest {
    #[validate(range(min = 1, message = "deviationId는 1 이상이어야 합니다."))]
    pub deviation_id: i64,
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다."))]
    pub title: String,
    #[validate(length(min = 1, message = "상세 내용을 입력해주세요."))]
    pub description: String,
    pub root_cause: Option<String>,
    pub corrective_action: Option<String>,
    pub preventive_action: Option<String>,
}

/// CAPA 목록 조회 파라미터
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CapaQueryParams {
    pub deviation_id: Option<i64>,
    pub department_id: Option<i64>,
    pub status: Option<WorkflowStatus>,
}

/// 조사 결과 기록 요청
///
/// answers를 포함하면 조사 질문지(CAPA 영향 평가)가 함께 기록됩니다.
/// 답변 유형 검증은 일탈/변경 관리의 영향 평가와 동일합니다.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationRecordRequest {
    #[validate(length(min = 1, message = "조사 요약을 입력해주세요."))]
    pub summary: String,
    pub root_cause: Option<String>,
    #[serde(default)]
    pub answers: Vec<ImpactAnswerItem>,
}

/// 즉시 조치 착수 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImmediateActionsRequest {
    #[validate(length(min = 1, message = "시정 조치 내용을 입력해주세요."))]
    pub corrective_action: String,
    pub preventive_action: Option<String>,
}

/// CAPA발 변경 관리 개시 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitiateChangeControlRequest {
    #[validate(length(min = 1, max = 200, message = "제목은 1~200자여야 합니다."))]
    pub title: String,
    #[validate(length(min = 1, message = "상세 내용을 입력해주세요."))]
    pub description: String,
    pub category_id: Option<i64>,
    pub classification: ChangeClass,
    pub permanence: Permanence,
}

/// CAPA 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CapaResponse {
    pub capa_id: i64,
    pub capa_number: String,
    pub deviation_id: i64,
    pub department_id: i64,
    pub title: String,
    pub description: String,
    pub root_cause: Option<String>,
    pub corrective_action: Option<String>,
    pub preventive_action: Option<String>,
    pub investigation_summary: Option<String>,
    pub change_control_id: Option<i64>,
    pub status: WorkflowStatus,
    pub created_by: i64,
    pub submitted_by: Option<i64>,
    pub reviewed_by: Option<i64>,
    pub review_comments: Option<String>,
    pub qa_reviewer: Option<i64>,
    pub qa_comments: Option<String>,
    pub investigation_team_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<capa::Model> for CapaResponse {
    fn from(model: capa::Model) -> Self {
        Self {
            capa_id: model.capa_id,
            capa_number: model.capa_number,
            deviation_id: model.deviation_id,
            department_id: model.department_id,
            title: model.title,
            description: model.description,
            root_cause: model.root_cause,
            corrective_action: model.corrective_action,
            preventive_action: model.preventive_action,
            investigation_summary: model.investigation_summary,
            change_control_id: model.change_control_id,
            status: model.status,
            created_by: model.created_by,
            submitted_by: model.submitted_by,
            reviewed_by: model.reviewed_by,
            review_comments: model.review_comments,
            qa_reviewer: model.qa_reviewer,
            qa_comments: model.qa_comments,
            investigation_team_id: model.investigation_team_id,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            updated_at: model.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
