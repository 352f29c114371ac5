use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::workflow::WorkflowKind;

use super::entity::investigation_team;

/// 조사팀 구성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationTeamRequest {
    #[validate(length(min = 1, message = "조사팀 구성원이 최소 1명 필요합니다."))]
    pub member_ids: Vec<i64>,
    #[validate(length(max = 500, message = "비고는 최대 500자까지 허용됩니다."))]
    pub remarks: Option<String>,
}

/// 조사팀 구성원 교체 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembersUpdateRequest {
    #[validate(length(min = 1, message = "조사팀 구성원이 최소 1명 필요합니다."))]
    pub member_ids: Vec<i64>,
}

/// 조사팀 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvestigationTeamResponse {
    pub team_id: i64,
    pub parent_kind: WorkflowKind,
    pub parent_id: i64,
    pub created_by: i64,
    pub remarks: Option<String>,
    pub member_ids: Vec<i64>,
    pub created_at: String,
}

impl InvestigationTeamResponse {
    pub fn from_model(model: investigation_team::Model, member_ids: Vec<i64>) -> Self {
        Self {
            team_id: model.team_id,
            parent_kind: model.parent_kind,
            parent_id: model.parent_id,
            created_by: model.created_by,
            remarks: model.remarks,
            member_ids,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
