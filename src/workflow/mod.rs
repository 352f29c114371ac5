//! 워크플로우 상태 기계
//!
//! Deviation / CAPA / ChangeControl 세 엔터티가 공유하는 상태 전이 정의입니다.
//! 전이 테이블이 유일한 진실 공급원이며, 컨트롤러마다 상태 검사를 복제하지
//! 않습니다. 상태 문자열은 DB 컬럼 값이자 API 응답 값으로 그대로 쓰입니다.

pub mod machine;

pub use machine::{authorize, resolve, transitions, Transition};

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 워크플로우 엔터티 종류
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "WorkflowKind")]
pub enum WorkflowKind {
    #[sea_orm(string_value = "DEVIATION")]
    #[serde(rename = "DEVIATION")]
    Deviation,
    #[sea_orm(string_value = "CAPA")]
    #[serde(rename = "CAPA")]
    Capa,
    #[sea_orm(string_value = "CHANGE_CONTROL")]
    #[serde(rename = "CHANGE_CONTROL")]
    ChangeControl,
}

impl WorkflowKind {
    /// 첨부/로그에 쓰이는 소문자 폴더명
    pub fn folder(&self) -> &'static str {
        match self {
            WorkflowKind::Deviation => "deviations",
            WorkflowKind::Capa => "capa",
            WorkflowKind::ChangeControl => "change-controls",
        }
    }
}

/// 워크플로우 상태
///
/// 세 엔터티가 설정하는 모든 상태를 하나의 열거형으로 선언합니다.
/// 원본 시스템은 컨트롤러가 설정하는 상태 일부를 enum에 누락했는데,
/// 여기서는 전이 테이블이 종류별 도달 가능 상태를 결정합니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "WorkflowStatus")]
pub enum WorkflowStatus {
    #[sea_orm(string_value = "Draft")]
    #[serde(rename = "Draft")]
    Draft,
    #[sea_orm(string_value = "Under Department Head Review")]
    #[serde(rename = "Under Department Head Review")]
    UnderDepartmentHeadReview,
    #[sea_orm(string_value = "Approved By Department Head")]
    #[serde(rename = "Approved By Department Head")]
    ApprovedByDepartmentHead,
    #[sea_orm(string_value = "Accepted By QA")]
    #[serde(rename = "Accepted By QA")]
    AcceptedByQa,
    #[sea_orm(string_value = "Investigation Team Assigned")]
    #[serde(rename = "Investigation Team Assigned")]
    InvestigationTeamAssigned,
    #[sea_orm(string_value = "Team Impact Assessment Done")]
    #[serde(rename = "Team Impact Assessment Done")]
    TeamImpactAssessmentDone,
    #[sea_orm(string_value = "Team Investigation Done")]
    #[serde(rename = "Team Investigation Done")]
    TeamInvestigationDone,
    #[sea_orm(string_value = "Immediate Actions In Progress")]
    #[serde(rename = "Immediate Actions In Progress")]
    ImmediateActionsInProgress,
    #[sea_orm(string_value = "Change Control Initiated")]
    #[serde(rename = "Change Control Initiated")]
    ChangeControlInitiated,
    #[sea_orm(string_value = "Historical Check Done")]
    #[serde(rename = "Historical Check Done")]
    HistoricalCheckDone,
    #[sea_orm(string_value = "Acknowledged By Approver")]
    #[serde(rename = "Acknowledged By Approver")]
    AcknowledgedByApprover,
    #[sea_orm(string_value = "Closed")]
    #[serde(rename = "Closed")]
    Closed,
}

impl WorkflowStatus {
    /// API 메시지에 쓰이는 표시 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "Draft",
            WorkflowStatus::UnderDepartmentHeadReview => "Under Department Head Review",
            WorkflowStatus::ApprovedByDepartmentHead => "Approved By Department Head",
            WorkflowStatus::AcceptedByQa => "Accepted By QA",
            WorkflowStatus::InvestigationTeamAssigned => "Investigation Team Assigned",
            WorkflowStatus::TeamImpactAssessmentDone => "Team Impact Assessment Done",
            WorkflowStatus::TeamInvestigationDone => "Team Investigation Done",
            WorkflowStatus::ImmediateActionsInProgress => "Immediate Actions In Progress",
            WorkflowStatus::ChangeControlInitiated => "Change Control Initiated",
            WorkflowStatus::HistoricalCheckDone => "Historical Check Done",
            WorkflowStatus::AcknowledgedByApprover => "Acknowledged By Approver",
            WorkflowStatus::Closed => "Closed",
        }
    }
}

/// 워크플로우 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    Submit,
    ReviewApprove,
    ReviewReject,
    QaApprove,
    QaReject,
    AssignTeam,
    RecordImpact,
    RecordInvestigation,
    RecordHistoricalCheck,
    StartImmediateActions,
    InitiateChangeControl,
    Acknowledge,
    Close,
}

/// 전이별 역할 요구 조건
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    /// 엔터티 부서 소속의 Creator, 또는 QA 부서 사용자
    CreatorInDepartment,
    /// 엔터티 부서 소속 또는 QA 부서의 Reviewer
    ReviewerInDepartmentOrQa,
    /// Approver 역할
    Approver,
    /// 연결된 조사팀 구성원
    TeamMember,
}

/// 역할 이름 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Creator,
    Reviewer,
    Approver,
    Admin,
    Other,
}

impl RoleKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Creator" => RoleKind::Creator,
            "Reviewer" => RoleKind::Reviewer,
            "Approver" => RoleKind::Approver,
            "Admin" => RoleKind::Admin,
            _ => RoleKind::Other,
        }
    }
}

/// 권한 판정에 필요한 행위자 정보
#[derive(Debug, Clone, Copy)]
pub struct ActorContext {
    pub user_id: i64,
    pub role: RoleKind,
    pub department_id: i64,
    pub is_qa: bool,
}

/// 검토/승인 판정 (세 워크플로우 엔터티 공용 요청 본문)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

/// 검토 요청 본문
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub action: ReviewDecision,
    pub comments: Option<String>,
}
