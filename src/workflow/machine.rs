//! 전이 테이블과 판정 함수
//!
//! `resolve`는 (종류, 현재 상태, 동작)으로 전이를 찾고, `authorize`는
//! 행위자가 전이의 역할 요구 조건을 충족하는지 판정합니다. 둘 다 순수
//! 함수라서 DB 없이 테스트됩니다.

use crate::utils::error::AppError;
use crate::workflow::{
    ActorContext, RoleKind, RoleRequirement, WorkflowAction, WorkflowKind, WorkflowStatus,
};

/// 단일 상태 전이
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub action: WorkflowAction,
    pub from: WorkflowStatus,
    pub to: WorkflowStatus,
    pub requires: RoleRequirement,
}

const fn t(
    action: WorkflowAction,
    from: WorkflowStatus,
    to: WorkflowStatus,
    requires: RoleRequirement,
) -> Transition {
    Transition {
        action,
        from,
        to,
        requires,
    }
}

use RoleRequirement::{Approver, CreatorInDepartment, ReviewerInDepartmentOrQa, TeamMember};
use WorkflowAction as A;
use WorkflowStatus as S;

// 세 테이블의 앞 6개 행(제출 → 부서장 검토 → QA 검토 → 조사팀 배정)은
// 동일합니다. 꼬리 구간만 종류별로 다릅니다.

const DEVIATION_TRANSITIONS: &[Transition] = &[
    t(A::Submit, S::Draft, S::UnderDepartmentHeadReview, CreatorInDepartment),
    t(A::ReviewApprove, S::UnderDepartmentHeadReview, S::ApprovedByDepartmentHead, ReviewerInDepartmentOrQa),
    t(A::ReviewReject, S::UnderDepartmentHeadReview, S::Draft, ReviewerInDepartmentOrQa),
    t(A::QaApprove, S::ApprovedByDepartmentHead, S::AcceptedByQa, Approver),
    t(A::QaReject, S::ApprovedByDepartmentHead, S::Draft, Approver),
    t(A::AssignTeam, S::AcceptedByQa, S::InvestigationTeamAssigned, Approver),
    t(A::RecordImpact, S::InvestigationTeamAssigned, S::TeamImpactAssessmentDone, TeamMember),
];

const CAPA_TRANSITIONS: &[Transition] = &[
    t(A::Submit, S::Draft, S::UnderDepartmentHeadReview, CreatorInDepartment),
    t(A::ReviewApprove, S::UnderDepartmentHeadReview, S::ApprovedByDepartmentHead, ReviewerInDepartmentOrQa),
    t(A::ReviewReject, S::UnderDepartmentHeadReview, S::Draft, ReviewerInDepartmentOrQa),
    t(A::QaApprove, S::ApprovedByDepartmentHead, S::AcceptedByQa, Approver),
    t(A::QaReject, S::ApprovedByDepartmentHead, S::Draft, Approver),
    t(A::AssignTeam, S::AcceptedByQa, S::InvestigationTeamAssigned, Approver),
    t(A::RecordInvestigation, S::InvestigationTeamAssigned, S::TeamInvestigationDone, TeamMember),
    t(A::StartImmediateActions, S::TeamInvestigationDone, S::ImmediateActionsInProgress, TeamMember),
    t(A::InitiateChangeControl, S::TeamInvestigationDone, S::ChangeControlInitiated, TeamMember),
];

const CHANGE_CONTROL_TRANSITIONS: &[Transition] = &[
    t(A::Submit, S::Draft, S::UnderDepartmentHeadReview, CreatorInDepartment),
    t(A::ReviewApprove, S::UnderDepartmentHeadReview, S::ApprovedByDepartmentHead, ReviewerInDepartmentOrQa),
    t(A::ReviewReject, S::UnderDepartmentHeadReview, S::Draft, ReviewerInDepartmentOrQa),
    t(A::QaApprove, S::ApprovedByDepartmentHead, S::AcceptedByQa, Approver),
    t(A::QaReject, S::ApprovedByDepartmentHead, S::Draft, Approver),
    t(A::AssignTeam, S::AcceptedByQa, S::InvestigationTeamAssigned, Approver),
    t(A::RecordImpact, S::InvestigationTeamAssigned, S::TeamImpactAssessmentDone, TeamMember),
    t(A::RecordHistoricalCheck, S::TeamImpactAssessmentDone, S::HistoricalCheckDone, TeamMember),
    t(A::Acknowledge, S::HistoricalCheckDone, S::AcknowledgedByApprover, Approver),
    t(A::Close, S::AcknowledgedByApprover, S::Closed, Approver),
];

/// 종류별 전이 테이블
pub fn transitions(kind: WorkflowKind) -> &'static [Transition] {
    match kind {
        WorkflowKind::Deviation => DEVIATION_TRANSITIONS,
        WorkflowKind::Capa => CAPA_TRANSITIONS,
        WorkflowKind::ChangeControl => CHANGE_CONTROL_TRANSITIONS,
    }
}

/// (종류, 현재 상태, 동작)에 해당하는 전이를 찾습니다.
///
/// 동작이 테이블에 없으면 `UnsupportedAction`, 있지만 현재 상태가 다르면
/// 기대 상태를 담은 `InvalidStatus`를 반환합니다.
pub fn resolve(
    kind: WorkflowKind,
    current: WorkflowStatus,
    action: WorkflowAction,
) -> Result<&'static Transition, AppError> {
    let table = transitions(kind);

    let candidate = table
        .iter()
        .find(|transition| transition.action == action)
        .ok_or_else(|| {
            AppError::UnsupportedAction(format!(
                "{:?} 엔터티에서 지원하지 않는 동작입니다: {:?}",
                kind, action
            ))
        })?;

    if candidate.from != current {
        return Err(AppError::InvalidStatus(format!(
            "'{}' 상태에서만 가능한 동작입니다. 현재 상태: '{}'",
            candidate.from.as_str(),
            current.as_str()
        )));
    }

    Ok(candidate)
}

/// 행위자가 전이의 역할 요구 조건을 충족하는지 판정합니다.
///
/// `team_member_ids`는 TeamMember 요구 조건에서만 사용됩니다.
pub fn authorize(
    transition: &Transition,
    actor: &ActorContext,
    entity_department_id: i64,
    team_member_ids: Option<&[i64]>,
) -> Result<(), AppError> {
    match transition.requires {
        RoleRequirement::CreatorInDepartment => {
            // QA 부서 사용자는 부서 제한 없이 제출 가능
            if actor.is_qa {
                return Ok(());
            }
            if actor.role != RoleKind::Creator {
                return Err(AppError::RoleNotAllowed(
                    "Creator 역할만 제출할 수 있습니다.".to_string(),
                ));
            }
            if actor.department_id != entity_department_id {
                return Err(AppError::DepartmentMismatch(
                    "소속 부서의 레코드만 제출할 수 있습니다.".to_string(),
                ));
            }
            Ok(())
        }
        RoleRequirement::ReviewerInDepartmentOrQa => {
            if actor.role != RoleKind::Reviewer {
                return Err(AppError::RoleNotAllowed(
                    "Reviewer 역할만 부서장 검토를 수행할 수 있습니다.".to_string(),
                ));
            }
            if actor.department_id != entity_department_id && !actor.is_qa {
                return Err(AppError::DepartmentMismatch(
                    "해당 부서 또는 QA 소속 Reviewer만 검토할 수 있습니다.".to_string(),
                ));
            }
            Ok(())
        }
        RoleRequirement::Approver => {
            if actor.role != RoleKind::Approver {
                return Err(AppError::RoleNotAllowed(
                    "Approver 역할만 수행할 수 있는 동작입니다.".to_string(),
                ));
            }
            Ok(())
        }
        RoleRequirement::TeamMember => {
            let members = team_member_ids.unwrap_or(&[]);
            if !members.contains(&actor.user_id) {
                return Err(AppError::NotTeamMember(
                    "조사팀 구성원만 수행할 수 있는 동작입니다.".to_string(),
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator(department_id: i64) -> ActorContext {
        ActorContext {
            user_id: 1,
            role: RoleKind::Creator,
            department_id,
            is_qa: false,
        }
    }

    fn reviewer(department_id: i64) -> ActorContext {
        ActorContext {
            user_id: 2,
            role: RoleKind::Reviewer,
            department_id,
            is_qa: false,
        }
    }

    fn approver() -> ActorContext {
        ActorContext {
            user_id: 3,
            role: RoleKind::Approver,
            department_id: 9,
            is_qa: true,
        }
    }

    #[test]
    fn submit_moves_draft_to_department_head_review_only() {
        for kind in [
            WorkflowKind::Deviation,
            WorkflowKind::Capa,
            WorkflowKind::ChangeControl,
        ] {
            let transition = resolve(kind, WorkflowStatus::Draft, WorkflowAction::Submit).unwrap();
            assert_eq!(transition.to, WorkflowStatus::UnderDepartmentHeadReview);
        }
    }

    #[test]
    fn submit_rejected_outside_draft() {
        let result = resolve(
            WorkflowKind::Deviation,
            WorkflowStatus::AcceptedByQa,
            WorkflowAction::Submit,
        );
        assert!(matches!(result, Err(AppError::InvalidStatus(_))));
    }

    #[test]
    fn rejection_always_returns_to_draft() {
        for kind in [
            WorkflowKind::Deviation,
            WorkflowKind::Capa,
            WorkflowKind::ChangeControl,
        ] {
            let dept = resolve(
                kind,
                WorkflowStatus::UnderDepartmentHeadReview,
                WorkflowAction::ReviewReject,
            )
            .unwrap();
            assert_eq!(dept.to, WorkflowStatus::Draft);

            let qa = resolve(
                kind,
                WorkflowStatus::ApprovedByDepartmentHead,
                WorkflowAction::QaReject,
            )
            .unwrap();
            assert_eq!(qa.to, WorkflowStatus::Draft);
        }
    }

    #[test]
    fn no_state_is_skipped_on_the_happy_path() {
        // 일탈: 제출부터 영향 평가까지 연속된 전이로만 도달해야 한다
        let mut status = WorkflowStatus::Draft;
        for action in [
            WorkflowAction::Submit,
            WorkflowAction::ReviewApprove,
            WorkflowAction::QaApprove,
            WorkflowAction::AssignTeam,
            WorkflowAction::RecordImpact,
        ] {
            let transition = resolve(WorkflowKind::Deviation, status, action).unwrap();
            assert_eq!(transition.from, status);
            status = transition.to;
        }
        assert_eq!(status, WorkflowStatus::TeamImpactAssessmentDone);
    }

    #[test]
    fn team_assignment_requires_accepted_by_qa() {
        let result = resolve(
            WorkflowKind::Deviation,
            WorkflowStatus::Draft,
            WorkflowAction::AssignTeam,
        );
        assert!(matches!(result, Err(AppError::InvalidStatus(_))));
    }

    #[test]
    fn capa_terminal_actions_branch_from_investigation_done() {
        let immediate = resolve(
            WorkflowKind::Capa,
            WorkflowStatus::TeamInvestigationDone,
            WorkflowAction::StartImmediateActions,
        )
        .unwrap();
        assert_eq!(immediate.to, WorkflowStatus::ImmediateActionsInProgress);

        let change = resolve(
            WorkflowKind::Capa,
            WorkflowStatus::TeamInvestigationDone,
            WorkflowAction::InitiateChangeControl,
        )
        .unwrap();
        assert_eq!(change.to, WorkflowStatus::ChangeControlInitiated);
    }

    #[test]
    fn change_control_reaches_closed_through_full_chain() {
        let mut status = WorkflowStatus::Draft;
        for action in [
            WorkflowAction::Submit,
            WorkflowAction::ReviewApprove,
            WorkflowAction::QaApprove,
            WorkflowAction::AssignTeam,
            WorkflowAction::RecordImpact,
            WorkflowAction::RecordHistoricalCheck,
            WorkflowAction::Acknowledge,
            WorkflowAction::Close,
        ] {
            status = resolve(WorkflowKind::ChangeControl, status, action)
                .unwrap()
                .to;
        }
        assert_eq!(status, WorkflowStatus::Closed);
    }

    #[test]
    fn historical_check_is_not_a_deviation_action() {
        let result = resolve(
            WorkflowKind::Deviation,
            WorkflowStatus::TeamImpactAssessmentDone,
            WorkflowAction::RecordHistoricalCheck,
        );
        assert!(matches!(result, Err(AppError::UnsupportedAction(_))));
    }

    #[test]
    fn submit_requires_matching_department_unless_qa() {
        let transition = resolve(
            WorkflowKind::Deviation,
            WorkflowStatus::Draft,
            WorkflowAction::Submit,
        )
        .unwrap();

        assert!(authorize(transition, &creator(5), 5, None).is_ok());
        assert!(matches!(
            authorize(transition, &creator(5), 6, None),
            Err(AppError::DepartmentMismatch(_))
        ));
        // QA 부서 사용자는 부서가 달라도 허용
        assert!(authorize(transition, &approver(), 6, None).is_ok());
    }

    #[test]
    fn reviewer_must_belong_to_entity_department_or_qa() {
        let transition = resolve(
            WorkflowKind::Capa,
            WorkflowStatus::UnderDepartmentHeadReview,
            WorkflowAction::ReviewApprove,
        )
        .unwrap();

        assert!(authorize(transition, &reviewer(5), 5, None).is_ok());
        assert!(matches!(
            authorize(transition, &reviewer(4), 5, None),
            Err(AppError::DepartmentMismatch(_))
        ));
        assert!(matches!(
            authorize(transition, &creator(5), 5, None),
            Err(AppError::RoleNotAllowed(_))
        ));
    }

    #[test]
    fn team_recording_requires_membership() {
        let transition = resolve(
            WorkflowKind::Deviation,
            WorkflowStatus::InvestigationTeamAssigned,
            WorkflowAction::RecordImpact,
        )
        .unwrap();

        let actor = creator(5);
        assert!(authorize(transition, &actor, 5, Some(&[1, 7])).is_ok());
        assert!(matches!(
            authorize(transition, &actor, 5, Some(&[7, 8])),
            Err(AppError::NotTeamMember(_))
        ));
        assert!(matches!(
            authorize(transition, &actor, 5, None),
            Err(AppError::NotTeamMember(_))
        ));
    }
}
