//! 워크플로우 상태 전이 테스트
//!
//! 테스트 대상:
//! - 세 엔터티 공용 전이 테이블 (resolve)
//! - 역할/부서/조사팀 권한 판정 (authorize)
//! - 반려 시 Draft 복귀, 중간 상태 건너뛰기 금지

use qms_server::utils::error::AppError;
use qms_server::workflow::{
    authorize, resolve, ActorContext, RoleKind, WorkflowAction, WorkflowKind, WorkflowStatus,
};

fn actor(role: RoleKind, department_id: i64, is_qa: bool) -> ActorContext {
    ActorContext {
        user_id: 10,
        role,
        department_id,
        is_qa,
    }
}

// ============== 전이 순서 테스트 ==============

#[test]
fn should_move_draft_deviation_to_department_head_review_on_submit() {
    // Arrange & Act
    let transition = resolve(
        WorkflowKind::Deviation,
        WorkflowStatus::Draft,
        WorkflowAction::Submit,
    )
    .unwrap();

    // Assert: 정확히 다음 상태 하나로만 이동
    assert_eq!(transition.to, WorkflowStatus::UnderDepartmentHeadReview);
}

#[test]
fn should_never_skip_intermediate_states() {
    // Draft에서 QA 승인이나 조사팀 배정으로 건너뛸 수 없다
    for action in [
        WorkflowAction::QaApprove,
        WorkflowAction::AssignTeam,
        WorkflowAction::RecordImpact,
    ] {
        let result = resolve(WorkflowKind::Deviation, WorkflowStatus::Draft, action);
        assert!(matches!(result, Err(AppError::InvalidStatus(_))));
    }
}

#[test]
fn should_reset_to_draft_on_rejection_at_both_review_stages() {
    for kind in [
        WorkflowKind::Deviation,
        WorkflowKind::Capa,
        WorkflowKind::ChangeControl,
    ] {
        let department_reject = resolve(
            kind,
            WorkflowStatus::UnderDepartmentHeadReview,
            WorkflowAction::ReviewReject,
        )
        .unwrap();
        assert_eq!(department_reject.to, WorkflowStatus::Draft);

        let qa_reject = resolve(
            kind,
            WorkflowStatus::ApprovedByDepartmentHead,
            WorkflowAction::QaReject,
        )
        .unwrap();
        assert_eq!(qa_reject.to, WorkflowStatus::Draft);
    }
}

#[test]
fn should_reject_team_creation_for_draft_parent() {
    // Draft 상태에서 조사팀 구성 시도 → 400 계열 에러
    let result = resolve(
        WorkflowKind::Deviation,
        WorkflowStatus::Draft,
        WorkflowAction::AssignTeam,
    );

    match result {
        Err(AppError::InvalidStatus(message)) => {
            assert!(message.contains("Accepted By QA"));
        }
        other => panic!("InvalidStatus를 기대했으나 {:?}", other.map(|t| t.to)),
    }
}

#[test]
fn should_walk_capa_chain_to_change_control_initiated() {
    let mut status = WorkflowStatus::Draft;
    for action in [
        WorkflowAction::Submit,
        WorkflowAction::ReviewApprove,
        WorkflowAction::QaApprove,
        WorkflowAction::AssignTeam,
        WorkflowAction::RecordInvestigation,
        WorkflowAction::InitiateChangeControl,
    ] {
        let transition = resolve(WorkflowKind::Capa, status, action).unwrap();
        assert_eq!(transition.from, status);
        status = transition.to;
    }
    assert_eq!(status, WorkflowStatus::ChangeControlInitiated);
}

#[test]
fn should_close_change_control_only_after_acknowledgement() {
    // Historical Check Done에서 바로 Close 불가
    let early_close = resolve(
        WorkflowKind::ChangeControl,
        WorkflowStatus::HistoricalCheckDone,
        WorkflowAction::Close,
    );
    assert!(matches!(early_close, Err(AppError::InvalidStatus(_))));

    let close = resolve(
        WorkflowKind::ChangeControl,
        WorkflowStatus::AcknowledgedByApprover,
        WorkflowAction::Close,
    )
    .unwrap();
    assert_eq!(close.to, WorkflowStatus::Closed);
}

#[test]
fn should_not_expose_capa_actions_on_deviation() {
    let result = resolve(
        WorkflowKind::Deviation,
        WorkflowStatus::InvestigationTeamAssigned,
        WorkflowAction::RecordInvestigation,
    );
    assert!(matches!(result, Err(AppError::UnsupportedAction(_))));
}

// ============== 권한 판정 테스트 ==============

#[test]
fn should_allow_creator_of_same_department_to_submit() {
    let transition = resolve(
        WorkflowKind::Deviation,
        WorkflowStatus::Draft,
        WorkflowAction::Submit,
    )
    .unwrap();

    let result = authorize(transition, &actor(RoleKind::Creator, 3, false), 3, None);
    assert!(result.is_ok());
}

#[test]
fn should_forbid_creator_of_other_department_to_submit() {
    let transition = resolve(
        WorkflowKind::Deviation,
        WorkflowStatus::Draft,
        WorkflowAction::Submit,
    )
    .unwrap();

    let result = authorize(transition, &actor(RoleKind::Creator, 4, false), 3, None);
    assert!(matches!(result, Err(AppError::DepartmentMismatch(_))));
}

#[test]
fn should_allow_any_qa_user_to_submit_cross_department() {
    let transition = resolve(
        WorkflowKind::Capa,
        WorkflowStatus::Draft,
        WorkflowAction::Submit,
    )
    .unwrap();

    // QA 부서 소속이면 역할/부서와 무관하게 제출 가능
    let result = authorize(transition, &actor(RoleKind::Reviewer, 9, true), 3, None);
    assert!(result.is_ok());
}

#[test]
fn should_require_reviewer_role_for_department_head_review() {
    let transition = resolve(
        WorkflowKind::Deviation,
        WorkflowStatus::UnderDepartmentHeadReview,
        WorkflowAction::ReviewApprove,
    )
    .unwrap();

    let result = authorize(transition, &actor(RoleKind::Creator, 3, false), 3, None);
    assert!(matches!(result, Err(AppError::RoleNotAllowed(_))));
}

#[test]
fn should_require_approver_role_for_qa_review() {
    let transition = resolve(
        WorkflowKind::ChangeControl,
        WorkflowStatus::ApprovedByDepartmentHead,
        WorkflowAction::QaApprove,
    )
    .unwrap();

    assert!(authorize(transition, &actor(RoleKind::Approver, 9, true), 3, None).is_ok());
    assert!(matches!(
        authorize(transition, &actor(RoleKind::Reviewer, 9, true), 3, None),
        Err(AppError::RoleNotAllowed(_))
    ));
}

#[test]
fn should_restrict_impact_recording_to_team_members() {
    let transition = resolve(
        WorkflowKind::Deviation,
        WorkflowStatus::InvestigationTeamAssigned,
        WorkflowAction::RecordImpact,
    )
    .unwrap();

    let member = actor(RoleKind::Creator, 3, false);
    assert!(authorize(transition, &member, 3, Some(&[10, 11])).is_ok());
    assert!(matches!(
        authorize(transition, &member, 3, Some(&[11, 12])),
        Err(AppError::NotTeamMember(_))
    ));
}

// ============== 직렬화 테스트 ==============

#[test]
fn should_serialize_status_as_human_readable_strings() {
    let json = serde_json::to_string(&WorkflowStatus::UnderDepartmentHeadReview).unwrap();
    assert_eq!(json, "\"Under Department Head Review\"");

    let json = serde_json::to_string(&WorkflowStatus::AcceptedByQa).unwrap();
    assert_eq!(json, "\"Accepted By QA\"");

    let parsed: WorkflowStatus =
        serde_json::from_str("\"Investigation Team Assigned\"").unwrap();
    assert_eq!(parsed, WorkflowStatus::InvestigationTeamAssigned);
}
