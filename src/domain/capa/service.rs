use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::domain::attachment::dto::UploadedFile;
use crate::domain::attachment::service::AttachmentService;
use crate::domain::change_control::entity::change_control;
use crate::domain::department::entity::department;
use crate::domain::deviation::entity::deviation;
use crate::domain::impact::dto::{ImpactAssessmentRequest, ImpactAssessmentResponse};
use crate::domain::impact::service::ImpactService;
use crate::domain::investigation::dto::InvestigationTeamRequest;
use crate::domain::investigation::service::InvestigationService;
use crate::state::AppState;
use crate::utils::auth::CurrentUser;
use crate::utils::error::AppError;
use crate::utils::refnum;
use crate::workflow::{
    machine, ReviewDecision, ReviewRequest, RoleKind, WorkflowAction, WorkflowKind, WorkflowStatus,
};

use super::dto::{
    CapaCreateRequest, CapaQueryParams, CapaResponse, ImmediateActionsRequest,
    InitiateChangeControlRequest, InvestigationRecordRequest,
};
use super::entity::capa;

pub struct CapaService;

impl CapaService {
    /// CAPA 생성
    ///
    /// 상위 일탈 범위의 참조 번호를 부여하고, 레코드와 첨부를 한 트랜잭션으로
    /// 기록합니다. 부서는 상위 일탈의 부서를 따릅니다.
    pub async fn create(
        state: AppState,
        current: &CurrentUser,
        req: CapaCreateRequest,
        files: Vec<UploadedFile>,
    ) -> Result<CapaResponse, AppError> {
        let txn = state.db.begin().await?;

        // 1. 상위 일탈 조회 (없으면 생성 전체 실패)
        let deviation_model = deviation::Entity::find_by_id(req.deviation_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 일탈입니다.".to_string()))?;

        // 2. 생성 권한: 일탈 부서의 Creator 또는 QA 사용자
        Self::ensure_creator(current, deviation_model.department_id)?;

        // 3. 일탈 범위 순차 번호 (QUA-DEV001-CAPA01)
        let existing = capa::Entity::find()
            .filter(capa::Column::DeviationId.eq(req.deviation_id))
            .count(&txn)
            .await?;

        let capa_number = refnum::capa_number(&deviation_model.deviation_number, existing);

        // 4. 레코드 생성 (Draft)
        let now = Utc::now().naive_utc();
        let model = capa::ActiveModel {
            capa_number: Set(capa_number.clone()),
            deviation_id: Set(req.deviation_id),
            department_id: Set(deviation_model.department_id),
            title: Set(req.title),
            description: Set(req.description),
            root_cause: Set(req.root_cause),
            corrective_action: Set(req.corrective_action),
            preventive_action: Set(req.preventive_action),
            status: Set(WorkflowStatus::Draft),
            created_by: Set(current.user.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await?;

        // 5. 첨부 업로드 + 레코드
        AttachmentService::store_all(
            &state.storage,
            &txn,
            WorkflowKind::Capa,
            inserted.capa_id,
            current.user.user_id,
            files,
        )
        .await?;

        txn.commit().await?;

        info!(
            capa_id = inserted.capa_id,
            capa_number = %capa_number,
            "capa created"
        );

        Ok(inserted.into())
    }

    pub async fn list(
        state: AppState,
        params: CapaQueryParams,
    ) -> Result<Vec<CapaResponse>, AppError> {
        let mut query = capa::Entity::find();

        if let Some(deviation_id) = params.deviation_id {
            query = query.filter(capa::Column::DeviationId.eq(deviation_id));
        }
        if let Some(department_id) = params.department_id {
            query = query.filter(capa::Column::DepartmentId.eq(department_id));
        }
        if let Some(status) = params.status {
            query = query.filter(capa::Column::Status.eq(status));
        }

        let rows = query
            .order_by_desc(capa::Column::CapaId)
            .all(&state.db)
            .await?;

        Ok(rows.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get(state: AppState, capa_id: i64) -> Result<CapaResponse, AppError> {
        let model = Self::find(&state, capa_id).await?;
        Ok(model.into())
    }

    /// 제출 (Draft → Under Department Head Review)
    pub async fn submit(
        state: AppState,
        current: &CurrentUser,
        capa_id: i64,
    ) -> Result<CapaResponse, AppError> {
        let model = Self::find(&state, capa_id).await?;

        let transition =
            machine::resolve(WorkflowKind::Capa, model.status, WorkflowAction::Submit)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = capa::Entity::update_many()
            .col_expr(capa::Column::Status, Expr::value(transition.to))
            .col_expr(capa::Column::SubmittedBy, Expr::value(current.user.user_id))
            .col_expr(capa::Column::SubmittedAt, Expr::value(now))
            .col_expr(capa::Column::UpdatedAt, Expr::value(now))
            .filter(capa::Column::CapaId.eq(capa_id))
            .filter(capa::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 제출할 수 없습니다.".to_string(),
            ));
        }

        info!(capa_id = capa_id, "capa submitted");

        Self::reload(&state, capa_id).await
    }

    /// 부서장 검토
    pub async fn review(
        state: AppState,
        current: &CurrentUser,
        capa_id: i64,
        req: ReviewRequest,
    ) -> Result<CapaResponse, AppError> {
        let model = Self::find(&state, capa_id).await?;

        let action = match req.action {
            ReviewDecision::Approved => WorkflowAction::ReviewApprove,
            ReviewDecision::Rejected => WorkflowAction::ReviewReject,
        };
        let transition = machine::resolve(WorkflowKind::Capa, model.status, action)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = capa::Entity::update_many()
            .col_expr(capa::Column::Status, Expr::value(transition.to))
            .col_expr(capa::Column::ReviewedBy, Expr::value(current.user.user_id))
            .col_expr(capa::Column::ReviewedAt, Expr::value(now))
            .col_expr(
                capa::Column::ReviewComments,
                Expr::value(req.comments.clone()),
            )
            .col_expr(capa::Column::UpdatedAt, Expr::value(now))
            .filter(capa::Column::CapaId.eq(capa_id))
            .filter(capa::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 검토를 적용할 수 없습니다.".to_string(),
            ));
        }

        info!(capa_id = capa_id, action = ?req.action, "capa reviewed");

        Self::reload(&state, capa_id).await
    }

    /// QA 검토
    pub async fn qa_review(
        state: AppState,
        current: &CurrentUser,
        capa_id: i64,
        req: ReviewRequest,
    ) -> Result<CapaResponse, AppError> {
        let model = Self::find(&state, capa_id).await?;

        let action = match req.action {
            ReviewDecision::Approved => WorkflowAction::QaApprove,
            ReviewDecision::Rejected => WorkflowAction::QaReject,
        };
        let transition = machine::resolve(WorkflowKind::Capa, model.status, action)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = capa::Entity::update_many()
            .col_expr(capa::Column::Status, Expr::value(transition.to))
            .col_expr(capa::Column::QaReviewer, Expr::value(current.user.user_id))
            .col_expr(capa::Column::QaReviewedAt, Expr::value(now))
            .col_expr(capa::Column::QaComments, Expr::value(req.comments.clone()))
            .col_expr(capa::Column::UpdatedAt, Expr::value(now))
            .filter(capa::Column::CapaId.eq(capa_id))
            .filter(capa::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 QA 검토를 적용할 수 없습니다.".to_string(),
            ));
        }

        info!(capa_id = capa_id, action = ?req.action, "capa qa reviewed");

        Self::reload(&state, capa_id).await
    }

    /// 조사팀 구성 (Accepted By QA → Investigation Team Assigned)
    pub async fn create_team(
        state: AppState,
        current: &CurrentUser,
        capa_id: i64,
        req: InvestigationTeamRequest,
    ) -> Result<CapaResponse, AppError> {
        let model = Self::find(&state, capa_id).await?;

        let transition =
            machine::resolve(WorkflowKind::Capa, model.status, WorkflowAction::AssignTeam)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let txn = state.db.begin().await?;

        let team_model = InvestigationService::create_for_parent(
            &txn,
            WorkflowKind::Capa,
            capa_id,
            current.user.user_id,
            &req.member_ids,
            req.remarks,
        )
        .await?;

        let now = Utc::now().naive_utc();
        let result = capa::Entity::update_many()
            .col_expr(capa::Column::Status, Expr::value(transition.to))
            .col_expr(
                capa::Column::InvestigationTeamId,
                Expr::value(team_model.team_id),
            )
            .col_expr(
                capa::Column::TeamAssignedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(capa::Column::UpdatedAt, Expr::value(now))
            .filter(capa::Column::CapaId.eq(capa_id))
            .filter(capa::Column::Status.eq(transition.from))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 조사팀을 구성할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        info!(
            capa_id = capa_id,
            team_id = team_model.team_id,
            "capa investigation team assigned"
        );

        Self::reload(&state, capa_id).await
    }

    /// 팀 조사 결과 기록 (Investigation Team Assigned → Team Investigation Done)
    ///
    /// answers가 있으면 조사 질문지를 CAPA 영향 평가로 함께 기록합니다.
    /// 답변 유형 검증은 세 워크플로우 종류 공통입니다.
    pub async fn record_investigation(
        state: AppState,
        current: &CurrentUser,
        capa_id: i64,
        req: InvestigationRecordRequest,
    ) -> Result<CapaResponse, AppError> {
        let model = Self::find(&state, capa_id).await?;

        let transition = machine::resolve(
            WorkflowKind::Capa,
            model.status,
            WorkflowAction::RecordInvestigation,
        )?;

        let team_id = model.investigation_team_id.ok_or_else(|| {
            AppError::InternalError("조사팀이 연결되어 있지 않습니다.".to_string())
        })?;
        let member_ids = InvestigationService::member_ids(&state, team_id).await?;
        machine::authorize(
            transition,
            &current.actor(),
            model.department_id,
            Some(&member_ids),
        )?;

        let txn = state.db.begin().await?;

        // 질문지 답변이 있으면 영향 평가로 기록 (유형 불일치 시 전체 철회)
        if !req.answers.is_empty() {
            ImpactService::record_for_parent(
                &txn,
                WorkflowKind::Capa,
                capa_id,
                current.user.user_id,
                ImpactAssessmentRequest {
                    answers: req.answers,
                    remarks: Some(req.summary.clone()),
                },
            )
            .await?;
        }

        let now = Utc::now().naive_utc();
        let mut update = capa::Entity::update_many()
            .col_expr(capa::Column::Status, Expr::value(transition.to))
            .col_expr(
                capa::Column::InvestigationSummary,
                Expr::value(req.summary.clone()),
            )
            .col_expr(capa::Column::UpdatedAt, Expr::value(now));

        if let Some(root_cause) = &req.root_cause {
            update = update.col_expr(capa::Column::RootCause, Expr::value(root_cause.clone()));
        }

        let result = update
            .filter(capa::Column::CapaId.eq(capa_id))
            .filter(capa::Column::Status.eq(transition.from))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 조사 결과를 기록할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        info!(capa_id = capa_id, "capa investigation recorded");

        Self::reload(&state, capa_id).await
    }

    /// 조사 질문지(CAPA 영향 평가) 조회
    pub async fn get_impact(
        state: AppState,
        capa_id: i64,
    ) -> Result<ImpactAssessmentResponse, AppError> {
        Self::find(&state, capa_id).await?;
        ImpactService::get_for_parent(state, WorkflowKind::Capa, capa_id).await
    }

    /// 즉시 조치 착수 (Team Investigation Done → Immediate Actions In Progress)
    pub async fn start_immediate_actions(
        state: AppState,
        current: &CurrentUser,
        capa_id: i64,
        req: ImmediateActionsRequest,
    ) -> Result<CapaResponse, AppError> {
        let model = Self::find(&state, capa_id).await?;

        let transition = machine::resolve(
            WorkflowKind::Capa,
            model.status,
            WorkflowAction::StartImmediateActions,
        )?;

        let team_id = model.investigation_team_id.ok_or_else(|| {
            AppError::InternalError("조사팀이 연결되어 있지 않습니다.".to_string())
        })?;
        let member_ids = InvestigationService::member_ids(&state, team_id).await?;
        machine::authorize(
            transition,
            &current.actor(),
            model.department_id,
            Some(&member_ids),
        )?;

        let now = Utc::now().naive_utc();
        let mut update = capa::Entity::update_many()
            .col_expr(capa::Column::Status, Expr::value(transition.to))
            .col_expr(
                capa::Column::CorrectiveAction,
                Expr::value(req.corrective_action.clone()),
            )
            .col_expr(capa::Column::UpdatedAt, Expr::value(now));

        if let Some(preventive) = &req.preventive_action {
            update = update.col_expr(capa::Column::PreventiveAction, Expr::value(preventive.clone()));
        }

        let result = update
            .filter(capa::Column::CapaId.eq(capa_id))
            .filter(capa::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 즉시 조치를 시작할 수 없습니다.".to_string(),
            ));
        }

        info!(capa_id = capa_id, "capa immediate actions started");

        Self::reload(&state, capa_id).await
    }

    /// 변경 관리 개시 (Team Investigation Done → Change Control Initiated)
    ///
    /// Draft 상태의 변경 관리 레코드를 만들어 양방향으로 연결합니다.
    /// 생성과 상태 변경이 한 트랜잭션입니다.
    pub async fn initiate_change_control(
        state: AppState,
        current: &CurrentUser,
        capa_id: i64,
        req: InitiateChangeControlRequest,
    ) -> Result<CapaResponse, AppError> {
        let model = Self::find(&state, capa_id).await?;

        let transition = machine::resolve(
            WorkflowKind::Capa,
            model.status,
            WorkflowAction::InitiateChangeControl,
        )?;

        let team_id = model.investigation_team_id.ok_or_else(|| {
            AppError::InternalError("조사팀이 연결되어 있지 않습니다.".to_string())
        })?;
        let member_ids = InvestigationService::member_ids(&state, team_id).await?;
        machine::authorize(
            transition,
            &current.actor(),
            model.department_id,
            Some(&member_ids),
        )?;

        let txn = state.db.begin().await?;

        // 1. 부서 접두어로 변경 관리 번호 생성
        let department_model = department::Entity::find_by_id(model.department_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("CAPA의 부서 정보를 찾을 수 없습니다.".to_string())
            })?;

        let existing = change_control::Entity::find()
            .filter(change_control::Column::DepartmentId.eq(model.department_id))
            .count(&txn)
            .await?;

        let change_number = refnum::sequence_number(&department_model.prefix, "CC", existing);

        // 2. Draft 변경 관리 레코드 생성 (CAPA 역참조 포함)
        let now = Utc::now().naive_utc();
        let change_model = change_control::ActiveModel {
            change_number: Set(change_number.clone()),
            department_id: Set(model.department_id),
            category_id: Set(req.category_id),
            capa_id: Set(Some(capa_id)),
            classification: Set(req.classification),
            permanence: Set(req.permanence),
            title: Set(req.title),
            description: Set(req.description),
            status: Set(WorkflowStatus::Draft),
            created_by: Set(current.user.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let change_inserted = change_model.insert(&txn).await?;

        // 3. CAPA 상태 + 역링크 갱신 (조건부)
        let result = capa::Entity::update_many()
            .col_expr(capa::Column::Status, Expr::value(transition.to))
            .col_expr(
                capa::Column::ChangeControlId,
                Expr::value(change_inserted.change_control_id),
            )
            .col_expr(capa::Column::UpdatedAt, Expr::value(now))
            .filter(capa::Column::CapaId.eq(capa_id))
            .filter(capa::Column::Status.eq(transition.from))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 변경 관리를 개시할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        info!(
            capa_id = capa_id,
            change_control_id = change_inserted.change_control_id,
            change_number = %change_number,
            "change control initiated from capa"
        );

        Self::reload(&state, capa_id).await
    }

    // ===== 내부 헬퍼 =====

    async fn find(state: &AppState, capa_id: i64) -> Result<capa::Model, AppError> {
        capa::Entity::find_by_id(capa_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 CAPA입니다.".to_string()))
    }

    async fn reload(state: &AppState, capa_id: i64) -> Result<CapaResponse, AppError> {
        Ok(Self::find(state, capa_id).await?.into())
    }

    fn ensure_creator(current: &CurrentUser, department_id: i64) -> Result<(), AppError> {
        let actor = current.actor();
        if actor.is_qa {
            return Ok(());
        }
        if actor.role != RoleKind::Creator {
            return Err(AppError::RoleNotAllowed(
                "Creator 역할만 CAPA를 생성할 수 있습니다.".to_string(),
            ));
        }
        if actor.department_id != department_id {
            return Err(AppError::DepartmentMismatch(
                "소속 부서의 CAPA만 생성할 수 있습니다.".to_string(),
            ));
        }
        Ok(())
    }
}
