use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::domain::attachment::dto::UploadedFile;
use crate::domain::attachment::service::AttachmentService;
use crate::domain::department::entity::department;
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
    ChangeCategoryRequest, ChangeCategoryResponse, ChangeControlCreateRequest,
    ChangeControlQueryParams, ChangeControlResponse, HistoricalCheckRequest,
    HistoricalCheckResponse,
};
use super::entity::{change_category, change_control, historical_check};

pub struct ChangeControlService;

impl ChangeControlService {
    /// 변경 관리 생성
    pub async fn create(
        state: AppState,
        current: &CurrentUser,
        req: ChangeControlCreateRequest,
        files: Vec<UploadedFile>,
    ) -> Result<ChangeControlResponse, AppError> {
        Self::ensure_creator(current, req.department_id)?;

        let txn = state.db.begin().await?;

        // 1. 부서 조회 (없으면 생성 전체 실패)
        let department_model = department::Entity::find_by_id(req.department_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 부서입니다.".to_string()))?;

        // 2. 부서 범위 순차 번호
        let existing = change_control::Entity::find()
            .filter(change_control::Column::DepartmentId.eq(req.department_id))
            .count(&txn)
            .await?;

        let change_number = refnum::sequence_number(&department_model.prefix, "CC", existing);

        // 3. 레코드 생성 (Draft)
        let (item_kind, item_ref) = match req.affected_item {
            Some(item) => {
                let (kind, reference) = item.into_columns();
                (Some(kind), Some(reference))
            }
            None => (None, None),
        };

        let now = Utc::now().naive_utc();
        let model = change_control::ActiveModel {
            change_number: Set(change_number.clone()),
            department_id: Set(req.department_id),
            category_id: Set(req.category_id),
            classification: Set(req.classification),
            permanence: Set(req.permanence),
            item_kind: Set(item_kind),
            item_ref: Set(item_ref),
            document_id: Set(req.document_id),
            location_id: Set(req.location_id),
            similar_changes: Set(req.similar_changes),
            risk_score: Set(req.risk_score),
            implementation_timeline: Set(req.implementation_timeline),
            title: Set(req.title),
            description: Set(req.description),
            status: Set(WorkflowStatus::Draft),
            created_by: Set(current.user.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await?;

        // 4. 첨부 업로드 + 레코드
        AttachmentService::store_all(
            &state.storage,
            &txn,
            WorkflowKind::ChangeControl,
            inserted.change_control_id,
            current.user.user_id,
            files,
        )
        .await?;

        txn.commit().await?;

        info!(
            change_control_id = inserted.change_control_id,
            change_number = %change_number,
            "change control created"
        );

        Ok(inserted.into())
    }

    pub async fn list(
        state: AppState,
        params: ChangeControlQueryParams,
    ) -> Result<Vec<ChangeControlResponse>, AppError> {
        let mut query = change_control::Entity::find();

        if let Some(department_id) = params.department_id {
            query = query.filter(change_control::Column::DepartmentId.eq(department_id));
        }
        if let Some(capa_id) = params.capa_id {
            query = query.filter(change_control::Column::CapaId.eq(capa_id));
        }
        if let Some(status) = params.status {
            query = query.filter(change_control::Column::Status.eq(status));
        }

        let rows = query
            .order_by_desc(change_control::Column::ChangeControlId)
            .all(&state.db)
            .await?;

        Ok(rows.into_iter().map(|c| c.into()).collect())
    }

    pub async fn get(
        state: AppState,
        change_control_id: i64,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;
        Ok(model.into())
    }

    /// 제출 (Draft → Under Department Head Review)
    pub async fn submit(
        state: AppState,
        current: &CurrentUser,
        change_control_id: i64,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;

        let transition = machine::resolve(
            WorkflowKind::ChangeControl,
            model.status,
            WorkflowAction::Submit,
        )?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = change_control::Entity::update_many()
            .col_expr(change_control::Column::Status, Expr::value(transition.to))
            .col_expr(
                change_control::Column::SubmittedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(change_control::Column::SubmittedAt, Expr::value(now))
            .col_expr(change_control::Column::UpdatedAt, Expr::value(now))
            .filter(change_control::Column::ChangeControlId.eq(change_control_id))
            .filter(change_control::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 제출할 수 없습니다.".to_string(),
            ));
        }

        info!(change_control_id = change_control_id, "change control submitted");

        Self::reload(&state, change_control_id).await
    }

    /// 부서장 검토
    pub async fn review(
        state: AppState,
        current: &CurrentUser,
        change_control_id: i64,
        req: ReviewRequest,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;

        let action = match req.action {
            ReviewDecision::Approved => WorkflowAction::ReviewApprove,
            ReviewDecision::Rejected => WorkflowAction::ReviewReject,
        };
        let transition = machine::resolve(WorkflowKind::ChangeControl, model.status, action)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = change_control::Entity::update_many()
            .col_expr(change_control::Column::Status, Expr::value(transition.to))
            .col_expr(
                change_control::Column::ReviewedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(change_control::Column::ReviewedAt, Expr::value(now))
            .col_expr(
                change_control::Column::ReviewComments,
                Expr::value(req.comments.clone()),
            )
            .col_expr(change_control::Column::UpdatedAt, Expr::value(now))
            .filter(change_control::Column::ChangeControlId.eq(change_control_id))
            .filter(change_control::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 검토를 적용할 수 없습니다.".to_string(),
            ));
        }

        info!(change_control_id = change_control_id, action = ?req.action, "change control reviewed");

        Self::reload(&state, change_control_id).await
    }

    /// QA 검토
    pub async fn qa_review(
        state: AppState,
        current: &CurrentUser,
        change_control_id: i64,
        req: ReviewRequest,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;

        let action = match req.action {
            ReviewDecision::Approved => WorkflowAction::QaApprove,
            ReviewDecision::Rejected => WorkflowAction::QaReject,
        };
        let transition = machine::resolve(WorkflowKind::ChangeControl, model.status, action)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = change_control::Entity::update_many()
            .col_expr(change_control::Column::Status, Expr::value(transition.to))
            .col_expr(
                change_control::Column::QaReviewer,
                Expr::value(current.user.user_id),
            )
            .col_expr(change_control::Column::QaReviewedAt, Expr::value(now))
            .col_expr(
                change_control::Column::QaComments,
                Expr::value(req.comments.clone()),
            )
            .col_expr(change_control::Column::UpdatedAt, Expr::value(now))
            .filter(change_control::Column::ChangeControlId.eq(change_control_id))
            .filter(change_control::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 QA 검토를 적용할 수 없습니다.".to_string(),
            ));
        }

        info!(change_control_id = change_control_id, action = ?req.action, "change control qa reviewed");

        Self::reload(&state, change_control_id).await
    }

    /// 조사팀 구성
    pub async fn create_team(
        state: AppState,
        current: &CurrentUser,
        change_control_id: i64,
        req: InvestigationTeamRequest,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;

        let transition = machine::resolve(
            WorkflowKind::ChangeControl,
            model.status,
            WorkflowAction::AssignTeam,
        )?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let txn = state.db.begin().await?;

        let team_model = InvestigationService::create_for_parent(
            &txn,
            WorkflowKind::ChangeControl,
            change_control_id,
            current.user.user_id,
            &req.member_ids,
            req.remarks,
        )
        .await?;

        let now = Utc::now().naive_utc();
        let result = change_control::Entity::update_many()
            .col_expr(change_control::Column::Status, Expr::value(transition.to))
            .col_expr(
                change_control::Column::InvestigationTeamId,
                Expr::value(team_model.team_id),
            )
            .col_expr(
                change_control::Column::TeamAssignedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(change_control::Column::UpdatedAt, Expr::value(now))
            .filter(change_control::Column::ChangeControlId.eq(change_control_id))
            .filter(change_control::Column::Status.eq(transition.from))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 조사팀을 구성할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        info!(
            change_control_id = change_control_id,
            team_id = team_model.team_id,
            "change control investigation team assigned"
        );

        Self::reload(&state, change_control_id).await
    }

    /// 팀 영향 평가 기록 (조사팀 구성원 전용)
    pub async fn record_impact(
        state: AppState,
        current: &CurrentUser,
        change_control_id: i64,
        req: ImpactAssessmentRequest,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;

        let transition = machine::resolve(
            WorkflowKind::ChangeControl,
            model.status,
            WorkflowAction::RecordImpact,
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

        let assessment_model = ImpactService::record_for_parent(
            &txn,
            WorkflowKind::ChangeControl,
            change_control_id,
            current.user.user_id,
            req,
        )
        .await?;

        let now = Utc::now().naive_utc();
        let result = change_control::Entity::update_many()
            .col_expr(change_control::Column::Status, Expr::value(transition.to))
            .col_expr(
                change_control::Column::ImpactAssessmentId,
                Expr::value(assessment_model.impact_id),
            )
            .col_expr(change_control::Column::UpdatedAt, Expr::value(now))
            .filter(change_control::Column::ChangeControlId.eq(change_control_id))
            .filter(change_control::Column::Status.eq(transition.from))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 영향 평가를 기록할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        info!(
            change_control_id = change_control_id,
            impact_id = assessment_model.impact_id,
            "change control impact assessment recorded"
        );

        Self::reload(&state, change_control_id).await
    }

    /// 기록된 영향 평가 조회
    pub async fn get_impact(
        state: AppState,
        change_control_id: i64,
    ) -> Result<ImpactAssessmentResponse, AppError> {
        Self::find(&state, change_control_id).await?;
        ImpactService::get_for_parent(state, WorkflowKind::ChangeControl, change_control_id).await
    }

    /// 과거 이력 점검 기록 (Team Impact Assessment Done → Historical Check Done)
    pub async fn record_historical_check(
        state: AppState,
        current: &CurrentUser,
        change_control_id: i64,
        req: HistoricalCheckRequest,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;

        let transition = machine::resolve(
            WorkflowKind::ChangeControl,
            model.status,
            WorkflowAction::RecordHistoricalCheck,
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

        let now = Utc::now().naive_utc();
        let check = historical_check::ActiveModel {
            change_control_id: Set(change_control_id),
            checked_by: Set(current.user.user_id),
            similar_references: Set(req.similar_references),
            summary: Set(req.summary),
            created_at: Set(now),
            ..Default::default()
        };
        let check_model = check.insert(&txn).await?;

        let result = change_control::Entity::update_many()
            .col_expr(change_control::Column::Status, Expr::value(transition.to))
            .col_expr(change_control::Column::UpdatedAt, Expr::value(now))
            .filter(change_control::Column::ChangeControlId.eq(change_control_id))
            .filter(change_control::Column::Status.eq(transition.from))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 이력 점검을 기록할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        info!(
            change_control_id = change_control_id,
            check_id = check_model.check_id,
            "change control historical check recorded"
        );

        Self::reload(&state, change_control_id).await
    }

    /// 승인자 확인 (Historical Check Done → Acknowledged By Approver)
    pub async fn acknowledge(
        state: AppState,
        current: &CurrentUser,
        change_control_id: i64,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;

        let transition = machine::resolve(
            WorkflowKind::ChangeControl,
            model.status,
            WorkflowAction::Acknowledge,
        )?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = change_control::Entity::update_many()
            .col_expr(change_control::Column::Status, Expr::value(transition.to))
            .col_expr(
                change_control::Column::AcknowledgedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(change_control::Column::AcknowledgedAt, Expr::value(now))
            .col_expr(change_control::Column::UpdatedAt, Expr::value(now))
            .filter(change_control::Column::ChangeControlId.eq(change_control_id))
            .filter(change_control::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 확인할 수 없습니다.".to_string(),
            ));
        }

        info!(change_control_id = change_control_id, "change control acknowledged");

        Self::reload(&state, change_control_id).await
    }

    /// 종결 (Acknowledged By Approver → Closed)
    pub async fn close(
        state: AppState,
        current: &CurrentUser,
        change_control_id: i64,
    ) -> Result<ChangeControlResponse, AppError> {
        let model = Self::find(&state, change_control_id).await?;

        let transition = machine::resolve(
            WorkflowKind::ChangeControl,
            model.status,
            WorkflowAction::Close,
        )?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = change_control::Entity::update_many()
            .col_expr(change_control::Column::Status, Expr::value(transition.to))
            .col_expr(
                change_control::Column::ClosedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(change_control::Column::ClosedAt, Expr::value(now))
            .col_expr(change_control::Column::UpdatedAt, Expr::value(now))
            .filter(change_control::Column::ChangeControlId.eq(change_control_id))
            .filter(change_control::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 종결할 수 없습니다.".to_string(),
            ));
        }

        info!(change_control_id = change_control_id, "change control closed");

        Self::reload(&state, change_control_id).await
    }

    /// 과거 이력 점검 기록 조회
    pub async fn list_historical_checks(
        state: AppState,
        change_control_id: i64,
    ) -> Result<Vec<HistoricalCheckResponse>, AppError> {
        Self::find(&state, change_control_id).await?;

        let checks = historical_check::Entity::find()
            .filter(historical_check::Column::ChangeControlId.eq(change_control_id))
            .order_by_asc(historical_check::Column::CheckId)
            .all(&state.db)
            .await?;

        Ok(checks.into_iter().map(|c| c.into()).collect())
    }

    // ===== 카테고리 =====

    pub async fn create_category(
        state: AppState,
        req: ChangeCategoryRequest,
    ) -> Result<ChangeCategoryResponse, AppError> {
        let exists = change_category::Entity::find()
            .filter(change_category::Column::Name.eq(&req.name))
            .one(&state.db)
            .await?;

        if exists.is_some() {
            return Err(AppError::Conflict(
                "이미 존재하는 카테고리 이름입니다.".to_string(),
            ));
        }

        let model = change_category::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;
        Ok(inserted.into())
    }

    pub async fn list_categories(
        state: AppState,
    ) -> Result<Vec<ChangeCategoryResponse>, AppError> {
        let categories = change_category::Entity::find()
            .order_by_asc(change_category::Column::CategoryId)
            .all(&state.db)
            .await?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    // ===== 내부 헬퍼 =====

    async fn find(
        state: &AppState,
        change_control_id: i64,
    ) -> Result<change_control::Model, AppError> {
        change_control::Entity::find_by_id(change_control_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 변경 관리입니다.".to_string()))
    }

    async fn reload(
        state: &AppState,
        change_control_id: i64,
    ) -> Result<ChangeControlResponse, AppError> {
        Ok(Self::find(state, change_control_id).await?.into())
    }

    fn ensure_creator(current: &CurrentUser, department_id: i64) -> Result<(), AppError> {
        let actor = current.actor();
        if actor.is_qa {
            return Ok(());
        }
        if actor.role != RoleKind::Creator {
            return Err(AppError::RoleNotAllowed(
                "Creator 역할만 변경 관리를 생성할 수 있습니다.".to_string(),
            ));
        }
        if actor.department_id != department_id {
            return Err(AppError::DepartmentMismatch(
                "소속 부서의 변경 관리만 생성할 수 있습니다.".to_string(),
            ));
        }
        Ok(())
    }
}
