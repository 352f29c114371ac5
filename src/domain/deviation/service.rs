use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::domain::attachment::dto::{AttachmentResponse, UploadedFile};
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
    DeviationCategoryRequest, DeviationCategoryResponse, DeviationCreateRequest,
    DeviationQueryParams, DeviationResponse,
};
use super::entity::{deviation, deviation_category};

pub struct DeviationService;

impl DeviationService {
    /// 일탈 생성
    ///
    /// 참조 번호 부여, 레코드 생성, 첨부 업로드를 한 트랜잭션으로 처리합니다.
    pub async fn create(
        state: AppState,
        current: &CurrentUser,
        req: DeviationCreateRequest,
        files: Vec<UploadedFile>,
    ) -> Result<DeviationResponse, AppError> {
        // 1. 생성 권한: 소속 부서의 Creator 또는 QA 사용자
        Self::ensure_creator(current, req.department_id)?;

        let txn = state.db.begin().await?;

        // 2. 부서 조회 (없으면 생성 전체 실패)
        let department_model = department::Entity::find_by_id(req.department_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 부서입니다.".to_string()))?;

        // 3. 부서 범위 순차 번호
        let existing = deviation::Entity::find()
            .filter(deviation::Column::DepartmentId.eq(req.department_id))
            .count(&txn)
            .await?;

        let deviation_number =
            refnum::sequence_number(&department_model.prefix, "DEV", existing);

        // 4. 레코드 생성 (Draft)
        let (item_kind, item_ref) = match req.affected_item {
            Some(item) => {
                let (kind, reference) = item.into_columns();
                (Some(kind), Some(reference))
            }
            None => (None, None),
        };

        let now = Utc::now().naive_utc();
        let model = deviation::ActiveModel {
            deviation_number: Set(deviation_number.clone()),
            department_id: Set(req.department_id),
            category_id: Set(req.category_id),
            location_id: Set(req.location_id),
            equipment_id: Set(req.equipment_id),
            planned: Set(req.planned),
            gmp_relevant: Set(req.gmp_relevant),
            item_kind: Set(item_kind),
            item_ref: Set(item_ref),
            governing_document_id: Set(req.governing_document_id),
            title: Set(req.title),
            description: Set(req.description),
            immediate_actions: Set(req.immediate_actions),
            status: Set(WorkflowStatus::Draft),
            created_by: Set(current.user.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await?;

        // 5. 첨부 업로드 + 레코드 (실패 시 전체 철회)
        AttachmentService::store_all(
            &state.storage,
            &txn,
            WorkflowKind::Deviation,
            inserted.deviation_id,
            current.user.user_id,
            files,
        )
        .await?;

        txn.commit().await?;

        info!(
            deviation_id = inserted.deviation_id,
            deviation_number = %deviation_number,
            "deviation created"
        );

        Ok(inserted.into())
    }

    pub async fn list(
        state: AppState,
        params: DeviationQueryParams,
    ) -> Result<Vec<DeviationResponse>, AppError> {
        let mut query = deviation::Entity::find();

        if let Some(department_id) = params.department_id {
            query = query.filter(deviation::Column::DepartmentId.eq(department_id));
        }
        if let Some(status) = params.status {
            query = query.filter(deviation::Column::Status.eq(status));
        }

        let deviations = query
            .order_by_desc(deviation::Column::DeviationId)
            .all(&state.db)
            .await?;

        Ok(deviations.into_iter().map(|d| d.into()).collect())
    }

    pub async fn get(state: AppState, deviation_id: i64) -> Result<DeviationResponse, AppError> {
        let model = Self::find(&state, deviation_id).await?;
        Ok(model.into())
    }

    /// 제출 (Draft → Under Department Head Review)
    pub async fn submit(
        state: AppState,
        current: &CurrentUser,
        deviation_id: i64,
    ) -> Result<DeviationResponse, AppError> {
        let model = Self::find(&state, deviation_id).await?;

        let transition =
            machine::resolve(WorkflowKind::Deviation, model.status, WorkflowAction::Submit)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = deviation::Entity::update_many()
            .col_expr(deviation::Column::Status, Expr::value(transition.to))
            .col_expr(
                deviation::Column::SubmittedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(deviation::Column::SubmittedAt, Expr::value(now))
            .col_expr(deviation::Column::UpdatedAt, Expr::value(now))
            .filter(deviation::Column::DeviationId.eq(deviation_id))
            .filter(deviation::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 제출할 수 없습니다.".to_string(),
            ));
        }

        info!(deviation_id = deviation_id, "deviation submitted");

        Self::reload(&state, deviation_id).await
    }

    /// 부서장 검토 (Approved → Approved By Department Head, Rejected → Draft)
    pub async fn review(
        state: AppState,
        current: &CurrentUser,
        deviation_id: i64,
        req: ReviewRequest,
    ) -> Result<DeviationResponse, AppError> {
        let model = Self::find(&state, deviation_id).await?;

        let action = match req.action {
            ReviewDecision::Approved => WorkflowAction::ReviewApprove,
            ReviewDecision::Rejected => WorkflowAction::ReviewReject,
        };
        let transition = machine::resolve(WorkflowKind::Deviation, model.status, action)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = deviation::Entity::update_many()
            .col_expr(deviation::Column::Status, Expr::value(transition.to))
            .col_expr(
                deviation::Column::ReviewedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(deviation::Column::ReviewedAt, Expr::value(now))
            // 반려 시에도 의견은 덮어쓰기로 남긴다
            .col_expr(
                deviation::Column::ReviewComments,
                Expr::value(req.comments.clone()),
            )
            .col_expr(deviation::Column::UpdatedAt, Expr::value(now))
            .filter(deviation::Column::DeviationId.eq(deviation_id))
            .filter(deviation::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 검토를 적용할 수 없습니다.".to_string(),
            ));
        }

        info!(deviation_id = deviation_id, action = ?req.action, "deviation reviewed");

        Self::reload(&state, deviation_id).await
    }

    /// QA 검토 (Approved → Accepted By QA, Rejected → Draft)
    pub async fn qa_review(
        state: AppState,
        current: &CurrentUser,
        deviation_id: i64,
        req: ReviewRequest,
    ) -> Result<DeviationResponse, AppError> {
        let model = Self::find(&state, deviation_id).await?;

        let action = match req.action {
            ReviewDecision::Approved => WorkflowAction::QaApprove,
            ReviewDecision::Rejected => WorkflowAction::QaReject,
        };
        let transition = machine::resolve(WorkflowKind::Deviation, model.status, action)?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let now = Utc::now().naive_utc();
        let result = deviation::Entity::update_many()
            .col_expr(deviation::Column::Status, Expr::value(transition.to))
            .col_expr(
                deviation::Column::QaReviewer,
                Expr::value(current.user.user_id),
            )
            .col_expr(deviation::Column::QaReviewedAt, Expr::value(now))
            .col_expr(
                deviation::Column::QaComments,
                Expr::value(req.comments.clone()),
            )
            .col_expr(deviation::Column::UpdatedAt, Expr::value(now))
            .filter(deviation::Column::DeviationId.eq(deviation_id))
            .filter(deviation::Column::Status.eq(transition.from))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 QA 검토를 적용할 수 없습니다.".to_string(),
            ));
        }

        info!(deviation_id = deviation_id, action = ?req.action, "deviation qa reviewed");

        Self::reload(&state, deviation_id).await
    }

    /// 조사팀 구성 (Accepted By QA → Investigation Team Assigned)
    ///
    /// 팀 생성과 상위 상태 변경을 한 트랜잭션으로 처리합니다.
    pub async fn create_team(
        state: AppState,
        current: &CurrentUser,
        deviation_id: i64,
        req: InvestigationTeamRequest,
    ) -> Result<DeviationResponse, AppError> {
        let model = Self::find(&state, deviation_id).await?;

        let transition = machine::resolve(
            WorkflowKind::Deviation,
            model.status,
            WorkflowAction::AssignTeam,
        )?;
        machine::authorize(transition, &current.actor(), model.department_id, None)?;

        let txn = state.db.begin().await?;

        let team_model = InvestigationService::create_for_parent(
            &txn,
            WorkflowKind::Deviation,
            deviation_id,
            current.user.user_id,
            &req.member_ids,
            req.remarks,
        )
        .await?;

        let now = Utc::now().naive_utc();
        let result = deviation::Entity::update_many()
            .col_expr(deviation::Column::Status, Expr::value(transition.to))
            .col_expr(
                deviation::Column::InvestigationTeamId,
                Expr::value(team_model.team_id),
            )
            .col_expr(
                deviation::Column::TeamAssignedBy,
                Expr::value(current.user.user_id),
            )
            .col_expr(deviation::Column::UpdatedAt, Expr::value(now))
            .filter(deviation::Column::DeviationId.eq(deviation_id))
            .filter(deviation::Column::Status.eq(transition.from))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            // 트랜잭션 철회로 팀 레코드도 함께 사라진다
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 조사팀을 구성할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        info!(
            deviation_id = deviation_id,
            team_id = team_model.team_id,
            "deviation investigation team assigned"
        );

        Self::reload(&state, deviation_id).await
    }

    /// 팀 영향 평가 기록 (Investigation Team Assigned → Team Impact Assessment Done)
    ///
    /// 조사팀 구성원만 기록할 수 있습니다.
    pub async fn record_impact(
        state: AppState,
        current: &CurrentUser,
        deviation_id: i64,
        req: ImpactAssessmentRequest,
    ) -> Result<DeviationResponse, AppError> {
        let model = Self::find(&state, deviation_id).await?;

        let transition = machine::resolve(
            WorkflowKind::Deviation,
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
            WorkflowKind::Deviation,
            deviation_id,
            current.user.user_id,
            req,
        )
        .await?;

        let now = Utc::now().naive_utc();
        let result = deviation::Entity::update_many()
            .col_expr(deviation::Column::Status, Expr::value(transition.to))
            .col_expr(
                deviation::Column::ImpactAssessmentId,
                Expr::value(assessment_model.impact_id),
            )
            .col_expr(deviation::Column::UpdatedAt, Expr::value(now))
            .filter(deviation::Column::DeviationId.eq(deviation_id))
            .filter(deviation::Column::Status.eq(transition.from))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "상태가 이미 변경되어 영향 평가를 기록할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        info!(
            deviation_id = deviation_id,
            impact_id = assessment_model.impact_id,
            "deviation impact assessment recorded"
        );

        Self::reload(&state, deviation_id).await
    }

    /// 기록된 영향 평가 조회
    pub async fn get_impact(
        state: AppState,
        deviation_id: i64,
    ) -> Result<ImpactAssessmentResponse, AppError> {
        Self::find(&state, deviation_id).await?;
        ImpactService::get_for_parent(state, WorkflowKind::Deviation, deviation_id).await
    }

    pub async fn list_attachments(
        state: AppState,
        deviation_id: i64,
    ) -> Result<Vec<AttachmentResponse>, AppError> {
        // 존재 확인 후 첨부 조회
        Self::find(&state, deviation_id).await?;
        AttachmentService::list(state, WorkflowKind::Deviation, deviation_id).await
    }

    // ===== 카테고리 =====

    pub async fn create_category(
        state: AppState,
        req: DeviationCategoryRequest,
    ) -> Result<DeviationCategoryResponse, AppError> {
        let exists = deviation_category::Entity::find()
            .filter(deviation_category::Column::Name.eq(&req.name))
            .one(&state.db)
            .await?;

        if exists.is_some() {
            return Err(AppError::Conflict(
                "이미 존재하는 카테고리 이름입니다.".to_string(),
            ));
        }

        let model = deviation_category::ActiveModel {
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
    ) -> Result<Vec<DeviationCategoryResponse>, AppError> {
        let categories = deviation_category::Entity::find()
            .order_by_asc(deviation_category::Column::CategoryId)
            .all(&state.db)
            .await?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    // ===== 내부 헬퍼 =====

    async fn find(state: &AppState, deviation_id: i64) -> Result<deviation::Model, AppError> {
        deviation::Entity::find_by_id(deviation_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 일탈입니다.".to_string()))
    }

    async fn reload(state: &AppState, deviation_id: i64) -> Result<DeviationResponse, AppError> {
        Ok(Self::find(state, deviation_id).await?.into())
    }

    fn ensure_creator(current: &CurrentUser, department_id: i64) -> Result<(), AppError> {
        let actor = current.actor();
        if actor.is_qa {
            return Ok(());
        }
        if actor.role != RoleKind::Creator {
            return Err(AppError::RoleNotAllowed(
                "Creator 역할만 일탈을 생성할 수 있습니다.".to_string(),
            ));
        }
        if actor.department_id != department_id {
            return Err(AppError::DepartmentMismatch(
                "소속 부서의 일탈만 생성할 수 있습니다.".to_string(),
            ));
        }
        Ok(())
    }
}
