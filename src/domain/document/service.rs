use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::domain::department::entity::department;
use crate::state::AppState;
use crate::utils::auth::CurrentUser;
use crate::utils::error::AppError;
use crate::utils::refnum;
use crate::workflow::RoleKind;

use super::dto::{
    DocumentCreateRequest, DocumentQueryParams, DocumentResponse, ReviewAction, ReviewResponse,
    VersionApproveRequest, VersionCreateRequest, VersionResponse, VersionReviewRequest,
    VersionType,
};
use super::entity::document;
use super::entity::document_review;
use super::entity::document_version::{self, DocumentStatus};

/// 직전 버전 번호에서 다음 `major.minor`를 계산합니다.
///
/// 첫 버전은 1.0, minor는 minor+1, major는 major+1에 minor 0.
pub fn next_version_number(
    previous: Option<&str>,
    version_type: VersionType,
) -> Result<String, AppError> {
    let previous = match previous {
        None => return Ok("1.0".to_string()),
        Some(p) => p,
    };

    let (major_str, minor_str) = previous.split_once('.').ok_or_else(|| {
        AppError::InternalError(format!("버전 번호 형식이 올바르지 않습니다: {}", previous))
    })?;

    let major: u32 = major_str.parse().map_err(|_| {
        AppError::InternalError(format!("버전 번호 형식이 올바르지 않습니다: {}", previous))
    })?;
    let minor: u32 = minor_str.parse().map_err(|_| {
        AppError::InternalError(format!("버전 번호 형식이 올바르지 않습니다: {}", previous))
    })?;

    Ok(match version_type {
        VersionType::Minor => format!("{}.{}", major, minor + 1),
        VersionType::Major => format!("{}.0", major + 1),
    })
}

pub struct DocumentService;

impl DocumentService {
    /// 문서 컨테이너 생성 (참조 번호 부여)
    pub async fn create(
        state: AppState,
        current: &CurrentUser,
        req: DocumentCreateRequest,
    ) -> Result<DocumentResponse, AppError> {
        let txn = state.db.begin().await?;

        // 1. 부서 조회 (없으면 생성 전체 실패)
        let department_model = department::Entity::find_by_id(req.department_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 부서입니다.".to_string()))?;

        // 2. 같은 부서 + 같은 종류 범위의 순차 번호
        let existing = document::Entity::find()
            .filter(document::Column::DepartmentId.eq(req.department_id))
            .filter(document::Column::DocType.eq(req.doc_type))
            .count(&txn)
            .await?;

        let document_number =
            refnum::sequence_number(&department_model.prefix, req.doc_type.code(), existing);

        let model = document::ActiveModel {
            doc_type: Set(req.doc_type),
            name: Set(req.name),
            department_id: Set(req.department_id),
            document_number: Set(document_number.clone()),
            created_by: Set(current.user.user_id),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = model.insert(&txn).await?;
        txn.commit().await?;

        info!(
            document_id = inserted.document_id,
            document_number = %document_number,
            "document created"
        );

        Ok(inserted.into())
    }

    /// 문서 목록 조회 (종류/부서 필터)
    pub async fn list(
        state: AppState,
        params: DocumentQueryParams,
    ) -> Result<Vec<DocumentResponse>, AppError> {
        let mut query = document::Entity::find();

        if let Some(doc_type) = params.doc_type {
            query = query.filter(document::Column::DocType.eq(doc_type));
        }
        if let Some(department_id) = params.department_id {
            query = query.filter(document::Column::DepartmentId.eq(department_id));
        }

        let documents = query
            .order_by_asc(document::Column::DocumentId)
            .all(&state.db)
            .await?;

        Ok(documents.into_iter().map(|d| d.into()).collect())
    }

    pub async fn get(state: AppState, document_id: i64) -> Result<DocumentResponse, AppError> {
        let model = document::Entity::find_by_id(document_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 문서입니다.".to_string()))?;

        Ok(model.into())
    }

    /// 새 버전 생성
    ///
    /// 첫 버전은 1.0, 이후는 같은 문서의 가장 최근 버전에서 증가시킵니다.
    pub async fn create_version(
        state: AppState,
        current: &CurrentUser,
        document_id: i64,
        req: VersionCreateRequest,
    ) -> Result<VersionResponse, AppError> {
        let document_model = document::Entity::find_by_id(document_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 문서입니다.".to_string()))?;

        Self::ensure_creator(current, document_model.department_id)?;

        let latest = document_version::Entity::find()
            .filter(document_version::Column::DocumentId.eq(document_id))
            .order_by_desc(document_version::Column::VersionId)
            .one(&state.db)
            .await?;

        let version_number = next_version_number(
            latest.as_ref().map(|v| v.version_number.as_str()),
            req.version_type.unwrap_or(VersionType::Minor),
        )?;

        let now = Utc::now().naive_utc();
        let model = document_version::ActiveModel {
            document_id: Set(document_id),
            version_number: Set(version_number.clone()),
            status: Set(DocumentStatus::Draft),
            content: Set(req.content),
            change_summary: Set(req.change_summary),
            created_by: Set(current.user.user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;

        info!(
            version_id = inserted.version_id,
            version_number = %version_number,
            "document version created"
        );

        Ok(inserted.into())
    }

    pub async fn list_versions(
        state: AppState,
        document_id: i64,
    ) -> Result<Vec<VersionResponse>, AppError> {
        let document_exists = document::Entity::find_by_id(document_id)
            .one(&state.db)
            .await?;
        if document_exists.is_none() {
            return Err(AppError::NotFound("존재하지 않는 문서입니다.".to_string()));
        }

        let versions = document_version::Entity::find()
            .filter(document_version::Column::DocumentId.eq(document_id))
            .order_by_asc(document_version::Column::VersionId)
            .all(&state.db)
            .await?;

        Ok(versions.into_iter().map(|v| v.into()).collect())
    }

    /// 버전 제출 (draft → under_review)
    pub async fn submit_version(
        state: AppState,
        current: &CurrentUser,
        version_id: i64,
    ) -> Result<VersionResponse, AppError> {
        let (version_model, document_model) = Self::find_version(&state, version_id).await?;
        Self::ensure_creator(current, document_model.department_id)?;

        if version_model.status != DocumentStatus::Draft {
            return Err(AppError::InvalidStatus(
                "draft 상태의 버전만 제출할 수 있습니다.".to_string(),
            ));
        }

        let now = Utc::now().naive_utc();
        let result = document_version::Entity::update_many()
            .col_expr(
                document_version::Column::Status,
                Expr::value(DocumentStatus::UnderReview),
            )
            .col_expr(document_version::Column::SubmittedAt, Expr::value(now))
            .col_expr(document_version::Column::UpdatedAt, Expr::value(now))
            .filter(document_version::Column::VersionId.eq(version_id))
            .filter(document_version::Column::Status.eq(DocumentStatus::Draft))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "버전 상태가 이미 변경되었습니다.".to_string(),
            ));
        }

        Self::reload_version(&state, version_id).await
    }

    /// 버전 검토 (under_review → under_approval | draft), 검토 이력 기록
    pub async fn review_version(
        state: AppState,
        current: &CurrentUser,
        version_id: i64,
        req: VersionReviewRequest,
    ) -> Result<VersionResponse, AppError> {
        let (version_model, document_model) = Self::find_version(&state, version_id).await?;
        Self::ensure_reviewer(current, document_model.department_id)?;

        if version_model.status != DocumentStatus::UnderReview {
            return Err(AppError::InvalidStatus(
                "under_review 상태의 버전만 검토할 수 있습니다.".to_string(),
            ));
        }

        let next = match req.action {
            ReviewAction::Approved => DocumentStatus::UnderApproval,
            ReviewAction::Rejected => DocumentStatus::Draft,
        };

        let txn = state.db.begin().await?;

        // 검토 이력과 상태 변경을 한 트랜잭션으로
        let review = document_review::ActiveModel {
            version_id: Set(version_id),
            reviewer_id: Set(current.user.user_id),
            comment: Set(req.comment),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        review.insert(&txn).await?;

        let result = document_version::Entity::update_many()
            .col_expr(document_version::Column::Status, Expr::value(next))
            .col_expr(
                document_version::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(document_version::Column::VersionId.eq(version_id))
            .filter(document_version::Column::Status.eq(DocumentStatus::UnderReview))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::InvalidStatus(
                "버전 상태가 변경되어 검토를 적용할 수 없습니다.".to_string(),
            ));
        }

        txn.commit().await?;

        Self::reload_version(&state, version_id).await
    }

    /// 버전 승인 (under_approval → approved | draft)
    ///
    /// 승인 시 같은 문서에서 approved 상태였던 버전 하나(가장 최근 승인본)를
    /// archived로 내립니다. 승인본은 어느 시점에도 최대 1개입니다.
    pub async fn approve_version(
        state: AppState,
        current: &CurrentUser,
        version_id: i64,
        req: VersionApproveRequest,
    ) -> Result<VersionResponse, AppError> {
        let (version_model, _document_model) = Self::find_version(&state, version_id).await?;
        Self::ensure_approver(current)?;

        if version_model.status != DocumentStatus::UnderApproval {
            return Err(AppError::InvalidStatus(
                "under_approval 상태의 버전만 승인할 수 있습니다.".to_string(),
            ));
        }

        let now = Utc::now().naive_utc();
        let txn = state.db.begin().await?;

        match req.action {
            ReviewAction::Rejected => {
                let result = document_version::Entity::update_many()
                    .col_expr(
                        document_version::Column::Status,
                        Expr::value(DocumentStatus::Draft),
                    )
                    .col_expr(document_version::Column::UpdatedAt, Expr::value(now))
                    .filter(document_version::Column::VersionId.eq(version_id))
                    .filter(document_version::Column::Status.eq(DocumentStatus::UnderApproval))
                    .exec(&txn)
                    .await?;

                if result.rows_affected == 0 {
                    return Err(AppError::InvalidStatus(
                        "버전 상태가 변경되어 반려를 적용할 수 없습니다.".to_string(),
                    ));
                }
            }
            ReviewAction::Approved => {
                // 1. 기존 승인본 중 가장 최근 것 하나만 archived로
                let prior = document_version::Entity::find()
                    .filter(document_version::Column::DocumentId.eq(version_model.document_id))
                    .filter(document_version::Column::Status.eq(DocumentStatus::Approved))
                    .filter(document_version::Column::VersionId.ne(version_id))
                    .order_by_desc(document_version::Column::ApprovedAt)
                    .one(&txn)
                    .await?;

                if let Some(prior_model) = prior {
                    let mut active: document_version::ActiveModel = prior_model.into();
                    active.status = Set(DocumentStatus::Archived);
                    active.updated_at = Set(now);
                    active.update(&txn).await?;
                }

                // 2. 대상 버전 승인
                let result = document_version::Entity::update_many()
                    .col_expr(
                        document_version::Column::Status,
                        Expr::value(DocumentStatus::Approved),
                    )
                    .col_expr(
                        document_version::Column::ApprovedBy,
                        Expr::value(current.user.user_id),
                    )
                    .col_expr(document_version::Column::ApprovedAt, Expr::value(now))
                    .col_expr(document_version::Column::UpdatedAt, Expr::value(now))
                    .filter(document_version::Column::VersionId.eq(version_id))
                    .filter(document_version::Column::Status.eq(DocumentStatus::UnderApproval))
                    .exec(&txn)
                    .await?;

                if result.rows_affected == 0 {
                    return Err(AppError::InvalidStatus(
                        "버전 상태가 변경되어 승인을 적용할 수 없습니다.".to_string(),
                    ));
                }
            }
        }

        txn.commit().await?;

        info!(version_id = version_id, action = ?req.action, "document version approval processed");

        Self::reload_version(&state, version_id).await
    }

    pub async fn list_reviews(
        state: AppState,
        version_id: i64,
    ) -> Result<Vec<ReviewResponse>, AppError> {
        let version_exists = document_version::Entity::find_by_id(version_id)
            .one(&state.db)
            .await?;
        if version_exists.is_none() {
            return Err(AppError::NotFound(
                "존재하지 않는 문서 버전입니다.".to_string(),
            ));
        }

        let reviews = document_review::Entity::find()
            .filter(document_review::Column::VersionId.eq(version_id))
            .order_by_asc(document_review::Column::ReviewId)
            .all(&state.db)
            .await?;

        Ok(reviews.into_iter().map(|r| r.into()).collect())
    }

    async fn find_version(
        state: &AppState,
        version_id: i64,
    ) -> Result<(document_version::Model, document::Model), AppError> {
        let version_model = document_version::Entity::find_by_id(version_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 문서 버전입니다.".to_string()))?;

        let document_model = document::Entity::find_by_id(version_model.document_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("버전의 상위 문서를 찾을 수 없습니다.".to_string())
            })?;

        Ok((version_model, document_model))
    }

    async fn reload_version(state: &AppState, version_id: i64) -> Result<VersionResponse, AppError> {
        let model = document_version::Entity::find_by_id(version_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 문서 버전입니다.".to_string()))?;
        Ok(model.into())
    }

    fn ensure_creator(current: &CurrentUser, department_id: i64) -> Result<(), AppError> {
        let actor = current.actor();
        if actor.is_qa {
            return Ok(());
        }
        if actor.role != RoleKind::Creator {
            return Err(AppError::RoleNotAllowed(
                "Creator 역할만 문서 버전을 작성/제출할 수 있습니다.".to_string(),
            ));
        }
        if actor.department_id != department_id {
            return Err(AppError::DepartmentMismatch(
                "소속 부서의 문서만 작성/제출할 수 있습니다.".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_reviewer(current: &CurrentUser, department_id: i64) -> Result<(), AppError> {
        let actor = current.actor();
        if actor.role != RoleKind::Reviewer {
            return Err(AppError::RoleNotAllowed(
                "Reviewer 역할만 문서 버전을 검토할 수 있습니다.".to_string(),
            ));
        }
        if actor.department_id != department_id && !actor.is_qa {
            return Err(AppError::DepartmentMismatch(
                "해당 부서 또는 QA 소속 Reviewer만 검토할 수 있습니다.".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_approver(current: &CurrentUser) -> Result<(), AppError> {
        if current.actor().role != RoleKind::Approver {
            return Err(AppError::RoleNotAllowed(
                "Approver 역할만 문서 버전을 승인할 수 있습니다.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_version_defaults_to_1_0() {
        assert_eq!(next_version_number(None, VersionType::Minor).unwrap(), "1.0");
        assert_eq!(next_version_number(None, VersionType::Major).unwrap(), "1.0");
    }

    #[test]
    fn minor_increments_minor_only() {
        assert_eq!(
            next_version_number(Some("1.0"), VersionType::Minor).unwrap(),
            "1.1"
        );
        assert_eq!(
            next_version_number(Some("2.9"), VersionType::Minor).unwrap(),
            "2.10"
        );
    }

    #[test]
    fn major_increments_major_and_resets_minor() {
        assert_eq!(
            next_version_number(Some("1.4"), VersionType::Major).unwrap(),
            "2.0"
        );
        assert_eq!(
            next_version_number(Some("3.0"), VersionType::Major).unwrap(),
            "4.0"
        );
    }

    #[test]
    fn malformed_previous_number_is_an_error() {
        assert!(next_version_number(Some("abc"), VersionType::Minor).is_err());
        assert!(next_version_number(Some("1"), VersionType::Minor).is_err());
        assert!(next_version_number(Some("1.x"), VersionType::Major).is_err());
    }
}
