use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

use crate::domain::auth::entity::user;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::workflow::WorkflowKind;

use super::dto::{InvestigationTeamResponse, TeamMembersUpdateRequest};
use super::entity::{investigation_team, team_member};

pub struct InvestigationService;

impl InvestigationService {
    /// 상위 엔터티의 트랜잭션 안에서 조사팀과 구성원 레코드를 만듭니다.
    ///
    /// 구성원 사용자 존재를 먼저 확인하며, 한 명이라도 없으면 전체가 실패합니다.
    pub async fn create_for_parent(
        txn: &DatabaseTransaction,
        kind: WorkflowKind,
        parent_id: i64,
        created_by: i64,
        member_ids: &[i64],
        remarks: Option<String>,
    ) -> Result<investigation_team::Model, AppError> {
        Self::ensure_users_exist(txn, member_ids).await?;

        let now = Utc::now().naive_utc();
        let team = investigation_team::ActiveModel {
            parent_kind: Set(kind),
            parent_id: Set(parent_id),
            created_by: Set(created_by),
            remarks: Set(remarks),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let team_model = team.insert(txn).await?;

        for user_id in member_ids {
            let member = team_member::ActiveModel {
                team_id: Set(team_model.team_id),
                user_id: Set(*user_id),
                created_at: Set(now),
                ..Default::default()
            };
            member.insert(txn).await?;
        }

        info!(
            team_id = team_model.team_id,
            parent_id = parent_id,
            member_count = member_ids.len(),
            "investigation team created"
        );

        Ok(team_model)
    }

    /// 팀 구성원 user_id 목록 (권한 판정용)
    pub async fn member_ids(state: &AppState, team_id: i64) -> Result<Vec<i64>, AppError> {
        let members = team_member::Entity::find()
            .filter(team_member::Column::TeamId.eq(team_id))
            .all(&state.db)
            .await?;

        Ok(members.into_iter().map(|m| m.user_id).collect())
    }

    pub async fn get(
        state: AppState,
        team_id: i64,
    ) -> Result<InvestigationTeamResponse, AppError> {
        let team_model = investigation_team::Entity::find_by_id(team_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 조사팀입니다.".to_string()))?;

        let member_ids = Self::member_ids(&state, team_id).await?;
        Ok(InvestigationTeamResponse::from_model(team_model, member_ids))
    }

    /// 구성원 교체 (삭제 전까지 변경 가능)
    pub async fn update_members(
        state: AppState,
        team_id: i64,
        req: TeamMembersUpdateRequest,
    ) -> Result<InvestigationTeamResponse, AppError> {
        let team_model = investigation_team::Entity::find_by_id(team_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("존재하지 않는 조사팀입니다.".to_string()))?;

        let txn = state.db.begin().await?;

        Self::ensure_users_exist(&txn, &req.member_ids).await?;

        team_member::Entity::delete_many()
            .filter(team_member::Column::TeamId.eq(team_id))
            .exec(&txn)
            .await?;

        let now = Utc::now().naive_utc();
        for user_id in &req.member_ids {
            let member = team_member::ActiveModel {
                team_id: Set(team_id),
                user_id: Set(*user_id),
                created_at: Set(now),
                ..Default::default()
            };
            member.insert(&txn).await?;
        }

        let mut active: investigation_team::ActiveModel = team_model.into();
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        Ok(InvestigationTeamResponse::from_model(
            updated,
            req.member_ids,
        ))
    }

    /// 조사팀 삭제 (상태 제약 없음)
    pub async fn delete(state: AppState, team_id: i64) -> Result<(), AppError> {
        let team_exists = investigation_team::Entity::find_by_id(team_id)
            .one(&state.db)
            .await?;
        if team_exists.is_none() {
            return Err(AppError::NotFound("존재하지 않는 조사팀입니다.".to_string()));
        }

        let txn = state.db.begin().await?;

        team_member::Entity::delete_many()
            .filter(team_member::Column::TeamId.eq(team_id))
            .exec(&txn)
            .await?;

        investigation_team::Entity::delete_by_id(team_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(team_id = team_id, "investigation team deleted");
        Ok(())
    }

    async fn ensure_users_exist(
        txn: &DatabaseTransaction,
        member_ids: &[i64],
    ) -> Result<(), AppError> {
        let found = user::Entity::find()
            .filter(user::Column::UserId.is_in(member_ids.to_vec()))
            .order_by_asc(user::Column::UserId)
            .all(txn)
            .await?;

        let found_ids: Vec<i64> = found.iter().map(|u| u.user_id).collect();
        for id in member_ids {
            if !found_ids.contains(id) {
                return Err(AppError::NotFound(format!(
                    "존재하지 않는 사용자입니다: {}",
                    id
                )));
            }
        }
        Ok(())
    }
}
