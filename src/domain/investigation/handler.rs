use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::response::ErrorResponse;
use crate::utils::BaseResponse;

use super::dto::{InvestigationTeamResponse, TeamMembersUpdateRequest};
use super::service::InvestigationService;

/// 조사팀 단건 조회 API
#[utoipa::path(
    get,
    path = "/api/investigation-teams/{teamId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조사팀 조회 성공"),
        (status = 404, description = "조사팀 없음", body = ErrorResponse)
    ),
    tag = "InvestigationTeam"
)]
pub async fn get_team(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(team_id): Path<i64>,
) -> Result<Json<BaseResponse<InvestigationTeamResponse>>, AppError> {
    let result = InvestigationService::get(state, team_id).await?;
    Ok(Json(BaseResponse::success(result)))
}

/// 조사팀 구성원 교체 API
#[utoipa::path(
    put,
    path = "/api/investigation-teams/{teamId}/members",
    request_body = TeamMembersUpdateRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "구성원 교체 성공"),
        (status = 404, description = "조사팀 또는 사용자 없음", body = ErrorResponse)
    ),
    tag = "InvestigationTeam"
)]
pub async fn update_team_members(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(team_id): Path<i64>,
    Json(req): Json<TeamMembersUpdateRequest>,
) -> Result<Json<BaseResponse<InvestigationTeamResponse>>, AppError> {
    req.validate()?;

    let result = InvestigationService::update_members(state, team_id, req).await?;
    Ok(Json(BaseResponse::with_message(
        "조사팀 구성원이 변경되었습니다.",
        result,
    )))
}

/// 조사팀 삭제 API (상태 제약 없음)
#[utoipa::path(
    delete,
    path = "/api/investigation-teams/{teamId}",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조사팀 삭제 성공"),
        (status = 404, description = "조사팀 없음", body = ErrorResponse)
    ),
    tag = "InvestigationTeam"
)]
pub async fn delete_team(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(team_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    InvestigationService::delete(state, team_id).await?;
    Ok(Json(BaseResponse::message_only("조사팀이 삭제되었습니다.")))
}
