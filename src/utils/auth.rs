use axum::{
    async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts,
};
use sea_orm::EntityTrait;

use crate::domain::auth::entity::user;
use crate::domain::department::entity::department;
use crate::domain::role::entity::role;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_token, Claims};
use crate::workflow::{ActorContext, RoleKind};

/// 인증된 사용자 정보를 담는 Extractor
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// JWT Claims에서 사용자 ID를 추출합니다.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| AppError::Unauthorized("유효하지 않은 사용자 ID입니다.".to_string()))
    }

    /// 역할/부서가 함께 로드된 사용자 컨텍스트를 조회합니다.
    pub async fn load(&self, state: &AppState) -> Result<CurrentUser, AppError> {
        CurrentUser::load(state, self.user_id()?).await
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Authorization 헤더에서 Bearer 토큰 추출
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("로그인이 필요합니다.".to_string()))?;

        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("잘못된 헤더 형식입니다.".to_string()))?;

        if !auth_header_str.starts_with("Bearer ") {
            return Err(AppError::Unauthorized(
                "토큰 형식이 올바르지 않습니다.".to_string(),
            ));
        }

        let token = &auth_header_str[7..];

        // 토큰 검증 및 디코딩
        let claims = decode_token(token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

/// 역할과 부서가 로드된 현재 사용자
///
/// 모든 보호된 라우트는 권한 판정 전에 이 컨텍스트를 로드합니다.
pub struct CurrentUser {
    pub user: user::Model,
    pub role: role::Model,
    pub department: department::Model,
}

impl CurrentUser {
    pub async fn load(state: &AppState, user_id: i64) -> Result<Self, AppError> {
        let user_model = user::Entity::find_by_id(user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::Unauthorized("존재하지 않는 사용자입니다.".to_string()))?;

        let role_model = role::Entity::find_by_id(user_model.role_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("사용자의 역할 정보를 찾을 수 없습니다.".to_string())
            })?;

        let department_model = department::Entity::find_by_id(user_model.department_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("사용자의 부서 정보를 찾을 수 없습니다.".to_string())
            })?;

        Ok(Self {
            user: user_model,
            role: role_model,
            department: department_model,
        })
    }

    /// 워크플로우 권한 판정에 쓰이는 행위자 컨텍스트
    pub fn actor(&self) -> ActorContext {
        ActorContext {
            user_id: self.user.user_id,
            role: RoleKind::from_name(&self.role.name),
            department_id: self.department.department_id,
            is_qa: self.department.is_qa,
        }
    }
}
