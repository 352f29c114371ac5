use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use tracing::info;

use crate::domain::department::entity::department;
use crate::domain::role::entity::role;
use crate::state::AppState;
use crate::utils::auth::CurrentUser;
use crate::utils::error::AppError;
use crate::utils::jwt;

use super::dto::{
    LoginRequest, OtpSendRequest, OtpVerifyRequest, ProfileResponse, SignupRequest, TokenResponse,
    UserResponse,
};
use super::entity::user;

pub struct AuthService;

impl AuthService {
    /// 회원 가입
    pub async fn signup(state: AppState, req: SignupRequest) -> Result<UserResponse, AppError> {
        // 1. 이메일 중복 확인
        let exists = user::Entity::find()
            .filter(user::Column::Email.eq(&req.email))
            .one(&state.db)
            .await?;

        if exists.is_some() {
            return Err(AppError::Conflict(
                "이미 가입된 이메일입니다.".to_string(),
            ));
        }

        // 2. 역할/부서 존재 확인
        let role_exists = role::Entity::find_by_id(req.role_id).one(&state.db).await?;
        if role_exists.is_none() {
            return Err(AppError::NotFound("존재하지 않는 역할입니다.".to_string()));
        }

        let department_exists = department::Entity::find_by_id(req.department_id)
            .one(&state.db)
            .await?;
        if department_exists.is_none() {
            return Err(AppError::NotFound("존재하지 않는 부서입니다.".to_string()));
        }

        // 3. 비밀번호 해싱
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱에 실패했습니다: {}", e)))?
            .to_string();

        // 4. 사용자 생성
        let now = Utc::now().naive_utc();
        let model = user::ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(password_hash),
            role_id: Set(req.role_id),
            department_id: Set(req.department_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model.insert(&state.db).await?;

        info!(user_id = inserted.user_id, "user signed up");

        Ok(inserted.into())
    }

    /// 로그인 및 토큰 발급
    pub async fn login(state: AppState, req: LoginRequest) -> Result<TokenResponse, AppError> {
        // 1. 사용자 조회
        let user_model = user::Entity::find()
            .filter(user::Column::Email.eq(&req.email))
            .one(&state.db)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("이메일 또는 비밀번호가 올바르지 않습니다.".to_string())
            })?;

        // 2. 비밀번호 검증
        let parsed_hash = PasswordHash::new(&user_model.password_hash)
            .map_err(|_| AppError::InternalError("저장된 해시가 손상되었습니다.".to_string()))?;

        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            return Err(AppError::Unauthorized(
                "이메일 또는 비밀번호가 올바르지 않습니다.".to_string(),
            ));
        }

        // 3. 토큰 발급
        let token = jwt::encode_token(
            user_model.user_id.to_string(),
            &state.config.jwt_secret,
            state.config.jwt_expiration,
        )?;

        info!(user_id = user_model.user_id, "user logged in");

        Ok(TokenResponse {
            token,
            user: user_model.into(),
        })
    }

    /// 현재 사용자 프로필
    pub async fn me(state: AppState, user_id: i64) -> Result<ProfileResponse, AppError> {
        let current = CurrentUser::load(&state, user_id).await?;

        Ok(ProfileResponse {
            user_id: current.user.user_id,
            name: current.user.name,
            email: current.user.email,
            role_name: current.role.name,
            department_name: current.department.name,
            is_qa: current.department.is_qa,
        })
    }

    /// OTP 발송
    pub async fn send_otp(state: AppState, req: OtpSendRequest) -> Result<(), AppError> {
        let code = state.otp_store.issue(&req.email);

        state
            .mailer
            .send(
                &req.email,
                "[QMS] 인증 코드",
                &format!(
                    "인증 코드는 {} 입니다. {}분 내에 입력해주세요.",
                    code,
                    state.config.otp_ttl_seconds / 60
                ),
            )
            .await?;

        info!(email = %req.email, "otp sent");
        Ok(())
    }

    /// OTP 검증 (성공 시 코드 소모)
    pub async fn verify_otp(state: AppState, req: OtpVerifyRequest) -> Result<(), AppError> {
        state.otp_store.verify(&req.email, &req.code)
    }
}
