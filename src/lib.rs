pub mod config;
pub mod domain;
pub mod external;
pub mod global;
pub mod state;
pub mod utils;
pub mod workflow;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

/// Bearer 인증 스키마 등록
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        domain::auth::handler::signup,
        domain::auth::handler::login,
        domain::auth::handler::me,
        domain::auth::handler::send_otp,
        domain::auth::handler::verify_otp,
        domain::deviation::handler::create_deviation,
        domain::deviation::handler::submit_deviation,
        domain::deviation::handler::review_deviation,
        domain::deviation::handler::qa_review_deviation,
        domain::deviation::handler::create_deviation_team,
        domain::deviation::handler::record_deviation_impact,
        domain::capa::handler::create_capa,
        domain::capa::handler::submit_capa,
        domain::capa::handler::review_capa,
        domain::capa::handler::qa_review_capa,
        domain::capa::handler::record_capa_investigation,
        domain::capa::handler::start_capa_immediate_actions,
        domain::capa::handler::initiate_capa_change_control,
        domain::change_control::handler::create_change_control,
        domain::change_control::handler::submit_change_control,
        domain::change_control::handler::record_historical_check,
        domain::change_control::handler::acknowledge_change_control,
        domain::change_control::handler::close_change_control,
        domain::document::handler::create_document,
        domain::document::handler::create_version,
        domain::document::handler::approve_version,
        domain::ai::handler::draft_policy,
    ),
    components(
        schemas(
            domain::auth::dto::SignupRequest,
            domain::auth::dto::LoginRequest,
            domain::auth::dto::TokenResponse,
            domain::auth::dto::UserResponse,
            domain::auth::dto::OtpSendRequest,
            domain::auth::dto::OtpVerifyRequest,
            domain::ai::dto::PolicyDraftRequest,
            domain::ai::dto::PolicyDraftResponse,
            workflow::ReviewRequest,
            workflow::ReviewDecision,
            workflow::WorkflowStatus,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Auth", description = "인증/계정 API"),
        (name = "Deviation", description = "일탈 관리 API"),
        (name = "Capa", description = "CAPA 관리 API"),
        (name = "ChangeControl", description = "변경 관리 API"),
        (name = "Document", description = "문서/버전 관리 API")
    )
)]
pub struct ApiDoc;

/// 전체 라우터 구성
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "OK" }))
        // 인증/OTP
        .route("/api/auth/signup", post(domain::auth::handler::signup))
        .route("/api/auth/login", post(domain::auth::handler::login))
        .route("/api/auth/me", get(domain::auth::handler::me))
        .route("/api/otp/send", post(domain::auth::handler::send_otp))
        .route("/api/otp/verify", post(domain::auth::handler::verify_otp))
        // 역할
        .route(
            "/api/roles",
            post(domain::role::handler::create_role).get(domain::role::handler::list_roles),
        )
        .route(
            "/api/roles/:roleId",
            get(domain::role::handler::get_role)
                .put(domain::role::handler::update_role)
                .delete(domain::role::handler::delete_role),
        )
        // 부서
        .route(
            "/api/departments",
            post(domain::department::handler::create_department)
                .get(domain::department::handler::list_departments),
        )
        .route(
            "/api/departments/:departmentId",
            get(domain::department::handler::get_department)
                .put(domain::department::handler::update_department)
                .delete(domain::department::handler::delete_department),
        )
        // 권한
        .route(
            "/api/permissions",
            post(domain::permission::handler::create_permission)
                .get(domain::permission::handler::list_permissions),
        )
        .route(
            "/api/permissions/:permissionId",
            delete(domain::permission::handler::delete_permission),
        )
        .route(
            "/api/role-permissions",
            post(domain::permission::handler::assign_role_permission),
        )
        .route(
            "/api/roles/:roleId/permissions",
            get(domain::permission::handler::list_role_permissions),
        )
        .route(
            "/api/role-permissions/:rolePermissionId",
            delete(domain::permission::handler::unassign_role_permission),
        )
        // 장소
        .route(
            "/api/locations",
            post(domain::location::handler::create_location)
                .get(domain::location::handler::list_locations),
        )
        .route(
            "/api/locations/:locationId",
            get(domain::location::handler::get_location)
                .put(domain::location::handler::update_location)
                .delete(domain::location::handler::delete_location),
        )
        // 설비
        .route(
            "/api/equipment",
            post(domain::equipment::handler::create_equipment)
                .get(domain::equipment::handler::list_equipment),
        )
        .route(
            "/api/equipment/:equipmentId",
            get(domain::equipment::handler::get_equipment)
                .put(domain::equipment::handler::update_equipment)
                .delete(domain::equipment::handler::delete_equipment),
        )
        // 질문
        .route(
            "/api/questions",
            post(domain::question::handler::create_question)
                .get(domain::question::handler::list_questions),
        )
        .route(
            "/api/questions/:questionId",
            get(domain::question::handler::get_question)
                .put(domain::question::handler::update_question)
                .delete(domain::question::handler::delete_question),
        )
        // 문서 / 버전 / 검토
        .route(
            "/api/documents",
            post(domain::document::handler::create_document)
                .get(domain::document::handler::list_documents),
        )
        .route(
            "/api/documents/:documentId",
            get(domain::document::handler::get_document),
        )
        .route(
            "/api/documents/:documentId/versions",
            post(domain::document::handler::create_version)
                .get(domain::document::handler::list_versions),
        )
        .route(
            "/api/document-versions/:versionId/submit",
            post(domain::document::handler::submit_version),
        )
        .route(
            "/api/document-versions/:versionId/reviews",
            post(domain::document::handler::review_version)
                .get(domain::document::handler::list_reviews),
        )
        .route(
            "/api/document-versions/:versionId/approve",
            post(domain::document::handler::approve_version),
        )
        // 일탈
        .route(
            "/api/deviations",
            post(domain::deviation::handler::create_deviation)
                .get(domain::deviation::handler::list_deviations),
        )
        .route(
            "/api/deviations/:deviationId",
            get(domain::deviation::handler::get_deviation),
        )
        .route(
            "/api/deviations/:deviationId/submit",
            post(domain::deviation::handler::submit_deviation),
        )
        .route(
            "/api/deviations/:deviationId/review",
            post(domain::deviation::handler::review_deviation),
        )
        .route(
            "/api/deviations/:deviationId/qa-review",
            post(domain::deviation::handler::qa_review_deviation),
        )
        .route(
            "/api/deviations/:deviationId/investigation-team",
            post(domain::deviation::handler::create_deviation_team),
        )
        .route(
            "/api/deviations/:deviationId/impact-assessment",
            post(domain::deviation::handler::record_deviation_impact)
                .get(domain::deviation::handler::get_deviation_impact),
        )
        .route(
            "/api/deviations/:deviationId/attachments",
            get(domain::deviation::handler::list_deviation_attachments),
        )
        .route(
            "/api/deviation-categories",
            post(domain::deviation::handler::create_deviation_category)
                .get(domain::deviation::handler::list_deviation_categories),
        )
        // 조사팀
        .route(
            "/api/investigation-teams/:teamId",
            get(domain::investigation::handler::get_team)
                .delete(domain::investigation::handler::delete_team),
        )
        .route(
            "/api/investigation-teams/:teamId/members",
            put(domain::investigation::handler::update_team_members),
        )
        // CAPA
        .route(
            "/api/capa",
            post(domain::capa::handler::create_capa).get(domain::capa::handler::list_capa),
        )
        .route("/api/capa/:capaId", get(domain::capa::handler::get_capa))
        .route(
            "/api/capa/:capaId/submit",
            post(domain::capa::handler::submit_capa),
        )
        .route(
            "/api/capa/:capaId/review",
            post(domain::capa::handler::review_capa),
        )
        .route(
            "/api/capa/:capaId/qa-review",
            post(domain::capa::handler::qa_review_capa),
        )
        .route(
            "/api/capa/:capaId/investigation-team",
            post(domain::capa::handler::create_capa_team),
        )
        .route(
            "/api/capa/:capaId/investigation",
            post(domain::capa::handler::record_capa_investigation),
        )
        .route(
            "/api/capa/:capaId/impact-assessment",
            get(domain::capa::handler::get_capa_impact),
        )
        .route(
            "/api/capa/:capaId/immediate-actions",
            post(domain::capa::handler::start_capa_immediate_actions),
        )
        .route(
            "/api/capa/:capaId/initiate-change-control",
            post(domain::capa::handler::initiate_capa_change_control),
        )
        // 변경 관리
        .route(
            "/api/change-controls",
            post(domain::change_control::handler::create_change_control)
                .get(domain::change_control::handler::list_change_controls),
        )
        .route(
            "/api/change-controls/:changeControlId",
            get(domain::change_control::handler::get_change_control),
        )
        .route(
            "/api/change-controls/:changeControlId/submit",
            post(domain::change_control::handler::submit_change_control),
        )
        .route(
            "/api/change-controls/:changeControlId/review",
            post(domain::change_control::handler::review_change_control),
        )
        .route(
            "/api/change-controls/:changeControlId/qa-review",
            post(domain::change_control::handler::qa_review_change_control),
        )
        .route(
            "/api/change-controls/:changeControlId/investigation-team",
            post(domain::change_control::handler::create_change_control_team),
        )
        .route(
            "/api/change-controls/:changeControlId/impact-assessment",
            post(domain::change_control::handler::record_change_control_impact)
                .get(domain::change_control::handler::get_change_control_impact),
        )
        .route(
            "/api/change-controls/:changeControlId/historical-check",
            post(domain::change_control::handler::record_historical_check)
                .get(domain::change_control::handler::list_historical_checks),
        )
        .route(
            "/api/change-controls/:changeControlId/acknowledge",
            post(domain::change_control::handler::acknowledge_change_control),
        )
        .route(
            "/api/change-controls/:changeControlId/close",
            post(domain::change_control::handler::close_change_control),
        )
        .route(
            "/api/change-categories",
            post(domain::change_control::handler::create_change_category)
                .get(domain::change_control::handler::list_change_categories),
        )
        // AI 보조
        .route("/api/ai/policy-draft", post(domain::ai::handler::draft_policy))
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
