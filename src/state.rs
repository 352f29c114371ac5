use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::domain::ai::client::AiClient;
use crate::external::mail::Mailer;
use crate::external::storage::ObjectStore;
use crate::utils::otp::OtpStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub otp_store: Arc<OtpStore>,
    pub storage: ObjectStore,
    pub mailer: Mailer,
    pub ai: AiClient,
}
