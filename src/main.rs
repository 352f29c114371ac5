use std::net::SocketAddr;
use std::sync::Arc;

use qms_server::app;
use qms_server::config::{establish_connection, AppConfig};
use qms_server::domain::ai::client::OpenAiClient;
use qms_server::external::mail::SmtpMailer;
use qms_server::external::storage::S3ObjectStore;
use qms_server::state::AppState;
use qms_server::utils::logging::init_logging;
use qms_server::utils::otp::OtpStore;

#[tokio::main]
async fn main() {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 종료 시까지 유지)
    let _guard = init_logging();

    // 3. 설정 로드
    let config = AppConfig::from_env().expect("설정 로드에 실패했습니다");

    // 4. DB 연결
    let db = establish_connection(&config.database_url)
        .await
        .expect("데이터베이스 연결에 실패했습니다");

    // 5. 외부 협력자 구성
    let storage = Arc::new(
        S3ObjectStore::from_env(
            config.storage_bucket.clone(),
            config.storage_public_url.clone(),
        )
        .await,
    );
    let mailer = Arc::new(SmtpMailer::new(
        config.smtp_host.clone(),
        config.smtp_username.clone(),
        config.smtp_password.clone(),
        config.mail_from.clone(),
    ));
    let ai = Arc::new(OpenAiClient::new(&config.openai_api_key));
    let otp_store = Arc::new(OtpStore::new(config.otp_ttl_seconds));

    let server_port = config.server_port;
    let state = AppState {
        db,
        config,
        otp_store,
        storage,
        mailer,
        ai,
    };

    // 6. 라우터 설정 및 서버 실행
    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("리스너 바인딩에 실패했습니다");
    axum::serve(listener, app)
        .await
        .expect("서버 실행에 실패했습니다");
}
