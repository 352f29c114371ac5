//! 메일 발송 클라이언트
//!
//! 수신자/제목/본문을 받는 단일 계약입니다. OTP 발송에만 쓰입니다.

use std::sync::Arc;

use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials, Message,
    SmtpTransport, Transport,
};
use tracing::info;

use crate::utils::error::AppError;

/// 메일 클라이언트 인터페이스
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MailerTrait: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// Arc로 래핑된 메일 클라이언트 (Clone 지원)
pub type Mailer = Arc<dyn MailerTrait>;

/// SMTP 릴레이 구현체
pub struct SmtpMailer {
    host: String,
    credentials: Credentials,
    from: String,
}

impl SmtpMailer {
    pub fn new(host: String, username: String, password: String, from: String) -> Self {
        Self {
            host,
            credentials: Credentials::new(username, password),
            from,
        }
    }
}

#[async_trait::async_trait]
impl MailerTrait for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let message = Message::builder()
            .from(self
                .from
                .parse()
                .map_err(|_| AppError::MailError("발신자 주소가 올바르지 않습니다.".into()))?)
            .to(to
                .parse()
                .map_err(|_| AppError::MailError("수신자 주소가 올바르지 않습니다.".into()))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::MailError(format!("메일 구성에 실패했습니다: {}", e)))?;

        let transport = SmtpTransport::relay(&self.host)
            .map_err(|e| AppError::MailError(format!("SMTP 연결에 실패했습니다: {}", e)))?
            .credentials(self.credentials.clone())
            .build();

        transport
            .send(&message)
            .map_err(|e| AppError::MailError(format!("메일 발송에 실패했습니다: {}", e)))?;

        info!(to = %to, subject = %subject, "mail sent");
        Ok(())
    }
}
