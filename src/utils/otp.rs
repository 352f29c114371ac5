//! OTP 코드 저장소
//!
//! 프로세스 수명 동안만 유지되는 키-값 TTL 캐시입니다.
//! 재시작 시 코드가 사라지는 것은 허용된 동작입니다 (재발급으로 복구).

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, NaiveDateTime, Utc};
use rand::Rng;

use super::error::AppError;

struct OtpEntry {
    code: String,
    expires_at: NaiveDateTime,
}

/// 이메일 → (코드, 만료 시각) TTL 맵
pub struct OtpStore {
    entries: Mutex<HashMap<String, OtpEntry>>,
    ttl_seconds: i64,
}

impl OtpStore {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl_seconds,
        }
    }

    /// 6자리 숫자 코드를 발급하고 기존 코드를 대체합니다.
    pub fn issue(&self, email: &str) -> String {
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        let expires_at = Utc::now().naive_utc() + Duration::seconds(self.ttl_seconds);

        let mut entries = self.entries.lock().expect("otp store lock poisoned");
        // 접근 시점에 만료 엔트리 정리
        let now = Utc::now().naive_utc();
        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            email.to_string(),
            OtpEntry {
                code: code.clone(),
                expires_at,
            },
        );
        code
    }

    /// 코드를 검증하고 성공 시 소모합니다.
    pub fn verify(&self, email: &str, code: &str) -> Result<(), AppError> {
        let mut entries = self.entries.lock().expect("otp store lock poisoned");

        let entry = entries
            .get(email)
            .ok_or_else(|| AppError::OtpInvalid("발급된 인증 코드가 없습니다.".to_string()))?;

        let expired = entry.expires_at <= Utc::now().naive_utc();
        let code_matches = entry.code == code;

        if expired {
            entries.remove(email);
            return Err(AppError::OtpExpired(
                "인증 코드가 만료되었습니다. 다시 요청해주세요.".to_string(),
            ));
        }

        if !code_matches {
            return Err(AppError::OtpInvalid(
                "인증 코드가 일치하지 않습니다.".to_string(),
            ));
        }

        entries.remove(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_issue_six_digit_code() {
        let store = OtpStore::new(300);
        let code = store.issue("user@example.com");
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn should_verify_and_consume_code() {
        let store = OtpStore::new(300);
        let code = store.issue("user@example.com");

        assert!(store.verify("user@example.com", &code).is_ok());
        // 소모된 코드는 재사용 불가
        assert!(store.verify("user@example.com", &code).is_err());
    }

    #[test]
    fn should_reject_wrong_code() {
        let store = OtpStore::new(300);
        let code = store.issue("user@example.com");
        let wrong = if code == "000000" { "000001" } else { "000000" };

        let result = store.verify("user@example.com", wrong);
        assert!(matches!(result, Err(AppError::OtpInvalid(_))));
    }

    #[test]
    fn should_reject_expired_code() {
        let store = OtpStore::new(-1);
        let code = store.issue("user@example.com");

        let result = store.verify("user@example.com", &code);
        assert!(matches!(result, Err(AppError::OtpExpired(_))));
    }

    #[test]
    fn should_reject_unknown_email() {
        let store = OtpStore::new(300);
        let result = store.verify("nobody@example.com", "123456");
        assert!(matches!(result, Err(AppError::OtpInvalid(_))));
    }
}
