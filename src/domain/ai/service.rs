use tracing::info;

use crate::state::AppState;
use crate::utils::error::AppError;

use super::dto::{PolicyDraftRequest, PolicyDraftResponse};

/// 정책 초안 시스템 프롬프트
const POLICY_SYSTEM_PROMPT: &str = "당신은 제약 품질 경영 시스템(QMS) 문서 작성 보조자입니다. \
주어진 주제에 대해 목적, 적용 범위, 책임, 절차 요약 섹션을 갖춘 정책 문서 초안을 \
한국어로 작성하세요. 규제 문구는 일반적인 GMP 관행을 따르되 구체적 수치는 \
[확인 필요]로 표시하세요.";

pub struct AiService;

impl AiService {
    /// 정책 초안 생성
    pub async fn draft_policy(
        state: AppState,
        user_id: i64,
        req: PolicyDraftRequest,
    ) -> Result<PolicyDraftResponse, AppError> {
        let temperature = req.temperature.unwrap_or(0.7);

        let user_prompt = match &req.context {
            Some(context) => format!("주제: {}\n배경: {}", req.topic, context),
            None => format!("주제: {}", req.topic),
        };

        info!(user_id = user_id, topic = %req.topic, "policy draft requested");

        let draft = state
            .ai
            .complete(POLICY_SYSTEM_PROMPT, &user_prompt, temperature)
            .await?;

        Ok(PolicyDraftResponse { draft })
    }
}
