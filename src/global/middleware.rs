use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// 감사 추적을 위해 요청마다 부여되는 식별자
#[derive(Clone)]
#[allow(dead_code)]
pub struct RequestId(pub String);

/// 느린 요청 경고 기준 (ms)
const SLOW_REQUEST_MS: u64 = 1_000;

fn resolve_request_id(request: &Request) -> String {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// 요청마다 x-request-id를 부여하고 추적 span을 구성합니다.
///
/// 품질 기록 API 특성상 모든 요청의 처리 결과를 구조화 로그로 남깁니다.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(&request);
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %path,
    );

    let start = std::time::Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        if duration_ms >= SLOW_REQUEST_MS {
            warn!(
                duration_ms = duration_ms,
                status = status,
                "slow request"
            );
        }

        info!(
            duration_ms = duration_ms,
            status = status,
            "request completed"
        );

        if let Ok(header_value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", header_value);
        }
        response
    }
    .instrument(span)
    .await
}
