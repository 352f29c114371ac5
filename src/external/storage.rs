//! 오브젝트 스토리지 클라이언트
//!
//! 업로드는 (폴더, 파일명, 바이트) → 공개 URL 계약 하나로 추상화합니다.

use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use tracing::info;
use uuid::Uuid;

use crate::utils::error::AppError;

/// 스토리지 클라이언트 인터페이스
///
/// 업로드 호출을 추상화하여 테스트에서 Mock 객체로 대체할 수 있습니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ObjectStoreTrait: Send + Sync {
    /// 파일을 업로드하고 공개 URL을 반환합니다.
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<String, AppError>;
}

/// Arc로 래핑된 스토리지 클라이언트 (Clone 지원)
pub type ObjectStore = Arc<dyn ObjectStoreTrait>;

/// S3 호환 스토리지 구현체
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    public_base_url: String,
}

impl S3ObjectStore {
    pub async fn from_env(bucket: String, public_base_url: String) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&sdk_config),
            bucket,
            public_base_url,
        }
    }
}

#[async_trait::async_trait]
impl ObjectStoreTrait for S3ObjectStore {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> Result<String, AppError> {
        let content_type = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .to_string();

        // 같은 이름의 파일이 덮어써지지 않도록 키에 UUID를 섞는다
        let key = format!("{}/{}_{}", folder, Uuid::new_v4(), file_name);
        let size = data.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| AppError::StorageError(format!("파일 업로드에 실패했습니다: {}", e)))?;

        info!(key = %key, size = size, "file uploaded");

        Ok(format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key
        ))
    }
}
