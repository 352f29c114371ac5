//! multipart 요청 분해
//!
//! 워크플로우 엔터티 생성 엔드포인트가 공통으로 사용합니다.

use axum::extract::Multipart;

use crate::utils::error::AppError;

use super::dto::UploadedFile;

/// 첨부로 수집하는 파일 필드명
const FILE_FIELDS: [&str; 2] = ["detailedDescriptionAttachments", "supportingDocuments"];

/// `data` JSON 파트와 파일 파트들을 분리합니다.
///
/// 지정된 파일 필드명 외의 파트는 무시합니다. `data` 파트가 없으면 400.
pub async fn parse_multipart<T: serde::de::DeserializeOwned>(
    mut multipart: Multipart,
) -> Result<(T, Vec<UploadedFile>), AppError> {
    let mut data: Option<T> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("multipart 파싱에 실패했습니다: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "data" {
            let bytes = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("data 파트를 읽을 수 없습니다: {}", e))
            })?;
            data = Some(
                serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::JsonParseFailed(e.to_string()))?,
            );
        } else if FILE_FIELDS.contains(&name.as_str()) {
            let file_name = field.file_name().unwrap_or("unnamed").to_string();
            let bytes = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("파일 파트를 읽을 수 없습니다: {}", e))
            })?;
            files.push(UploadedFile {
                field_name: name,
                file_name,
                data: bytes.to_vec(),
            });
        }
    }

    let data = data.ok_or_else(|| {
        AppError::BadRequest("multipart 요청에 data 파트가 필요합니다.".to_string())
    })?;

    Ok((data, files))
}
