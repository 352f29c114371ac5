use serde::Serialize;
use utoipa::ToSchema;

use super::entity::attachment;

/// multipart로 수신한 파일 한 건
#[derive(Debug)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// 첨부 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    pub attachment_id: i64,
    pub field_name: String,
    pub file_name: String,
    pub url: String,
    pub uploaded_by: i64,
    pub created_at: String,
}

impl From<attachment::Model> for AttachmentResponse {
    fn from(model: attachment::Model) -> Self {
        Self {
            attachment_id: model.attachment_id,
            field_name: model.field_name,
            file_name: model.file_name,
            url: model.url,
            uploaded_by: model.uploaded_by,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
