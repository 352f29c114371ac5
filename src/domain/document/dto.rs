use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::document::{self, DocumentType};
use super::entity::document_review;
use super::entity::document_version::{self, DocumentStatus};

/// 버전 증가 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VersionType {
    /// major+1, minor는 0으로
    Major,
    /// minor+1
    Minor,
}

/// 문서 컨테이너 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreateRequest {
    pub doc_type: DocumentType,
    #[validate(length(min = 1, max = 200, message = "문서 이름은 1~200자여야 합니다."))]
    pub name: String,
    #[validate(range(min = 1, message = "departmentId는 1 이상이어야 합니다."))]
    pub department_id: i64,
}

/// 문서 컨테이너 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub document_id: i64,
    pub doc_type: DocumentType,
    pub name: String,
    pub department_id: i64,
    pub document_number: String,
    pub created_by: i64,
    pub created_at: String,
}

impl From<document::Model> for DocumentResponse {
    fn from(model: document::Model) -> Self {
        Self {
            document_id: model.document_id,
            doc_type: model.doc_type,
            name: model.name,
            department_id: model.department_id,
            document_number: model.document_number,
            created_by: model.created_by,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 문서 목록 조회 파라미터
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentQueryParams {
    /// 지정 시 해당 종류만 조회
    pub doc_type: Option<DocumentType>,
    pub department_id: Option<i64>,
}

/// 버전 생성 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionCreateRequest {
    #[validate(length(min = 1, message = "본문 내용을 입력해주세요."))]
    pub content: String,
    #[validate(length(max = 500, message = "변경 요약은 최대 500자까지 허용됩니다."))]
    pub change_summary: Option<String>,
    /// 첫 버전이 아닐 때의 증가 방식 (기본 minor)
    pub version_type: Option<VersionType>,
}

/// 버전 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub version_id: i64,
    pub document_id: i64,
    pub version_number: String,
    pub status: DocumentStatus,
    pub change_summary: Option<String>,
    pub created_by: i64,
    pub created_at: String,
}

impl From<document_version::Model> for VersionResponse {
    fn from(model: document_version::Model) -> Self {
        Self {
            version_id: model.version_id,
            document_id: model.document_id,
            version_number: model.version_number,
            status: model.status,
            change_summary: model.change_summary,
            created_by: model.created_by,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// 검토/승인 판정
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum ReviewAction {
    Approved,
    Rejected,
}

/// 버전 검토 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionReviewRequest {
    pub action: ReviewAction,
    #[validate(length(min = 1, max = 1000, message = "검토 의견은 1~1000자여야 합니다."))]
    pub comment: String,
}

/// 버전 승인 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionApproveRequest {
    pub action: ReviewAction,
    #[validate(length(max = 1000, message = "승인 의견은 최대 1000자까지 허용됩니다."))]
    pub comment: Option<String>,
}

/// 검토 이력 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub review_id: i64,
    pub version_id: i64,
    pub reviewer_id: i64,
    pub comment: String,
    pub created_at: String,
}

impl From<document_review::Model> for ReviewResponse {
    fn from(model: document_review::Model) -> Self {
        Self {
            review_id: model.review_id,
            version_id: model.version_id,
            reviewer_id: model.reviewer_id,
            comment: model.comment,
            created_at: model.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}
