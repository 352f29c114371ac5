use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set};

use crate::external::storage::ObjectStore;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::workflow::WorkflowKind;

use super::dto::{AttachmentResponse, UploadedFile};
use super::entity::attachment;

pub struct AttachmentService;

impl AttachmentService {
    /// 수신한 파일들을 스토리지에 올리고 첨부 레코드를 기록합니다.
    ///
    /// 레코드는 호출자의 트랜잭션에 묶여 상위 엔터티 생성과 함께 커밋/철회됩니다.
    /// 업로드 실패는 전체 요청 실패로 전파됩니다.
    pub async fn store_all(
        storage: &ObjectStore,
        txn: &DatabaseTransaction,
        kind: WorkflowKind,
        parent_id: i64,
        uploaded_by: i64,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<AttachmentResponse>, AppError> {
        let mut stored = Vec::with_capacity(files.len());
        let now = Utc::now().naive_utc();

        for file in files {
            let url = storage
                .upload(kind.folder(), &file.file_name, file.data)
                .await?;

            let model = attachment::ActiveModel {
                parent_kind: Set(kind),
                parent_id: Set(parent_id),
                field_name: Set(file.field_name),
                file_name: Set(file.file_name),
                url: Set(url),
                uploaded_by: Set(uploaded_by),
                created_at: Set(now),
                ..Default::default()
            };

            stored.push(model.insert(txn).await?.into());
        }

        Ok(stored)
    }

    /// 상위 엔터티의 첨부 목록
    pub async fn list(
        state: AppState,
        kind: WorkflowKind,
        parent_id: i64,
    ) -> Result<Vec<AttachmentResponse>, AppError> {
        let rows = attachment::Entity::find()
            .filter(attachment::Column::ParentKind.eq(kind))
            .filter(attachment::Column::ParentId.eq(parent_id))
            .order_by_asc(attachment::Column::AttachmentId)
            .all(&state.db)
            .await?;

        Ok(rows.into_iter().map(|a| a.into()).collect())
    }
}
