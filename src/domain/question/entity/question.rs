use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 질문 응답 유형
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ResponseKind")]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// 예/아니오 (boolean)
    #[sea_orm(string_value = "yes_no")]
    YesNo,
    /// 1~5 평점 (integer)
    #[sea_orm(string_value = "rating")]
    Rating,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "question")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub question_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub response_kind: ResponseKind,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::impact::entity::impact_answer::Entity")]
    ImpactAnswer,
}

impl Related<crate::domain::impact::entity::impact_answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ImpactAnswer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
