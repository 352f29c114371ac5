use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::WorkflowKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "impact_assessment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub impact_id: i64,
    pub parent_kind: WorkflowKind,
    pub parent_id: i64,
    pub recorded_by: i64,
    pub remarks: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::impact_answer::Entity")]
    ImpactAnswer,
}

impl Related<super::impact_answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ImpactAnswer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
