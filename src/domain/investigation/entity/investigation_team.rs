use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::workflow::WorkflowKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "investigation_team")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub team_id: i64,
    pub parent_kind: WorkflowKind,
    pub parent_id: i64,
    pub created_by: i64,
    pub remarks: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMember,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
