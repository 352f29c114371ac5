use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub team_member_id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::investigation_team::Entity",
        from = "Column::TeamId",
        to = "super::investigation_team::Column::TeamId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    InvestigationTeam,
    #[sea_orm(
        belongs_to = "crate::domain::auth::entity::user::Entity",
        from = "Column::UserId",
        to = "crate::domain::auth::entity::user::Column::UserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
}

impl Related<super::investigation_team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvestigationTeam.def()
    }
}

impl Related<crate::domain::auth::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
