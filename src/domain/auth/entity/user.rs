use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// argon2 해시. 응답 직렬화에서 제외.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role_id: i64,
    pub department_id: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::role::entity::role::Entity",
        from = "Column::RoleId",
        to = "crate::domain::role::entity::role::Column::RoleId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Role,
    #[sea_orm(
        belongs_to = "crate::domain::department::entity::department::Entity",
        from = "Column::DepartmentId",
        to = "crate::domain::department::entity::department::Column::DepartmentId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Department,
}

impl Related<crate::domain::role::entity::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl Related<crate::domain::department::entity::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
