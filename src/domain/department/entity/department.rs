use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub department_id: i64,
    #[sea_orm(unique)]
    pub name: String,
    /// 참조 번호 접두어. 생성 시 한 번 부여되며 이후 불변.
    #[sea_orm(unique)]
    pub prefix: String,
    /// QA 부서 여부 (부서 간 검토 권한)
    pub is_qa: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::domain::auth::entity::user::Entity")]
    User,
    #[sea_orm(has_many = "crate::domain::deviation::entity::deviation::Entity")]
    Deviation,
}

impl Related<crate::domain::auth::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::deviation::entity::deviation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deviation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
