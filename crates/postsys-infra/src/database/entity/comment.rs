//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use crate::database::postgres_base::SoftDeleteColumns;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub keeper_user_id: Uuid,
    pub keeper_post_id: Uuid,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::KeeperUserId",
        to = "super::user::Column::Id"
    )]
    KeeperUser,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::KeeperPostId",
        to = "super::post::Column::Id"
    )]
    KeeperPost,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KeeperUser.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::KeeperPost.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SoftDeleteColumns for Entity {
    fn active_column() -> Column {
        Column::Active
    }

    fn created_column() -> Column {
        Column::CreatedAt
    }

    fn id_column() -> Column {
        Column::Id
    }
}

impl From<Model> for postsys_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            content: model.content,
            keeper_user: model.keeper_user_id,
            keeper_post: model.keeper_post_id,
            active: model.active,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<postsys_core::domain::Comment> for ActiveModel {
    fn from(comment: postsys_core::domain::Comment) -> Self {
        Self {
            id: Set(comment.id),
            content: Set(comment.content),
            keeper_user_id: Set(comment.keeper_user),
            keeper_post_id: Set(comment.keeper_post),
            active: Set(comment.active),
            created_at: Set(comment.created_at.into()),
            updated_at: Set(comment.updated_at.into()),
        }
    }
}
