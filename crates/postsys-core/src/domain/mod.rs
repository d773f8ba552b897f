//! Domain entities - the core business objects.

mod category;
mod comment;
mod entity;
mod page;
mod post;
mod principal;
mod user;

pub use category::{Category, CategoryPatch, NewCategory};
pub use comment::{Comment, CommentPatch, NewComment};
pub use entity::{Entity, EntityKind};
pub use page::{Page, Pagination};
pub use post::{NewPost, Post, PostPatch};
pub use principal::Principal;
pub use user::{NewUser, Role, User, UserPatch};
