//! Application services: authorization, referential integrity and the
//! generic resource service each collection is exposed through.

pub mod accounts;
pub mod bootstrap;
pub mod guard;
pub mod references;
pub mod resource;

mod categories;
mod comments;
mod posts;
mod users;

use std::sync::Arc;

use crate::ports::{CategoryRepository, CommentRepository, PostRepository, UserRepository};

pub use accounts::{AccountService, Registration, Session};
pub use categories::{CategoryResource, CategoryService};
pub use comments::{CommentResource, CommentService};
pub use guard::{Action, Decision, authorize};
pub use posts::{PostResource, PostService};
pub use references::{Reference, ReferenceValidator};
pub use resource::{Resource, ResourceService};
pub use users::{UserResource, UserService};

/// The four stores, as trait objects.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

/// One resource service per collection, sharing a reference validator.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub posts: PostService,
    pub comments: CommentService,
    pub categories: CategoryService,
    pub references: ReferenceValidator,
}

impl Services {
    pub fn new(stores: &Stores) -> Self {
        let references = ReferenceValidator::new(
            stores.users.clone(),
            stores.posts.clone(),
            stores.comments.clone(),
            stores.categories.clone(),
        );

        Self {
            users: ResourceService::new(stores.users.clone(), references.clone()),
            posts: ResourceService::new(stores.posts.clone(), references.clone()),
            comments: ResourceService::new(stores.comments.clone(), references.clone()),
            categories: ResourceService::new(stores.categories.clone(), references.clone()),
            references,
        }
    }
}
