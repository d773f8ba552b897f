use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Comment, Page, Pagination, Post, Role, User};
use crate::error::RepoError;

/// Storage operations every collection supports.
///
/// There is no hard delete: entities are deactivated and written back with
/// [`BaseRepository::update`].
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID, active or not.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Active entities in storage order, with the total active count.
    async fn list_active(&self, page: Pagination) -> Result<Page<T>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Find any user holding `role`.
    async fn find_by_role(&self, role: Role) -> Result<Option<User>, RepoError>;
}

/// Category repository.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;
}

/// Post repository.
pub trait PostRepository: BaseRepository<Post, Uuid> {}

/// Comment repository.
pub trait CommentRepository: BaseRepository<Comment, Uuid> {}
