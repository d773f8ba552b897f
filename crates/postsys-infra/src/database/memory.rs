//! In-memory stores - used when no database is configured, and in tests.
//!
//! Data is lost on process restart. Rows keep insertion order, which is the
//! storage order `list_active` reports.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use postsys_core::domain::{Category, Comment, Entity, Page, Pagination, Post, Role, User};
use postsys_core::error::RepoError;
use postsys_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UserRepository,
};
use postsys_core::service::Stores;

/// A collection held in a `Vec` behind an async lock.
pub struct InMemoryRepository<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl<T: Entity> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|row| row.id() == entity.id()) {
            return Err(RepoError::Constraint(format!(
                "{} {} already exists",
                T::KIND,
                entity.id()
            )));
        }
        rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|row| row.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        *slot = entity.clone();
        Ok(entity)
    }

    async fn list_active(&self, page: Pagination) -> Result<Page<T>, RepoError> {
        let rows = self.rows.read().await;
        let active = rows.iter().filter(|row| row.is_active());

        let total = active.clone().count() as u64;
        let items = active
            .skip(to_usize(page.offset))
            .take(to_usize(page.limit))
            .cloned()
            .collect();

        Ok(Page { items, total })
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_role(&self, role: Role) -> Result<Option<User>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|u| u.role == role).cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository<Category> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|c| c.name == name).cloned())
    }
}

impl PostRepository for InMemoryRepository<Post> {}

impl CommentRepository for InMemoryRepository<Comment> {}

/// A fresh, empty set of in-memory stores.
pub fn in_memory_stores() -> Stores {
    Stores {
        users: Arc::new(InMemoryRepository::<User>::new()),
        posts: Arc::new(InMemoryRepository::<Post>::new()),
        comments: Arc::new(InMemoryRepository::<Comment>::new()),
        categories: Arc::new(InMemoryRepository::<Category>::new()),
    }
}
