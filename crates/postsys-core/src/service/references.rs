//! Foreign-reference checks run before any write that sets one.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Entity, EntityKind};
use crate::error::DomainError;
use crate::ports::{
    BaseRepository, CategoryRepository, CommentRepository, PostRepository, UserRepository,
};

/// A stored identifier that must resolve to an active entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// Field name reported back to the caller on failure.
    pub field: &'static str,
    pub kind: EntityKind,
    pub id: Uuid,
}

impl Reference {
    pub fn new(field: &'static str, kind: EntityKind, id: Uuid) -> Self {
        Self { field, kind, id }
    }
}

/// Resolves references against the stores.
///
/// Soft-deleted entities count as missing.
#[derive(Clone)]
pub struct ReferenceValidator {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ReferenceValidator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            users,
            posts,
            comments,
            categories,
        }
    }

    /// Whether `id` names an active entity of `kind`.
    pub async fn exists(&self, kind: EntityKind, id: Uuid) -> Result<bool, DomainError> {
        let active = match kind {
            EntityKind::User => self.users.find_by_id(id).await?.is_some_and(|e| e.is_active()),
            EntityKind::Post => self.posts.find_by_id(id).await?.is_some_and(|e| e.is_active()),
            EntityKind::Comment => self
                .comments
                .find_by_id(id)
                .await?
                .is_some_and(|e| e.is_active()),
            EntityKind::Category => self
                .categories
                .find_by_id(id)
                .await?
                .is_some_and(|e| e.is_active()),
        };
        Ok(active)
    }

    pub async fn require(&self, reference: Reference) -> Result<(), DomainError> {
        if self.exists(reference.kind, reference.id).await? {
            return Ok(());
        }

        tracing::debug!(
            field = reference.field,
            kind = %reference.kind,
            id = %reference.id,
            "Dangling reference"
        );
        Err(DomainError::InvalidReference {
            field: reference.field,
        })
    }

    /// Checks references in order and stops at the first dangling one.
    pub async fn require_all(&self, references: &[Reference]) -> Result<(), DomainError> {
        for reference in references {
            self.require(*reference).await?;
        }
        Ok(())
    }
}
