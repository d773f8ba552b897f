//! Generic create / list / find / update / soft-delete service.
//!
//! Every collection goes through [`ResourceService`]; what differs between
//! them (required fields, foreign references, uniqueness, who may create)
//! is described by a [`Resource`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use super::guard::{self, Action};
use super::references::{Reference, ReferenceValidator};
use crate::domain::{Entity, EntityKind, Page, Pagination, Principal};
use crate::error::{DomainError, RepoError};
use crate::ports::BaseRepository;

/// Per-collection rules plugged into [`ResourceService`].
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Entity: Entity;
    type Store: BaseRepository<Self::Entity, Uuid> + ?Sized;
    type Draft: Send + 'static;
    type Patch: Send + 'static;

    /// Field holding the creating user, for collections that track one.
    const OWNER_FIELD: Option<&'static str> = None;

    /// Who may create entities. Any authenticated principal by default.
    fn authorize_create(_principal: &Principal) -> Result<(), DomainError> {
        Ok(())
    }

    /// Foreign references set by a draft.
    fn draft_references(_draft: &Self::Draft) -> Vec<Reference> {
        Vec::new()
    }

    /// Foreign references a patch changes. Unchanged ones are not revalidated.
    fn patch_references(_current: &Self::Entity, _patch: &Self::Patch) -> Vec<Reference> {
        Vec::new()
    }

    /// Validate a draft and turn it into an entity owned by `owner`.
    fn build(owner: Uuid, draft: Self::Draft) -> Result<Self::Entity, DomainError>;

    /// Validate a patch and apply it in place.
    fn apply(entity: &mut Self::Entity, patch: Self::Patch) -> Result<(), DomainError>;

    /// Application-level uniqueness, checked before every write.
    async fn check_unique(store: &Self::Store, candidate: &Self::Entity)
    -> Result<(), DomainError>;
}

/// Orchestrates validation, authorization and persistence for one collection.
pub struct ResourceService<R: Resource> {
    store: Arc<R::Store>,
    references: ReferenceValidator,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            references: self.references.clone(),
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(store: Arc<R::Store>, references: ReferenceValidator) -> Self {
        Self { store, references }
    }

    fn kind() -> EntityKind {
        <R::Entity as Entity>::KIND
    }

    #[instrument(skip_all, fields(kind = %Self::kind(), principal = %principal.id))]
    pub async fn create(
        &self,
        principal: &Principal,
        draft: R::Draft,
    ) -> Result<R::Entity, DomainError> {
        R::authorize_create(principal)?;

        let mut references = R::draft_references(&draft);
        let entity = R::build(principal.id, draft)?;
        if let Some(field) = R::OWNER_FIELD {
            references.push(Reference::new(field, EntityKind::User, principal.id));
        }

        self.references.require_all(&references).await?;
        R::check_unique(self.store.as_ref(), &entity).await?;

        let saved = self.store.insert(entity).await?;
        tracing::info!(id = %saved.id(), "Entity created");
        Ok(saved)
    }

    pub async fn list(&self, page: Pagination) -> Result<Page<R::Entity>, DomainError> {
        Ok(self.store.list_active(page).await?)
    }

    /// Direct lookup. Inactive entities are returned too.
    pub async fn find_by_id(&self, id: Uuid) -> Result<R::Entity, DomainError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(Self::kind(), id))
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        patch: R::Patch,
    ) -> Result<R::Entity, DomainError> {
        self.update_with(principal, id, move |_| Ok(patch)).await
    }

    /// Like [`update`](Self::update), with the patch produced only once the
    /// target exists and the principal may modify it.
    #[instrument(skip_all, fields(kind = %Self::kind(), %id, principal = %principal.id))]
    pub async fn update_with<F>(
        &self,
        principal: &Principal,
        id: Uuid,
        prepare: F,
    ) -> Result<R::Entity, DomainError>
    where
        F: FnOnce(&R::Entity) -> Result<R::Patch, DomainError> + Send,
    {
        let mut entity = self.find_active(id).await?;
        guard::authorize(principal, entity.owner_id(), Action::Update).into_result()?;
        let patch = prepare(&entity)?;

        let references = R::patch_references(&entity, &patch);
        R::apply(&mut entity, patch)?;
        self.references.require_all(&references).await?;
        R::check_unique(self.store.as_ref(), &entity).await?;

        entity.touch(Utc::now());
        let saved = self.store.update(entity).await.map_err(|e| Self::lost(id, e))?;
        tracing::info!("Entity updated");
        Ok(saved)
    }

    #[instrument(skip_all, fields(kind = %Self::kind(), %id, principal = %principal.id))]
    pub async fn soft_delete(
        &self,
        principal: &Principal,
        id: Uuid,
    ) -> Result<R::Entity, DomainError> {
        let mut entity = self.find_active(id).await?;
        guard::authorize(principal, entity.owner_id(), Action::Delete).into_result()?;

        entity.deactivate(Utc::now());
        let saved = self.store.update(entity).await.map_err(|e| Self::lost(id, e))?;
        tracing::info!("Entity deactivated");
        Ok(saved)
    }

    /// Inactive entities are terminal: mutations treat them as missing.
    async fn find_active(&self, id: Uuid) -> Result<R::Entity, DomainError> {
        let entity = self.find_by_id(id).await?;
        if entity.is_active() {
            Ok(entity)
        } else {
            Err(DomainError::not_found(Self::kind(), id))
        }
    }

    // The entity can vanish between the read and the write.
    fn lost(id: Uuid, err: RepoError) -> DomainError {
        match err {
            RepoError::NotFound => DomainError::not_found(Self::kind(), id),
            other => other.into(),
        }
    }
}

/// Trimmed, non-empty text or a validation error naming `field`.
pub(crate) fn require_text(field: &str, value: String) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::required(field));
    }
    Ok(trimmed.to_string())
}

/// Like [`require_text`] for optional patch fields.
pub(crate) fn patch_text(field: &str, value: Option<String>) -> Result<Option<String>, DomainError> {
    value.map(|v| require_text(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("title", "  hi ".to_string()).unwrap(), "hi");
        assert!(matches!(
            require_text("title", "   ".to_string()),
            Err(DomainError::Validation(msg)) if msg == "title is required"
        ));
    }

    #[test]
    fn patch_text_passes_absent_fields_through() {
        assert_eq!(patch_text("name", None).unwrap(), None);
        assert!(patch_text("name", Some(String::new())).is_err());
    }
}
