use async_trait::async_trait;
use uuid::Uuid;

use super::guard::{self, Action};
use super::resource::{Resource, ResourceService, patch_text, require_text};
use crate::domain::{Category, CategoryPatch, NewCategory, Principal};
use crate::error::DomainError;
use crate::ports::CategoryRepository;

/// Category rules: administrators only, names unique.
pub struct CategoryResource;

pub type CategoryService = ResourceService<CategoryResource>;

#[async_trait]
impl Resource for CategoryResource {
    type Entity = Category;
    type Store = dyn CategoryRepository;
    type Draft = NewCategory;
    type Patch = CategoryPatch;

    fn authorize_create(principal: &Principal) -> Result<(), DomainError> {
        guard::require_admin(principal, Action::Create)
    }

    fn build(_owner: Uuid, draft: NewCategory) -> Result<Category, DomainError> {
        Ok(Category::new(NewCategory {
            name: require_text("name", draft.name)?,
        }))
    }

    fn apply(category: &mut Category, patch: CategoryPatch) -> Result<(), DomainError> {
        if let Some(name) = patch_text("name", patch.name)? {
            category.name = name;
        }
        Ok(())
    }

    async fn check_unique(
        store: &Self::Store,
        candidate: &Category,
    ) -> Result<(), DomainError> {
        match store.find_by_name(&candidate.name).await? {
            Some(existing) if existing.id != candidate.id => Err(DomainError::Duplicate(format!(
                "Category '{}' already exists",
                candidate.name
            ))),
            _ => Ok(()),
        }
    }
}
