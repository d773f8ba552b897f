use async_trait::async_trait;
use uuid::Uuid;

use super::guard::{self, Action};
use super::resource::{Resource, ResourceService, patch_text, require_text};
use crate::domain::{NewUser, Principal, User, UserPatch};
use crate::error::DomainError;
use crate::ports::UserRepository;

/// Account rules: admin-created only through this path, unique email.
pub struct UserResource;

pub type UserService = ResourceService<UserResource>;

fn require_email(value: String) -> Result<String, DomainError> {
    let email = require_text("email", value)?;
    if !email.contains('@') {
        return Err(DomainError::Validation("email is not a valid address".to_string()));
    }
    Ok(email)
}

#[async_trait]
impl Resource for UserResource {
    type Entity = User;
    type Store = dyn UserRepository;
    type Draft = NewUser;
    type Patch = UserPatch;

    // Self-registration goes through `AccountService`.
    fn authorize_create(principal: &Principal) -> Result<(), DomainError> {
        guard::require_admin(principal, Action::Create)
    }

    fn build(_owner: Uuid, draft: NewUser) -> Result<User, DomainError> {
        if draft.password_hash.is_empty() {
            return Err(DomainError::required("password"));
        }

        Ok(User::new(NewUser {
            name: require_text("name", draft.name)?,
            surname: require_text("surname", draft.surname)?,
            username: require_text("username", draft.username)?,
            email: require_email(draft.email)?,
            password_hash: draft.password_hash,
            role: draft.role,
        }))
    }

    fn apply(user: &mut User, patch: UserPatch) -> Result<(), DomainError> {
        if let Some(name) = patch_text("name", patch.name)? {
            user.name = name;
        }
        if let Some(surname) = patch_text("surname", patch.surname)? {
            user.surname = surname;
        }
        if let Some(username) = patch_text("username", patch.username)? {
            user.username = username;
        }
        if let Some(email) = patch.email {
            user.email = require_email(email)?;
        }
        if let Some(hash) = patch.password_hash {
            user.password_hash = hash;
        }
        Ok(())
    }

    async fn check_unique(store: &Self::Store, candidate: &User) -> Result<(), DomainError> {
        match store.find_by_email(&candidate.email).await? {
            Some(existing) if existing.id != candidate.id => {
                Err(DomainError::Duplicate("Email already registered".to_string()))
            }
            _ => Ok(()),
        }
    }
}
