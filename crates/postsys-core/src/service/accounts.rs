//! Self-service registration and login.

use std::sync::Arc;

use tracing::instrument;

use super::resource::Resource;
use super::users::UserResource;
use crate::domain::{NewUser, Role, User};
use crate::error::DomainError;
use crate::ports::{BaseRepository, PasswordService, TokenService, UserRepository};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Self-registration input with the plain-text password.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A freshly issued access token and the account it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Validate and hash a plain-text password.
    pub fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(self.passwords.hash(password)?)
    }

    /// Create a `USER_ROLE` account and log it in.
    #[instrument(skip_all)]
    pub async fn register(&self, registration: Registration) -> Result<Session, DomainError> {
        let password_hash = self.hash_password(&registration.password)?;
        let user = UserResource::build(
            uuid::Uuid::nil(),
            NewUser {
                name: registration.name,
                surname: registration.surname,
                username: registration.username,
                email: registration.email,
                password_hash,
                role: Role::User,
            },
        )?;
        UserResource::check_unique(self.users.as_ref(), &user).await?;

        let user = self.users.insert(user).await?;
        tracing::info!(user_id = %user.id, "Account registered");
        self.issue(user)
    }

    /// Exchange credentials for a token. Deactivated accounts cannot log in.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .filter(|u| u.active)
            .ok_or(DomainError::Unauthenticated)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(DomainError::Unauthenticated);
        }

        self.issue(user)
    }

    fn issue(&self, user: User) -> Result<Session, DomainError> {
        let token = self
            .tokens
            .generate_token(user.id, &user.email, user.role)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(Session {
            user,
            token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }
}
