//! Idempotent seeding run once at process start.
//!
//! Each step checks for existence before creating, so concurrent first
//! starts may both create; that race is accepted.

use crate::domain::{Category, NewCategory, NewUser, Role, User};
use crate::error::DomainError;
use crate::ports::{BaseRepository, CategoryRepository, PasswordService, UserRepository};

pub const DEFAULT_CATEGORY: &str = "General";

/// Credentials of the administrator created on first start.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            name: "Admin".to_string(),
            surname: "Principal".to_string(),
            username: "admin".to_string(),
            email: "admin@gmail.com".to_string(),
            password: "Admin123".to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub category_created: bool,
    pub admin_created: bool,
}

/// Make sure the "General" category exists. Returns whether it was created.
pub async fn ensure_default_category(
    categories: &dyn CategoryRepository,
) -> Result<bool, DomainError> {
    if categories.find_by_name(DEFAULT_CATEGORY).await?.is_some() {
        tracing::info!("Default category already present");
        return Ok(false);
    }

    categories
        .insert(Category::new(NewCategory {
            name: DEFAULT_CATEGORY.to_string(),
        }))
        .await?;
    tracing::info!(name = DEFAULT_CATEGORY, "Default category created");
    Ok(true)
}

/// Make sure at least one administrator exists. Returns whether one was created.
pub async fn ensure_admin(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    seed: &AdminSeed,
) -> Result<bool, DomainError> {
    if users.find_by_role(Role::Admin).await?.is_some() {
        tracing::info!("Administrator already present");
        return Ok(false);
    }

    let admin = User::new(NewUser {
        name: seed.name.clone(),
        surname: seed.surname.clone(),
        username: seed.username.clone(),
        email: seed.email.clone(),
        password_hash: passwords.hash(&seed.password)?,
        role: Role::Admin,
    });
    let admin = users.insert(admin).await?;
    tracing::info!(user_id = %admin.id, "Administrator created");
    Ok(true)
}

pub async fn seed_defaults(
    users: &dyn UserRepository,
    categories: &dyn CategoryRepository,
    passwords: &dyn PasswordService,
    admin: &AdminSeed,
) -> Result<SeedReport, DomainError> {
    Ok(SeedReport {
        category_created: ensure_default_category(categories).await?,
        admin_created: ensure_admin(users, passwords, admin).await?,
    })
}
