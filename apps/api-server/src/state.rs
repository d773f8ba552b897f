//! Application state - shared across all handlers.

use std::sync::Arc;

use postsys_core::DomainError;
use postsys_core::ports::{PasswordService, TokenService};
use postsys_core::service::bootstrap::{self, AdminSeed};
use postsys_core::service::{AccountService, Services, Stores};
use postsys_infra::in_memory_stores;

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use postsys_infra::{DatabaseConfig, DatabaseConnection, postgres_stores};

/// Which storage the stores are backed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    #[cfg(feature = "postgres")]
    Postgres,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            #[cfg(feature = "postgres")]
            Self::Postgres => "postgres",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub accounts: AccountService,
    pub backend: StoreBackend,
    #[cfg(feature = "postgres")]
    pub db: Option<DatabaseConnection>,
}

impl AppState {
    /// Wire services over `stores`.
    pub fn new(
        stores: &Stores,
        backend: StoreBackend,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            services: Services::new(stores),
            accounts: AccountService::new(stores.users.clone(), passwords, tokens),
            backend,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Open the stores, seed them and wire the services.
    pub async fn init(
        config: &AppConfig,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Result<Self, DomainError> {
        #[cfg(feature = "postgres")]
        let (stores, backend, db) = open_stores(config.database.as_ref()).await;

        #[cfg(not(feature = "postgres"))]
        let (stores, backend) = {
            tracing::info!("Running without postgres feature - using in-memory stores");
            (in_memory_stores(), StoreBackend::Memory)
        };

        seed(&stores, passwords.as_ref(), &config.admin).await?;

        #[cfg_attr(not(feature = "postgres"), allow(unused_mut))]
        let mut state = Self::new(&stores, backend, passwords, tokens);
        #[cfg(feature = "postgres")]
        {
            state.db = db;
        }

        tracing::info!(backend = backend.as_str(), "Application state initialized");
        Ok(state)
    }
}

/// Postgres when configured and reachable, in-memory otherwise.
#[cfg(feature = "postgres")]
async fn open_stores(
    config: Option<&DatabaseConfig>,
) -> (Stores, StoreBackend, Option<DatabaseConnection>) {
    let Some(config) = config else {
        tracing::warn!("DATABASE_URL not set. Running with in-memory stores.");
        return (in_memory_stores(), StoreBackend::Memory, None);
    };

    match DatabaseConnection::connect(config).await {
        Ok(conn) => {
            let stores = postgres_stores(&conn.main);
            (stores, StoreBackend::Postgres, Some(conn))
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            (in_memory_stores(), StoreBackend::Memory, None)
        }
    }
}

/// Seed the default category and administrator.
pub async fn seed(
    stores: &Stores,
    passwords: &dyn PasswordService,
    admin: &AdminSeed,
) -> Result<(), DomainError> {
    let report = bootstrap::seed_defaults(
        stores.users.as_ref(),
        stores.categories.as_ref(),
        passwords,
        admin,
    )
    .await?;

    tracing::info!(
        category_created = report.category_created,
        admin_created = report.admin_created,
        "Bootstrap seeding finished"
    );
    Ok(())
}
