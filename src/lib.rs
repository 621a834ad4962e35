//! Travel blog accounts
//!
//! Validation for the blog's login, registration and profile-update forms:
//! - Declarative per-field validator chains with the familiar form error messages
//! - Email and username uniqueness checks against the user store
//! - Profile picture extension allow-list
//! - In-memory or PostgreSQL user storage behind one repository trait

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing::{debug, info};

use crate::api::state::{AccountFormServiceTrait, AppState};
use crate::config::{StorageBackend, StorageConfig};
use crate::domain::DomainError;
use crate::domain::user::{User, UserId, UserRepository};
use crate::infrastructure::user::{
    AccountFormService, InMemoryUserRepository, PostgresUserRepository,
};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    let seeds = seed_users(&config.storage)?;

    let account_forms: Arc<dyn AccountFormServiceTrait> = match config.storage.backend {
        StorageBackend::Memory => {
            let repository = InMemoryUserRepository::with_users(seeds)?;
            Arc::new(AccountFormService::new(Arc::new(repository)))
        }
        StorageBackend::Postgres => {
            let database_url = config.storage.database_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("storage.database_url is required for the postgres backend")
            })?;

            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(config.storage.max_connections)
                .acquire_timeout(Duration::from_secs(10))
                .connect(database_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
            info!("PostgreSQL connection established");

            let repository = PostgresUserRepository::new(pool);
            repository.ensure_table().await?;
            insert_missing(&repository, seeds).await?;

            Arc::new(AccountFormService::new(Arc::new(repository)))
        }
    };

    Ok(AppState::new(account_forms))
}

fn seed_users(storage: &StorageConfig) -> anyhow::Result<Vec<User>> {
    storage
        .seed_users
        .iter()
        .map(|seed| {
            let id = UserId::new(seed.id)
                .map_err(|e| anyhow::anyhow!("Invalid storage.seed_users entry: {}", e))?;

            Ok(User::new(
                id,
                seed.email.as_str(),
                seed.username.as_str(),
                seed.password_hash.as_str(),
            ))
        })
        .collect()
}

/// Seeds already present in a persistent store are left untouched
async fn insert_missing<R: UserRepository>(
    repository: &R,
    seeds: Vec<User>,
) -> anyhow::Result<()> {
    for user in seeds {
        match repository.create(user).await {
            Ok(user) => info!(user_id = %user.id(), "Seeded user"),
            Err(DomainError::Conflict { message }) => debug!("Seed skipped: {}", message),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
