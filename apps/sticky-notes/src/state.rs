//! Application state - shared across all handlers.

use std::sync::Arc;

use sticky_core::ports::{AuthorRepository, PostRepository};
use sticky_infra::InMemoryStore;

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use sticky_infra::database::{self, PostgresAuthorRepository, PostgresPostRepository};

use crate::config::AppConfig;
use crate::templates::Templates;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authors: Arc<dyn AuthorRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub templates: Arc<Templates>,
    /// Name of the record store backend, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Falls back to the in-memory store when no database is configured or it cannot be
    /// reached.
    pub async fn new(config: &AppConfig, templates: Templates) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match database::connect(db_config).await {
                    Ok(conn) => {
                        if config.migrate_on_start {
                            match Migrator::up(&conn, None).await {
                                Ok(()) => tracing::info!("Database migrations applied"),
                                Err(e) => tracing::error!("Failed to apply migrations: {}", e),
                            }
                        }

                        tracing::info!("Application state initialized (postgres)");
                        return Self {
                            authors: Arc::new(PostgresAuthorRepository::new(conn.clone())),
                            posts: Arc::new(PostgresPostRepository::new(conn)),
                            templates: Arc::new(templates),
                            storage: "postgres",
                        };
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = config;
            tracing::info!("Running without postgres feature - using in-memory repositories");
        }

        let state = Self::in_memory(templates);
        tracing::info!("Application state initialized (memory)");
        state
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(templates: Templates) -> Self {
        let store = InMemoryStore::new();
        Self {
            authors: Arc::new(store.authors()),
            posts: Arc::new(store.posts()),
            templates: Arc::new(templates),
            storage: "memory",
        }
    }
}
