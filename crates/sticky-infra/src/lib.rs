//! # Sticky Infrastructure
//!
//! Concrete implementations of the repository ports defined in `sticky-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL record stores via SeaORM
//! - `minimal` - in-memory record stores only

pub mod database;
pub mod memory;

pub use database::DatabaseConfig;
pub use memory::{InMemoryAuthorRepository, InMemoryPostRepository, InMemoryStore};

#[cfg(feature = "postgres")]
pub use database::{PostgresAuthorRepository, PostgresPostRepository};
