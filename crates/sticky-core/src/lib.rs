//! # Sticky Core
//!
//! The domain layer of the sticky notes application.
//! Posts, authors, form validation and the repository ports live here, with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{DomainError, RepoError};
pub use validation::ValidationErrors;
