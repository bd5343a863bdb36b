//! # Sticky Shared
//!
//! Form payloads and the view models handed to the templates.

pub mod dto;
pub mod response;

pub use response::ErrorPage;
