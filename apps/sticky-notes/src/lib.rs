//! # Sticky Notes
//!
//! Actix-web application serving the sticky notes pages: route table, handlers, templates,
//! configuration and telemetry. The binary in `main.rs` only wires these together.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
pub mod templates;
