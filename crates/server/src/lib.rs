//! Server crate for the shop assistant.
//!
//! This crate wires the catalog, the candidate selector and the model client
//! into one pipeline and exposes it over HTTP.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod routes;

pub use config::Settings;
pub use error::{AskError, ErrorResponse};
pub use orchestrator::{AskOrchestrator, AskResponse};
pub use routes::{AskRequest, app_router};
