//! pagebridge server library
//!
//! Axum HTTP gateway exposing simplified page endpoints over the Notion
//! API. The binary in `main.rs` wires configuration and the live client;
//! the integration suite drives [`routes::router`] directly against an
//! in-memory backend.

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod ops;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
