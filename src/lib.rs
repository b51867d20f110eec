//! Library record service
//!
//! A small record-keeping server for a lending library: it tracks users,
//! books and checkouts over a REST JSON API, enforcing the checkout
//! invariants (one active checkout per book, per-user checkout limit,
//! cascading deletes).

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
