//! Equipos Maintenance Tracking
//!
//! REST JSON API that registers equipment, their components and reported
//! problems, and keeps each equipment's status consistent with its open
//! problems.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
