//! Kultura Cultural Center Content Management System
//!
//! A Rust REST backend for a cultural center: museum halls and sections,
//! media assets and categories, events and event applications, with
//! role-gated mutation and file-upload support.

use std::sync::Arc;

use sqlx::PgPool;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub services: Arc<services::Services>,
}
