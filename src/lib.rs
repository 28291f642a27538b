//! Bookshelf
//!
//! A small REST JSON API for keeping track of books and reading progress.
//! Records live in process memory for the lifetime of the server.

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

impl AppState {
    /// Build the state with an empty shelf
    pub fn new(config: AppConfig) -> Self {
        let services = services::Services::new(repository::Repository::new(), &config.books);
        Self::with_services(config, services)
    }

    pub fn with_services(config: AppConfig, services: services::Services) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
