//! Lending server
//!
//! Tracks a catalog of lendable items and who currently holds which copy,
//! enforces the borrowing policy and recommends items from loan history,
//! exposed through a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod policy;
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
    /// Build fresh in-memory stores and the services over them
    pub fn new(config: AppConfig, clock: Arc<dyn services::clock::Clock>) -> Self {
        let repository = repository::Repository::new();
        let services = services::Services::new(repository, &config, clock);

        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
