//! Business logic services

pub mod catalog;
pub mod clock;
pub mod loans;
pub mod recommendations;
pub mod stats;
pub mod users;

use std::sync::Arc;

use crate::{config::AppConfig, policy::LendingPolicy, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub recommendations: recommendations::RecommendationService,
    pub stats: stats::StatsService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services over one shared repository
    pub fn new(repository: Repository, config: &AppConfig, clock: Arc<dyn clock::Clock>) -> Self {
        let policy = LendingPolicy::from_config(&config.lending);

        Self {
            catalog: catalog::CatalogService::new(
                repository.clone(),
                config.lending.allow_delete_on_loan,
            ),
            loans: loans::LoansService::new(repository.clone(), policy, clock.clone()),
            recommendations: recommendations::RecommendationService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone(), clock),
            users: users::UsersService::new(repository, config.auth.clone()),
        }
    }
}
