//! Statistics service

use std::sync::Arc;

use crate::{
    api::stats::StatsResponse, error::AppResult, repository::Repository, services::clock::Clock,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl StatsService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn get_stats(&self) -> AppResult<StatsResponse> {
        let now = self.clock.now();
        let store = self.repository.lock()?;

        let (copies_total, copies_available) = store
            .catalog
            .iter()
            .fold((0u64, 0u64), |(total, available), item| {
                (total + u64::from(item.total), available + u64::from(item.available))
            });

        Ok(StatsResponse {
            items: store.catalog.len(),
            copies_total,
            copies_available,
            active_loans: store.ledger.count_active(),
            overdue_loans: store.ledger.count_overdue(now),
        })
    }
}
