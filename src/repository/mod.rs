//! Repository layer: in-memory catalog, ledger and user store

pub mod catalog;
pub mod ledger;
pub mod users;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{AppError, AppResult};

/// Catalog and ledger guarded together so every lending transition is a
/// single critical section
#[derive(Debug, Default)]
pub struct LendingStore {
    pub catalog: catalog::Catalog,
    pub ledger: ledger::Ledger,
}

/// Main repository struct holding the shared stores
#[derive(Clone, Default)]
pub struct Repository {
    store: Arc<Mutex<LendingStore>>,
    pub users: users::UsersRepository,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lending store for the duration of one operation
    pub fn lock(&self) -> AppResult<MutexGuard<'_, LendingStore>> {
        self.store
            .lock()
            .map_err(|_| AppError::Internal("Lending store lock poisoned".to_string()))
    }
}
