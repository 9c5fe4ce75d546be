//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::item::{Item, ItemPayload, ItemQuery},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    allow_delete_on_loan: bool,
}

impl CatalogService {
    pub fn new(repository: Repository, allow_delete_on_loan: bool) -> Self {
        Self {
            repository,
            allow_delete_on_loan,
        }
    }

    /// Search items with filters
    pub fn search_items(&self, query: &ItemQuery) -> AppResult<Vec<Item>> {
        self.repository.lock()?.catalog.search(query)
    }

    pub fn get_item(&self, key: &str) -> AppResult<Item> {
        self.repository.lock()?.catalog.get(key)
    }

    pub fn create_item(&self, payload: ItemPayload) -> AppResult<Item> {
        payload.validate()?;
        let created = self.repository.lock()?.catalog.create(payload.into())?;
        tracing::info!("Catalog create: item {} ({} copies)", created.key, created.total);
        Ok(created)
    }

    /// Replace an item wholesale.
    ///
    /// Quantities are taken as given; a mismatch with outstanding loans is
    /// logged, not corrected.
    pub fn update_item(&self, key: &str, payload: ItemPayload) -> AppResult<Item> {
        payload.validate()?;
        if payload.key != key {
            return Err(AppError::Validation(format!(
                "Item key {} does not match {}",
                payload.key, key
            )));
        }

        let mut store = self.repository.lock()?;
        let on_loan = store.ledger.active_loans_for_item(key).len();
        let updated = store.catalog.update(key, payload.into())?;

        if updated.on_loan() as usize != on_loan {
            tracing::warn!(
                "Catalog update: item {} reports {} copies out but {} loans are active",
                key,
                updated.on_loan(),
                on_loan
            );
        }
        Ok(updated)
    }

    pub fn delete_item(&self, key: &str) -> AppResult<Item> {
        let mut store = self.repository.lock()?;
        let on_loan = store.ledger.active_loans_for_item(key).len();

        if on_loan > 0 {
            if !self.allow_delete_on_loan {
                return Err(AppError::InvalidState(format!(
                    "Item {} still has {} active loan(s)",
                    key, on_loan
                )));
            }
            tracing::warn!(
                "Catalog delete: item {} removed with {} active loan(s)",
                key,
                on_loan
            );
        }

        let deleted = store.catalog.delete(key)?;
        tracing::info!("Catalog delete: item {}", key);
        Ok(deleted)
    }
}
