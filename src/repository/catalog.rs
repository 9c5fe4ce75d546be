//! In-memory catalog of items

use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::item::{Item, ItemQuery},
};

/// Item records keyed by catalog key, kept in insertion order
#[derive(Debug, Default)]
pub struct Catalog {
    items: IndexMap<String, Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, item: Item) -> AppResult<Item> {
        if self.items.contains_key(&item.key) {
            return Err(AppError::DuplicateKey(format!(
                "Item with key {} already exists",
                item.key
            )));
        }
        check_bounds(&item)?;
        self.items.insert(item.key.clone(), item.clone());
        Ok(item)
    }

    pub fn get(&self, key: &str) -> AppResult<Item> {
        self.lookup(key).cloned()
    }

    /// Borrowed lookup, for callers already holding the store lock
    pub fn lookup(&self, key: &str) -> AppResult<&Item> {
        self.items
            .get(key)
            .ok_or_else(|| AppError::NotFound(format!("Item with key {} not found", key)))
    }

    /// Replace the record wholesale, quantities included.
    ///
    /// Nothing here reconciles `available` with outstanding loans.
    pub fn update(&mut self, key: &str, item: Item) -> AppResult<Item> {
        check_bounds(&item)?;
        let slot = self
            .items
            .get_mut(key)
            .ok_or_else(|| AppError::NotFound(format!("Item with key {} not found", key)))?;
        *slot = item.clone();
        Ok(item)
    }

    /// Remove and return the record; the ledger is not consulted
    pub fn delete(&mut self, key: &str) -> AppResult<Item> {
        self.items
            .shift_remove(key)
            .ok_or_else(|| AppError::NotFound(format!("Item with key {} not found", key)))
    }

    /// Shift `available` by `delta`; only the ledger calls this
    pub(crate) fn adjust_availability(&mut self, key: &str, delta: i64) -> AppResult<&Item> {
        let item = self
            .items
            .get_mut(key)
            .ok_or_else(|| AppError::NotFound(format!("Item with key {} not found", key)))?;

        let next = i64::from(item.available) + delta;
        if next < 0 || next > i64::from(item.total) {
            return Err(AppError::InvalidState(format!(
                "Adjusting availability of {} by {} would leave {} of {} copies available",
                key, delta, next, item.total
            )));
        }
        item.available = next as u32;
        Ok(item)
    }

    /// Items matching every supplied filter, in catalog order
    pub fn search(&self, query: &ItemQuery) -> AppResult<Vec<Item>> {
        let found: Vec<Item> = self
            .items
            .values()
            .filter(|item| query.matches(item))
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(AppError::NoResults("No items match the search".to_string()));
        }
        Ok(found)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn check_bounds(item: &Item) -> AppResult<()> {
    if item.available > item.total {
        return Err(AppError::InvalidState(format!(
            "Item {} has {} available copies but only {} in total",
            item.key, item.available, item.total
        )));
    }
    Ok(())
}
