//! Recommendations derived from a borrower's loan history.
//!
//! The reference author (or genre) is the one appearing most often across the
//! borrower's active and completed loans; ties go to the most recently
//! borrowed. Items the borrower has ever borrowed are never recommended.

use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{
        item::{eq_ignore_case, Item},
        recommendation::RecommendBy,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RecommendationService {
    repository: Repository,
}

impl RecommendationService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Catalog items (in catalog order) matching the borrower's reference
    /// author or genre; empty when there is no history or no match
    pub fn recommend(&self, borrower: &str, by: RecommendBy) -> AppResult<Vec<Item>> {
        let store = self.repository.lock()?;
        let snapshots = store.ledger.snapshots_of(borrower);

        let reference = match by {
            RecommendBy::Authors => {
                most_frequent(snapshots.iter().map(|(_, s)| s.author.as_str()))
            }
            RecommendBy::Genres => most_frequent(
                snapshots
                    .iter()
                    .flat_map(|(_, s)| s.genres.iter().map(String::as_str)),
            ),
        };
        let Some(reference) = reference else {
            return Ok(Vec::new());
        };

        let seen = store.ledger.item_keys_ever_borrowed_by(borrower);
        let recommended: Vec<Item> = store
            .catalog
            .iter()
            .filter(|item| !seen.contains(&item.key))
            .filter(|item| match by {
                RecommendBy::Authors => eq_ignore_case(&item.author, &reference),
                RecommendBy::Genres => item.has_genre(&reference),
            })
            .cloned()
            .collect();

        tracing::debug!(
            "Recommendations for {} by {:?} ({}): {} item(s)",
            borrower,
            by,
            reference,
            recommended.len()
        );
        Ok(recommended)
    }
}

/// Most frequent value (case-insensitive) in chronological input; ties go to
/// the value seen last
fn most_frequent<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut tally: HashMap<String, (usize, usize, &'a str)> = HashMap::new();
    for (position, value) in values.enumerate() {
        if value.trim().is_empty() {
            continue;
        }
        let entry = tally
            .entry(value.to_lowercase())
            .or_insert((0, position, value));
        entry.0 += 1;
        entry.1 = position;
    }

    tally
        .into_values()
        .max_by_key(|(count, last_seen, _)| (*count, *last_seen))
        .map(|(_, _, value)| value.to_string())
}
