//! Item (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// A lendable title and its copy counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Unique catalog key (ISBN or equivalent)
    pub key: String,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Copies owned
    pub total: u32,
    /// Copies not currently on loan, always `<= total`
    pub available: u32,
}

/// Unicode-aware case-insensitive equality, used for authors, genres and keys
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Item {
    /// Whether this item carries the given genre (case-insensitive)
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| eq_ignore_case(g, genre))
    }

    pub fn on_loan(&self) -> u32 {
        self.total - self.available
    }
}

/// Create / replace item request.
///
/// `available` defaults to `total` when omitted.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_quantities"))]
pub struct ItemPayload {
    #[validate(length(min = 1, message = "Key must not be empty"))]
    pub key: String,
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,
    pub author: String,
    pub published_year: i32,
    #[serde(default)]
    pub genres: Vec<String>,
    pub total: u32,
    pub available: Option<u32>,
}

fn validate_quantities(payload: &ItemPayload) -> Result<(), ValidationError> {
    match payload.available {
        Some(available) if available > payload.total => {
            let mut err = ValidationError::new("available_exceeds_total");
            err.message = Some("Available quantity cannot exceed total quantity".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

impl From<ItemPayload> for Item {
    fn from(payload: ItemPayload) -> Self {
        Self {
            available: payload.available.unwrap_or(payload.total),
            key: payload.key,
            title: payload.title,
            author: payload.author,
            published_year: payload.published_year,
            genres: payload.genres,
            total: payload.total,
        }
    }
}

/// Search filters; every supplied filter must match
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the author
    pub author: Option<String>,
    /// Case-insensitive exact catalog key
    pub key: Option<String>,
}

impl ItemQuery {
    pub fn matches(&self, item: &Item) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| match needle {
            Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        };

        contains(&item.title, &self.title)
            && contains(&item.author, &self.author)
            && self
                .key
                .as_ref()
                .map_or(true, |key| eq_ignore_case(&item.key, key))
    }
}
