//! Loan (borrow) model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::item::Item;

/// One outstanding borrowing, identified by `(borrower, item_key)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub borrower: String,
    pub item_key: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
}

impl Loan {
    pub fn new(borrower: &str, item_key: &str, now: DateTime<Utc>, loan_period: Duration) -> Self {
        Self {
            borrower: borrower.to_string(),
            item_key: item_key.to_string(),
            borrowed_at: now,
            due_at: now + loan_period,
        }
    }

    /// Overdue once `now` is strictly past the due date
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.due_at
    }
}

/// Author and genres of an item as they were when it was borrowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub author: String,
    pub genres: Vec<String>,
}

impl ItemSnapshot {
    pub fn of(item: &Item) -> Self {
        Self {
            author: item.author.clone(),
            genres: item.genres.clone(),
        }
    }
}

/// A completed loan kept in the ledger's history log.
///
/// Author and genres are captured at borrow time, so later catalog edits or
/// deletion do not rewrite what was actually lent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoanRecord {
    pub borrower: String,
    pub item_key: String,
    pub author: String,
    pub genres: Vec<String>,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: DateTime<Utc>,
}

/// Loan with computed status for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub borrower: String,
    pub item_key: String,
    pub borrowed_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub is_overdue: bool,
}

impl LoanDetails {
    pub fn from_loan(loan: Loan, now: DateTime<Utc>) -> Self {
        Self {
            is_overdue: loan.is_overdue(now),
            borrower: loan.borrower,
            item_key: loan.item_key,
            borrowed_at: loan.borrowed_at,
            due_at: loan.due_at,
        }
    }
}
