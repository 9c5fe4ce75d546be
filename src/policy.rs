//! Borrowing rules consulted by the ledger before every transition.
//!
//! The policy holds only configuration; every decision is a pure function of
//! the catalog and ledger snapshots passed in.

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::loan::Loan,
    repository::{catalog::Catalog, ledger::Ledger},
};

#[derive(Debug, Clone)]
pub struct LendingPolicy {
    pub max_active_loans: usize,
    pub loan_period: Duration,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self::from_config(&LendingConfig::default())
    }
}

impl LendingPolicy {
    pub fn from_config(config: &LendingConfig) -> Self {
        Self {
            max_active_loans: config.max_active_loans,
            loan_period: Duration::days(config.loan_period_days),
        }
    }

    /// Checked in order: borrow limit, item existence, stock, same-pair loan
    pub fn check_borrow(
        &self,
        ledger: &Ledger,
        catalog: &Catalog,
        borrower: &str,
        item_key: &str,
    ) -> AppResult<()> {
        let held = ledger.count_active_of(borrower);
        if held >= self.max_active_loans {
            return Err(AppError::BorrowLimitExceeded(format!(
                "{} already holds {} of {} allowed loans",
                borrower, held, self.max_active_loans
            )));
        }

        let item = catalog.lookup(item_key)?;

        if item.available == 0 {
            return Err(AppError::OutOfStock(format!(
                "No copy of {} is available",
                item_key
            )));
        }

        if ledger.find(borrower, item_key).is_some() {
            return Err(AppError::AlreadyBorrowed(format!(
                "{} already holds a copy of {}",
                borrower, item_key
            )));
        }

        Ok(())
    }

    /// Returns the loan being closed.
    ///
    /// A loan past its due date cannot be returned at all.
    pub fn check_return<'a>(
        &self,
        ledger: &'a Ledger,
        borrower: &str,
        item_key: &str,
        now: DateTime<Utc>,
    ) -> AppResult<&'a Loan> {
        let loan = ledger.find(borrower, item_key).ok_or_else(|| {
            AppError::LoanNotFound(format!("{} has no active loan of {}", borrower, item_key))
        })?;

        if loan.is_overdue(now) {
            return Err(AppError::OverdueReturn(format!(
                "Loan of {} by {} was due {}",
                item_key, borrower, loan.due_at
            )));
        }

        Ok(loan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::Item;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn stocked(keys: &[&str], copies: u32) -> Catalog {
        let mut catalog = Catalog::new();
        for key in keys {
            catalog
                .create(Item {
                    key: key.to_string(),
                    title: format!("Title {}", key),
                    author: "Author".into(),
                    published_year: 2000,
                    genres: Vec::new(),
                    total: copies,
                    available: copies,
                })
                .unwrap();
        }
        catalog
    }

    #[test]
    fn test_limit_is_checked_before_stock() {
        let policy = LendingPolicy::default();
        let mut catalog = stocked(&["A", "B", "C", "D"], 1);
        let mut ledger = Ledger::new();
        for key in ["A", "B", "C"] {
            ledger.borrow(&mut catalog, &policy, "alice", key, now()).unwrap();
        }
        catalog
            .update("D", Item { available: 0, ..catalog.get("D").unwrap() })
            .unwrap();

        let err = policy.check_borrow(&ledger, &catalog, "alice", "D").unwrap_err();
        assert!(matches!(err, AppError::BorrowLimitExceeded(_)));
    }

    #[test]
    fn test_unknown_item_is_not_found() {
        let policy = LendingPolicy::default();
        let catalog = stocked(&[], 1);
        let ledger = Ledger::new();

        let err = policy.check_borrow(&ledger, &catalog, "alice", "missing").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_zero_available_is_out_of_stock() {
        let policy = LendingPolicy::default();
        let catalog = stocked(&["A"], 0);
        let ledger = Ledger::new();

        let err = policy.check_borrow(&ledger, &catalog, "alice", "A").unwrap_err();
        assert!(matches!(err, AppError::OutOfStock(_)));
    }

    #[test]
    fn test_second_copy_for_same_pair_is_refused() {
        let policy = LendingPolicy::default();
        let mut catalog = stocked(&["A"], 2);
        let mut ledger = Ledger::new();
        ledger.borrow(&mut catalog, &policy, "alice", "A", now()).unwrap();

        let err = policy.check_borrow(&ledger, &catalog, "alice", "A").unwrap_err();
        assert!(matches!(err, AppError::AlreadyBorrowed(_)));
        assert!(policy.check_borrow(&ledger, &catalog, "bob", "A").is_ok());
    }

    #[test]
    fn test_holder_of_last_copy_gets_out_of_stock() {
        let policy = LendingPolicy::default();
        let mut catalog = stocked(&["A-001"], 1);
        let mut ledger = Ledger::new();
        ledger.borrow(&mut catalog, &policy, "alice", "A-001", now()).unwrap();

        let err = policy.check_borrow(&ledger, &catalog, "alice", "A-001").unwrap_err();
        assert!(matches!(err, AppError::OutOfStock(_)));

        let err = ledger
            .borrow(&mut catalog, &policy, "alice", "A-001", now())
            .unwrap_err();
        assert!(matches!(err, AppError::OutOfStock(_)));
        assert_eq!(catalog.get("A-001").unwrap().available, 0);
    }

    #[test]
    fn test_return_rules() {
        let policy = LendingPolicy::default();
        let mut catalog = stocked(&["A"], 1);
        let mut ledger = Ledger::new();

        let err = policy.check_return(&ledger, "alice", "A", now()).unwrap_err();
        assert!(matches!(err, AppError::LoanNotFound(_)));

        let loan = ledger.borrow(&mut catalog, &policy, "alice", "A", now()).unwrap();
        assert!(policy.check_return(&ledger, "alice", "A", loan.due_at).is_ok());

        let late = loan.due_at + Duration::seconds(1);
        let err = policy.check_return(&ledger, "alice", "A", late).unwrap_err();
        assert!(matches!(err, AppError::OverdueReturn(_)));
    }

    #[test]
    fn test_custom_limit() {
        let policy = LendingPolicy::from_config(&LendingConfig {
            max_active_loans: 1,
            loan_period_days: 7,
            allow_delete_on_loan: true,
        });
        let mut catalog = stocked(&["A", "B"], 1);
        let mut ledger = Ledger::new();

        let loan = ledger.borrow(&mut catalog, &policy, "alice", "A", now()).unwrap();
        assert_eq!(loan.due_at - loan.borrowed_at, Duration::days(7));
        let err = policy.check_borrow(&ledger, &catalog, "alice", "B").unwrap_err();
        assert!(matches!(err, AppError::BorrowLimitExceeded(_)));
    }
}
