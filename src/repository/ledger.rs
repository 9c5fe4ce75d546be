//! Loan ledger: active loans plus an append-only log of completed ones.
//!
//! Every availability change caused by lending goes through [`Ledger::borrow`]
//! and [`Ledger::return_loan`]. Both validate with the [`LendingPolicy`], then
//! perform the only fallible mutation (the catalog adjustment) before touching
//! the loan set, so a failed call leaves catalog and ledger unchanged.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::loan::{ItemSnapshot, Loan, LoanRecord},
    policy::LendingPolicy,
    repository::catalog::Catalog,
};

type LoanKey = (String, String);

fn loan_key(borrower: &str, item_key: &str) -> LoanKey {
    (borrower.to_string(), item_key.to_string())
}

#[derive(Debug)]
struct ActiveLoan {
    loan: Loan,
    snapshot: ItemSnapshot,
}

#[derive(Debug, Default)]
pub struct Ledger {
    active: HashMap<LoanKey, ActiveLoan>,
    history: Vec<LoanRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    fn active_loans(&self) -> impl Iterator<Item = &Loan> {
        self.active.values().map(|entry| &entry.loan)
    }

    /// no-loan -> on-loan
    pub fn borrow(
        &mut self,
        catalog: &mut Catalog,
        policy: &LendingPolicy,
        borrower: &str,
        item_key: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        policy.check_borrow(self, catalog, borrower, item_key)?;

        let loan = Loan::new(borrower, item_key, now, policy.loan_period);
        let snapshot = ItemSnapshot::of(catalog.adjust_availability(item_key, -1)?);
        self.active.insert(
            loan_key(borrower, item_key),
            ActiveLoan {
                loan: loan.clone(),
                snapshot,
            },
        );

        Ok(loan)
    }

    /// on-loan -> no-loan, recording the completed loan in the history log
    pub fn return_loan(
        &mut self,
        catalog: &mut Catalog,
        policy: &LendingPolicy,
        borrower: &str,
        item_key: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        policy.check_return(self, borrower, item_key, now)?;

        match catalog.adjust_availability(item_key, 1) {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                return Err(AppError::InvalidState(format!(
                    "Loan of {} by {} references an item no longer in the catalog",
                    item_key, borrower
                )))
            }
            Err(e) => return Err(e),
        }

        let ActiveLoan { loan, snapshot } = self
            .active
            .remove(&loan_key(borrower, item_key))
            .ok_or_else(|| {
                AppError::LoanNotFound(format!("{} has no active loan of {}", borrower, item_key))
            })?;

        self.history.push(LoanRecord {
            borrower: loan.borrower.clone(),
            item_key: loan.item_key.clone(),
            author: snapshot.author,
            genres: snapshot.genres,
            borrowed_at: loan.borrowed_at,
            due_at: loan.due_at,
            returned_at: now,
        });

        Ok(loan)
    }

    pub fn find(&self, borrower: &str, item_key: &str) -> Option<&Loan> {
        self.active
            .get(&loan_key(borrower, item_key))
            .map(|entry| &entry.loan)
    }

    /// Active loans of a borrower, oldest first
    pub fn active_loans_of(&self, borrower: &str) -> Vec<Loan> {
        let mut loans: Vec<Loan> = self
            .active_loans()
            .filter(|loan| loan.borrower == borrower)
            .cloned()
            .collect();
        loans.sort_by(|a, b| {
            a.borrowed_at
                .cmp(&b.borrowed_at)
                .then_with(|| a.item_key.cmp(&b.item_key))
        });
        loans
    }

    pub fn count_active_of(&self, borrower: &str) -> usize {
        self.active_loans()
            .filter(|loan| loan.borrower == borrower)
            .count()
    }

    /// Completed loans of a borrower, in return order
    pub fn history_of(&self, borrower: &str) -> Vec<LoanRecord> {
        self.history
            .iter()
            .filter(|record| record.borrower == borrower)
            .cloned()
            .collect()
    }

    /// Borrow-time snapshots of every loan, active or completed, a borrower
    /// has taken, oldest borrowing first
    pub fn snapshots_of(&self, borrower: &str) -> Vec<(DateTime<Utc>, ItemSnapshot)> {
        let completed = self
            .history
            .iter()
            .filter(|record| record.borrower == borrower)
            .map(|record| {
                let snapshot = ItemSnapshot {
                    author: record.author.clone(),
                    genres: record.genres.clone(),
                };
                (record.borrowed_at, snapshot)
            });
        let active = self
            .active
            .values()
            .filter(|entry| entry.loan.borrower == borrower)
            .map(|entry| (entry.loan.borrowed_at, entry.snapshot.clone()));

        let mut snapshots: Vec<_> = completed.chain(active).collect();
        snapshots.sort_by(|a, b| a.0.cmp(&b.0));
        snapshots
    }

    /// Keys from both active loans and the history log
    pub fn item_keys_ever_borrowed_by(&self, borrower: &str) -> HashSet<String> {
        self.active_loans()
            .filter(|loan| loan.borrower == borrower)
            .map(|loan| loan.item_key.clone())
            .chain(
                self.history
                    .iter()
                    .filter(|record| record.borrower == borrower)
                    .map(|record| record.item_key.clone()),
            )
            .collect()
    }

    pub fn active_loans_for_item(&self, item_key: &str) -> Vec<Loan> {
        self.active_loans()
            .filter(|loan| loan.item_key == item_key)
            .cloned()
            .collect()
    }

    /// All overdue loans, earliest due date first
    pub fn overdue_loans(&self, now: DateTime<Utc>) -> Vec<Loan> {
        let mut loans: Vec<Loan> = self
            .active_loans()
            .filter(|loan| loan.is_overdue(now))
            .cloned()
            .collect();
        loans.sort_by(|a, b| a.due_at.cmp(&b.due_at));
        loans
    }

    pub fn count_active(&self) -> usize {
        self.active.len()
    }

    pub fn count_overdue(&self, now: DateTime<Utc>) -> usize {
        self.active_loans().filter(|loan| loan.is_overdue(now)).count()
    }
}
