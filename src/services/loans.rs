//! Loan management service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanDetails, LoanRecord},
    policy::LendingPolicy,
    repository::Repository,
    services::clock::Clock,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    policy: LendingPolicy,
    clock: Arc<dyn Clock>,
}

impl LoansService {
    pub fn new(repository: Repository, policy: LendingPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            policy,
            clock,
        }
    }

    /// Borrow one copy of an item
    pub fn borrow(&self, borrower: &str, item_key: &str) -> AppResult<Loan> {
        let now = self.clock.now();
        let mut guard = self.repository.lock()?;
        let store = &mut *guard;

        match store
            .ledger
            .borrow(&mut store.catalog, &self.policy, borrower, item_key, now)
        {
            Ok(loan) => {
                tracing::info!("Loan: {} borrowed {} (due {})", borrower, item_key, loan.due_at);
                Ok(loan)
            }
            Err(e) => {
                tracing::warn!("Loan refused: {} borrowing {}: {}", borrower, item_key, e);
                Err(e)
            }
        }
    }

    /// Return a borrowed item
    pub fn return_loan(&self, borrower: &str, item_key: &str) -> AppResult<Loan> {
        let now = self.clock.now();
        let mut guard = self.repository.lock()?;
        let store = &mut *guard;

        match store
            .ledger
            .return_loan(&mut store.catalog, &self.policy, borrower, item_key, now)
        {
            Ok(loan) => {
                tracing::info!("Return: {} returned {}", borrower, item_key);
                Ok(loan)
            }
            Err(e) => {
                tracing::warn!("Return refused: {} returning {}: {}", borrower, item_key, e);
                Err(e)
            }
        }
    }

    /// Active loans of a borrower, oldest first
    pub fn active_loans_of(&self, borrower: &str) -> AppResult<Vec<LoanDetails>> {
        let now = self.clock.now();
        let loans = self.repository.lock()?.ledger.active_loans_of(borrower);
        Ok(loans
            .into_iter()
            .map(|loan| LoanDetails::from_loan(loan, now))
            .collect())
    }

    pub fn history_of(&self, borrower: &str) -> AppResult<Vec<LoanRecord>> {
        Ok(self.repository.lock()?.ledger.history_of(borrower))
    }

    pub fn overdue_loans(&self) -> AppResult<Vec<LoanDetails>> {
        let now = self.clock.now();
        let loans = self.repository.lock()?.ledger.overdue_loans(now);
        Ok(loans
            .into_iter()
            .map(|loan| LoanDetails::from_loan(loan, now))
            .collect())
    }

    /// Count active loans
    pub fn count_active(&self) -> AppResult<usize> {
        Ok(self.repository.lock()?.ledger.count_active())
    }

    /// Count overdue loans
    pub fn count_overdue(&self) -> AppResult<usize> {
        let now = self.clock.now();
        Ok(self.repository.lock()?.ledger.count_overdue(now))
    }
}
