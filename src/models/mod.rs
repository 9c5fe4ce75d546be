//! Data models for the lending server

pub mod item;
pub mod loan;
pub mod recommendation;
pub mod user;

// Re-export commonly used types
pub use item::{Item, ItemPayload, ItemQuery};
pub use loan::{Loan, LoanDetails, LoanRecord};
pub use recommendation::RecommendBy;
pub use user::{User, UserClaims};
