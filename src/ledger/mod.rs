//! Record types: transactions, goals, investment balances and the snapshot
//! that bundles them.

pub mod category;
pub mod compat;
pub mod goal;
pub mod investments;
pub mod month;
pub mod snapshot;
pub mod transaction;

pub use category::{categories_for, resolve_category, EXPENSE_CATEGORIES, INCOME_CATEGORIES};
pub use goal::{Goal, GoalDraft};
pub use investments::{InvestmentBucket, InvestmentLedger};
pub use month::MonthKey;
pub use snapshot::Snapshot;
pub use transaction::{Transaction, TransactionDraft, TransactionKind};
