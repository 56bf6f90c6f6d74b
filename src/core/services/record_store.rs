//! Add/replace operations over a [`Snapshot`].

use chrono::Datelike;
use tracing::info;

use crate::errors::{FinanceError, Result};
use crate::ledger::{
    compat, Goal, GoalDraft, InvestmentBucket, MonthKey, Snapshot, Transaction, TransactionDraft,
};

/// Validated mutations over snapshots. Every operation returns a new snapshot
/// and leaves its input untouched, including when validation fails.
pub struct RecordStore;

impl RecordStore {
    /// Appends a transaction after checking value, description and category.
    pub fn add_transaction(snapshot: &Snapshot, draft: TransactionDraft) -> Result<Snapshot> {
        if !draft.value.is_finite() || draft.value <= 0.0 {
            return Err(FinanceError::Validation(
                "value must be a positive amount".into(),
            ));
        }
        let description = draft.description.trim();
        if description.is_empty() {
            return Err(FinanceError::Validation("description is required".into()));
        }
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(FinanceError::Validation("category is required".into()));
        }

        let mut next = snapshot.clone();
        next.transactions.push(Transaction::new(
            draft.kind,
            draft.date,
            draft.value,
            description,
            category,
        ));
        Ok(next)
    }

    /// Appends a goal. Duplicate categories are allowed.
    pub fn add_goal(snapshot: &Snapshot, draft: GoalDraft) -> Result<Snapshot> {
        let category = draft.category.trim();
        if category.is_empty() {
            return Err(FinanceError::Validation("category is required".into()));
        }
        if !draft.limit.is_finite() || draft.limit <= 0.0 {
            return Err(FinanceError::Validation(
                "limit must be a positive amount".into(),
            ));
        }

        let mut next = snapshot.clone();
        next.goals.push(Goal::new(category, draft.limit));
        Ok(next)
    }

    /// Replaces one ledger bucket. Negative or non-finite amounts become zero.
    pub fn set_investment_balance(
        snapshot: &Snapshot,
        bucket: InvestmentBucket,
        amount: f64,
    ) -> Snapshot {
        Snapshot {
            investments: snapshot.investments.with_balance(bucket, amount),
            ..snapshot.clone()
        }
    }

    /// Text-entry flavour of [`RecordStore::set_investment_balance`].
    pub fn set_investment_text(
        snapshot: &Snapshot,
        bucket: InvestmentBucket,
        raw: &str,
    ) -> Snapshot {
        Self::set_investment_balance(snapshot, bucket, parse_balance(raw))
    }

    /// Wholesale replacement used by restore.
    pub fn replace_all(incoming: Snapshot) -> Snapshot {
        Snapshot {
            investments: incoming.investments.sanitized(),
            ..incoming
        }
    }

    /// Duplicates every transaction of `source` into `target`, keeping the day of
    /// month as a raw offset from the first of `target`.
    pub fn copy_month(snapshot: &Snapshot, source: MonthKey, target: MonthKey) -> Snapshot {
        let copies: Vec<Transaction> = snapshot
            .transactions
            .iter()
            .filter(|txn| source.contains(txn.date))
            .map(|txn| txn.duplicate_on(target.day_offset(txn.date.day())))
            .collect();

        info!(
            source = %source,
            target = %target,
            copied = copies.len(),
            "copied month transactions"
        );

        let mut next = snapshot.clone();
        next.transactions.extend(copies);
        next
    }
}

/// Parses a free-text balance; anything unusable counts as zero.
pub fn parse_balance(raw: &str) -> f64 {
    compat::parse_decimal(raw)
        .map(compat::sanitize_balance)
        .unwrap_or(0.0)
}

/// Parses a form amount, rejecting blanks and non-numeric text.
pub fn parse_amount(raw: &str) -> Result<f64> {
    compat::parse_decimal(raw)
        .ok_or_else(|| FinanceError::Validation(format!("`{}` is not a valid amount", raw.trim())))
}
