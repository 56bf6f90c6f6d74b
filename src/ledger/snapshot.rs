use serde::{Deserialize, Serialize};

use super::{goal::Goal, investments::InvestmentLedger, month::MonthKey, transaction::Transaction};

/// Complete in-memory state: every record the user has entered.
///
/// Snapshots are values. Record store operations take a snapshot by reference
/// and hand back a new one, so a caller holding an older snapshot never sees it
/// change underneath it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub investments: InvestmentLedger,
}

impl Snapshot {
    pub fn new(
        transactions: Vec<Transaction>,
        goals: Vec<Goal>,
        investments: InvestmentLedger,
    ) -> Self {
        Self {
            transactions,
            goals,
            investments,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn transactions_in(&self, month: MonthKey) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|txn| month.contains(txn.date))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.goals.is_empty()
            && self.investments == InvestmentLedger::default()
    }
}
