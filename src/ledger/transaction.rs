use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::compat;

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "compat::record_id")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    #[serde(deserialize_with = "compat::amount")]
    pub value: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        date: NaiveDate,
        value: f64,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            date,
            value,
            description: description.into(),
            category: category.into(),
        }
    }

    /// Clones the record under a fresh id and a new date.
    pub fn duplicate_on(&self, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            ..self.clone()
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "income", alias = "receita")]
    Income,
    #[serde(rename = "expense", alias = "despesa")]
    Expense,
}

impl TransactionKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "income" | "receita" | "in" => Some(Self::Income),
            "expense" | "despesa" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn sign(&self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Income => "income",
            Self::Expense => "expense",
        })
    }
}

/// Unvalidated user entry for a new transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub value: f64,
    pub description: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag_and_plain_date() {
        let txn = Transaction::new(
            TransactionKind::Expense,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            300.0,
            "Mercado",
            "Alimentação",
        );
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2024-03-10");
        assert_eq!(json["value"], 300.0);
    }

    #[test]
    fn reads_legacy_portuguese_records() {
        let raw = r#"{
            "id": 1709640000000,
            "type": "receita",
            "date": "2024-03-05",
            "value": "1000",
            "description": "Pagamento",
            "category": "Salário"
        }"#;
        let txn: Transaction = serde_json::from_str(raw).expect("legacy record");
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.value, 1000.0);
        assert_eq!(txn.category, "Salário");
    }

    #[test]
    fn duplicate_keeps_fields_but_not_identity() {
        let txn = Transaction::new(
            TransactionKind::Income,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            10.0,
            "x",
            "Outros",
        );
        let copy = txn.duplicate_on(NaiveDate::from_ymd_opt(2024, 4, 5).unwrap());
        assert_ne!(copy.id, txn.id);
        assert_eq!(copy.value, txn.value);
        assert_eq!(copy.category, txn.category);
    }
}
