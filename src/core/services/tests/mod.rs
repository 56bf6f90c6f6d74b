mod record_store_tests;

use chrono::NaiveDate;

use crate::ledger::{Transaction, TransactionKind};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub(super) fn income(on: NaiveDate, value: f64, category: &str) -> Transaction {
    Transaction::new(TransactionKind::Income, on, value, "entrada", category)
}

pub(super) fn expense(on: NaiveDate, value: f64, category: &str) -> Transaction {
    Transaction::new(TransactionKind::Expense, on, value, "saída", category)
}
