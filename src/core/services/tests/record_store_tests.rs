use super::{date, expense, income};
use crate::core::services::{parse_amount, parse_balance, RecordStore};
use crate::errors::FinanceError;
use crate::ledger::{
    GoalDraft, InvestmentBucket, InvestmentLedger, MonthKey, Snapshot, TransactionDraft,
    TransactionKind,
};

fn draft(value: f64, description: &str, category: &str) -> TransactionDraft {
    TransactionDraft {
        kind: TransactionKind::Expense,
        date: date(2024, 3, 10),
        value,
        description: description.into(),
        category: category.into(),
    }
}

fn march_snapshot() -> Snapshot {
    Snapshot::new(
        vec![
            income(date(2024, 3, 5), 1000.0, "Salário"),
            expense(date(2024, 3, 10), 300.0, "Alimentação"),
            expense(date(2024, 2, 20), 80.0, "Lazer"),
        ],
        Vec::new(),
        InvestmentLedger::default(),
    )
}

#[test]
fn add_transaction_appends_with_fresh_id() {
    let base = Snapshot::default();
    let next = RecordStore::add_transaction(&base, draft(300.0, "Mercado", "Alimentação"))
        .expect("valid entry");

    assert!(base.transactions.is_empty(), "input snapshot must not change");
    assert_eq!(next.transaction_count(), 1);
    let stored = &next.transactions[0];
    assert!(!stored.id.is_nil());
    assert_eq!(stored.category, "Alimentação");

    let again = RecordStore::add_transaction(&next, draft(10.0, "Pão", "Alimentação")).unwrap();
    assert_ne!(again.transactions[0].id, again.transactions[1].id);
}

#[test]
fn add_transaction_rejects_missing_fields() {
    let base = Snapshot::default();
    for bad in [
        draft(0.0, "Mercado", "Alimentação"),
        draft(-5.0, "Mercado", "Alimentação"),
        draft(f64::NAN, "Mercado", "Alimentação"),
        draft(10.0, "   ", "Alimentação"),
        draft(10.0, "Mercado", ""),
    ] {
        let err = RecordStore::add_transaction(&base, bad).expect_err("must be rejected");
        assert!(matches!(err, FinanceError::Validation(_)), "unexpected: {err:?}");
    }
}

#[test]
fn add_transaction_keeps_unknown_categories() {
    let next =
        RecordStore::add_transaction(&Snapshot::default(), draft(5.0, "Café", "Padaria")).unwrap();
    assert_eq!(next.transactions[0].category, "Padaria");
}

#[test]
fn add_goal_validates_and_allows_duplicates() {
    let goal = || GoalDraft {
        category: "Alimentação".into(),
        limit: 200.0,
    };
    let once = RecordStore::add_goal(&Snapshot::default(), goal()).unwrap();
    let twice = RecordStore::add_goal(&once, goal()).unwrap();
    assert_eq!(twice.goals.len(), 2);
    assert_ne!(twice.goals[0].id, twice.goals[1].id);

    let err = RecordStore::add_goal(
        &twice,
        GoalDraft {
            category: "Lazer".into(),
            limit: 0.0,
        },
    )
    .expect_err("zero limit rejected");
    assert!(matches!(err, FinanceError::Validation(_)));

    let err = RecordStore::add_goal(
        &twice,
        GoalDraft {
            category: " ".into(),
            limit: 50.0,
        },
    )
    .expect_err("blank category rejected");
    assert!(matches!(err, FinanceError::Validation(_)));
}

#[test]
fn set_investment_balance_replaces_one_bucket() {
    let base = RecordStore::set_investment_balance(
        &Snapshot::default(),
        InvestmentBucket::Equities,
        500.0,
    );
    let next = RecordStore::set_investment_balance(&base, InvestmentBucket::Crypto, 120.0);
    assert_eq!(next.investments.equities, 500.0);
    assert_eq!(next.investments.crypto, 120.0);
    assert_eq!(base.investments.crypto, 0.0);

    let coerced = RecordStore::set_investment_text(&next, InvestmentBucket::Equities, "abc");
    assert_eq!(coerced.investments.equities, 0.0);
    let negative = RecordStore::set_investment_balance(&next, InvestmentBucket::Crypto, -1.0);
    assert_eq!(negative.investments.crypto, 0.0);
}

#[test]
fn replace_all_swaps_everything_and_sanitizes_ledger() {
    let mut incoming = march_snapshot();
    incoming.investments.vehicles = -30.0;
    incoming.investments.equities = 10.0;

    let replaced = RecordStore::replace_all(incoming.clone());
    assert_eq!(replaced.transactions, incoming.transactions);
    assert_eq!(replaced.investments.vehicles, 0.0);
    assert_eq!(replaced.investments.equities, 10.0);

    let emptied = RecordStore::replace_all(Snapshot::default());
    assert!(emptied.is_empty());
}

#[test]
fn copy_month_duplicates_into_target_month() {
    let base = march_snapshot();
    let march = MonthKey::new(2024, 3).unwrap();
    let april = MonthKey::new(2024, 4).unwrap();

    let next = RecordStore::copy_month(&base, march, april);
    assert_eq!(next.transaction_count(), base.transaction_count() + 2);
    assert_eq!(&next.transactions[..3], &base.transactions[..]);

    let copies = &next.transactions[3..];
    assert_eq!(copies[0].date, date(2024, 4, 5));
    assert_eq!(copies[1].date, date(2024, 4, 10));
    assert_eq!(copies[0].value, 1000.0);
    assert_eq!(copies[1].category, "Alimentação");
    for copy in copies {
        assert!(base.transactions.iter().all(|orig| orig.id != copy.id));
    }
    assert_ne!(copies[0].id, copies[1].id);
}

#[test]
fn copy_month_does_not_clamp_day_of_month() {
    // January 31st lands past the end of February and rolls into March.
    let base = Snapshot::new(
        vec![expense(date(2025, 1, 31), 40.0, "Moradia")],
        Vec::new(),
        InvestmentLedger::default(),
    );
    let next = RecordStore::copy_month(
        &base,
        MonthKey::new(2025, 1).unwrap(),
        MonthKey::new(2025, 2).unwrap(),
    );
    assert_eq!(next.transactions[1].date, date(2025, 3, 3));
}

#[test]
fn copy_month_from_empty_month_is_a_no_op() {
    let base = march_snapshot();
    let next = RecordStore::copy_month(
        &base,
        MonthKey::new(2023, 7).unwrap(),
        MonthKey::new(2023, 8).unwrap(),
    );
    assert_eq!(next, base);
}

#[test]
fn amount_parsing_reports_non_numeric_input() {
    assert_eq!(parse_amount("12,5").unwrap(), 12.5);
    assert_eq!(parse_amount("1.234,56").unwrap(), 1234.56);
    assert!(matches!(parse_amount("doze"), Err(FinanceError::Validation(_))));
    assert!(matches!(parse_amount(""), Err(FinanceError::Validation(_))));
    assert_eq!(parse_balance("nada"), 0.0);
    assert_eq!(parse_balance("-40"), 0.0);
    assert_eq!(parse_balance("1500.75"), 1500.75);
}
