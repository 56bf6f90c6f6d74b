//! Aggregations over transactions, goals and investment balances.
//!
//! Nothing here is cached: callers recompute from the current snapshot every
//! time a view is rendered.

use serde::Serialize;

use crate::ledger::{Goal, InvestmentLedger, MonthKey, Snapshot, Transaction, TransactionKind};

const COMPARATIVE_MONTHS: i32 = 6;
const WARNING_THRESHOLD: f64 = 80.0;
const OVER_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MonthTotals {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComparison {
    pub month: MonthKey,
    pub label: &'static str,
    pub income: f64,
    pub expense: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalStatus {
    Ok,
    Warning,
    Over,
}

impl GoalStatus {
    pub fn from_percent(percent: f64) -> Self {
        if percent > OVER_THRESHOLD {
            GoalStatus::Over
        } else if percent > WARNING_THRESHOLD {
            GoalStatus::Warning
        } else {
            GoalStatus::Ok
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub goal: Goal,
    pub spent: f64,
    /// Raw utilization, may exceed 100.
    pub percent: f64,
    pub status: GoalStatus,
}

impl GoalProgress {
    /// Utilization clamped for progress bars.
    pub fn display_percent(&self) -> f64 {
        self.percent.clamp(0.0, OVER_THRESHOLD)
    }

    pub fn is_over_limit(&self) -> bool {
        self.status == GoalStatus::Over
    }
}

/// Everything the dashboard shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    pub month: MonthKey,
    pub totals: MonthTotals,
    pub categories: Vec<CategoryTotal>,
    pub comparative: Vec<MonthComparison>,
    pub reserve_percent: f64,
    pub investment_total: f64,
    pub goals: Vec<GoalProgress>,
}

/// Pure aggregation functions.
pub struct SummaryService;

impl SummaryService {
    /// Transactions whose date falls in `month`, in their original order.
    pub fn month_filter(transactions: &[Transaction], month: MonthKey) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| month.contains(txn.date))
            .cloned()
            .collect()
    }

    pub fn totals_by_type(transactions: &[Transaction]) -> MonthTotals {
        let (income, expense) =
            transactions
                .iter()
                .fold((0.0, 0.0), |(income, expense), txn| match txn.kind {
                    TransactionKind::Income => (income + txn.value, expense),
                    TransactionKind::Expense => (income, expense + txn.value),
                });
        MonthTotals {
            income,
            expense,
            net: income - expense,
        }
    }

    /// Expense sums per category, ordered by first appearance.
    pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            match totals.iter_mut().find(|entry| entry.category == txn.category) {
                Some(entry) => entry.value += txn.value,
                None => totals.push(CategoryTotal {
                    category: txn.category.clone(),
                    value: txn.value,
                }),
            }
        }
        totals
    }

    /// Six entries ending at `anchor`, oldest first, zero-filled.
    pub fn six_month_comparative(
        transactions: &[Transaction],
        anchor: MonthKey,
    ) -> Vec<MonthComparison> {
        (0..COMPARATIVE_MONTHS)
            .rev()
            .map(|offset| {
                let month = anchor.shift(-offset);
                let totals = Self::totals_by_type(&Self::month_filter(transactions, month));
                MonthComparison {
                    month,
                    label: month.short_label(),
                    income: totals.income,
                    expense: totals.expense,
                }
            })
            .collect()
    }

    /// Share of the ledger held in the liquidity reserve, one decimal place.
    pub fn reserve_percent(ledger: &InvestmentLedger) -> f64 {
        let total = ledger.total();
        if total <= 0.0 {
            return 0.0;
        }
        round_to(ledger.liquidity_reserve / total * 100.0, 1)
    }

    /// Spend against a goal as a percentage of its limit. Not clamped.
    pub fn goal_utilization(goal: &Goal, month_transactions: &[Transaction]) -> f64 {
        if goal.limit <= 0.0 {
            return 0.0;
        }
        Self::goal_spend(goal, month_transactions) / goal.limit * 100.0
    }

    pub fn goal_progress(goals: &[Goal], month_transactions: &[Transaction]) -> Vec<GoalProgress> {
        goals
            .iter()
            .map(|goal| {
                let percent = Self::goal_utilization(goal, month_transactions);
                GoalProgress {
                    goal: goal.clone(),
                    spent: Self::goal_spend(goal, month_transactions),
                    percent,
                    status: GoalStatus::from_percent(percent),
                }
            })
            .collect()
    }

    pub fn month_report(snapshot: &Snapshot, month: MonthKey) -> MonthReport {
        let in_month = Self::month_filter(&snapshot.transactions, month);
        MonthReport {
            month,
            totals: Self::totals_by_type(&in_month),
            categories: Self::category_breakdown(&in_month),
            comparative: Self::six_month_comparative(&snapshot.transactions, month),
            reserve_percent: Self::reserve_percent(&snapshot.investments),
            investment_total: snapshot.investments.total(),
            goals: Self::goal_progress(&snapshot.goals, &in_month),
        }
    }

    fn goal_spend(goal: &Goal, month_transactions: &[Transaction]) -> f64 {
        month_transactions
            .iter()
            .filter(|txn| txn.is_expense() && txn.category == goal.category)
            .map(|txn| txn.value)
            .sum()
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
