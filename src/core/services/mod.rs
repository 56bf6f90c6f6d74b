pub mod record_store;
pub mod summary_service;

pub use record_store::{parse_amount, parse_balance, RecordStore};
pub use summary_service::{
    CategoryTotal, GoalProgress, GoalStatus, MonthComparison, MonthReport, MonthTotals,
    SummaryService,
};

#[cfg(test)]
mod tests;
