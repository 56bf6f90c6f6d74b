//! The running application: current snapshot, access gate, selected month and
//! the store every mutation is written through to.

use chrono::NaiveDate;
use tracing::info;

use crate::core::access_gate::{AccessGate, UnlockOutcome};
use crate::core::services::{MonthReport, RecordStore, SummaryService};
use crate::core::time::Clock;
use crate::errors::{FinanceError, Result};
use crate::ledger::{GoalDraft, InvestmentBucket, MonthKey, Snapshot, Transaction, TransactionDraft};
use crate::storage::{KeyValueStore, PersistenceAdapter};

/// Facade over the record store, aggregator and persistence.
///
/// Reads and writes require the gate to be open; `lock` and `unlock` are always
/// available. A restored or mutated snapshot replaces the current one wholesale.
pub struct FinanceSession<S: KeyValueStore> {
    persistence: PersistenceAdapter<S>,
    gate: AccessGate,
    snapshot: Snapshot,
    month: MonthKey,
    today: NaiveDate,
}

impl<S: KeyValueStore> FinanceSession<S> {
    /// Loads stored state and starts locked on the current month.
    pub fn open(store: S, clock: &dyn Clock) -> Self {
        let persistence = PersistenceAdapter::new(store);
        let loaded = persistence.load();
        let today = clock.today();
        Self {
            persistence,
            gate: AccessGate::new(loaded.pin),
            snapshot: loaded.snapshot,
            month: MonthKey::of(today),
            today,
        }
    }

    pub fn unlock(&mut self, pin: &str) -> Result<UnlockOutcome> {
        let outcome = self.gate.submit(pin)?;
        if let UnlockOutcome::Created(pin) = &outcome {
            self.persistence.save_pin(pin);
            info!("pin created");
        }
        Ok(outcome)
    }

    pub fn lock(&mut self) {
        self.gate.lock();
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    pub fn has_pin(&self) -> bool {
        self.gate.has_pin()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected_month(&self) -> MonthKey {
        self.month
    }

    pub fn select_month(&mut self, month: MonthKey) {
        self.month = month;
    }

    pub fn previous_month(&mut self) -> MonthKey {
        self.month = self.month.previous();
        self.month
    }

    pub fn next_month(&mut self) -> MonthKey {
        self.month = self.month.next();
        self.month
    }

    pub fn snapshot(&self) -> Result<&Snapshot> {
        self.gate.ensure_unlocked()?;
        Ok(&self.snapshot)
    }

    /// Transactions of the selected month, in insertion order.
    pub fn month_transactions(&self) -> Result<Vec<Transaction>> {
        self.gate.ensure_unlocked()?;
        Ok(self.snapshot.transactions_in(self.month))
    }

    pub fn report(&self) -> Result<MonthReport> {
        self.gate.ensure_unlocked()?;
        Ok(SummaryService::month_report(&self.snapshot, self.month))
    }

    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<&Transaction> {
        self.gate.ensure_unlocked()?;
        let next = RecordStore::add_transaction(&self.snapshot, draft)?;
        self.commit(next);
        let added = self.snapshot.transactions.last().ok_or_else(|| {
            FinanceError::Storage("transaction missing after insert".into())
        })?;
        info!(id = %added.id, kind = %added.kind, value = added.value, "transaction added");
        Ok(added)
    }

    pub fn add_goal(&mut self, draft: GoalDraft) -> Result<()> {
        self.gate.ensure_unlocked()?;
        let next = RecordStore::add_goal(&self.snapshot, draft)?;
        self.commit(next);
        info!(goals = self.snapshot.goals.len(), "goal added");
        Ok(())
    }

    pub fn set_investment(&mut self, bucket: InvestmentBucket, amount: f64) -> Result<f64> {
        self.gate.ensure_unlocked()?;
        let next = RecordStore::set_investment_balance(&self.snapshot, bucket, amount);
        self.commit(next);
        Ok(self.snapshot.investments.balance(bucket))
    }

    /// Same as [`set_investment`](Self::set_investment) for raw user input;
    /// unparseable text stores zero.
    pub fn set_investment_text(&mut self, bucket: InvestmentBucket, raw: &str) -> Result<f64> {
        self.gate.ensure_unlocked()?;
        let next = RecordStore::set_investment_text(&self.snapshot, bucket, raw);
        self.commit(next);
        Ok(self.snapshot.investments.balance(bucket))
    }

    /// Duplicates last month's transactions into the selected month and returns
    /// how many were copied.
    pub fn copy_previous_month(&mut self) -> Result<usize> {
        self.gate.ensure_unlocked()?;
        let before = self.snapshot.transaction_count();
        let next = RecordStore::copy_month(&self.snapshot, self.month.previous(), self.month);
        let copied = next.transaction_count() - before;
        if copied > 0 {
            self.commit(next);
        }
        Ok(copied)
    }

    pub fn export_backup(&self) -> Result<String> {
        self.gate.ensure_unlocked()?;
        self.persistence.export_snapshot(&self.snapshot)
    }

    /// Replaces all state with the decoded backup. On failure nothing changes.
    pub fn restore_backup(&mut self, bytes: &[u8]) -> Result<&Snapshot> {
        self.gate.ensure_unlocked()?;
        let restored = self.persistence.import_snapshot(bytes)?;
        info!(
            transactions = restored.transaction_count(),
            goals = restored.goals.len(),
            "backup restored"
        );
        self.commit(restored);
        Ok(&self.snapshot)
    }

    pub fn store(&self) -> &S {
        self.persistence.store()
    }

    fn commit(&mut self, next: Snapshot) {
        self.persistence.save(&next);
        self.snapshot = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::time::FixedClock;
    use crate::ledger::TransactionKind;
    use crate::storage::{MemoryStore, PIN_KEY};

    fn clock() -> FixedClock {
        FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
    }

    fn draft(kind: TransactionKind, value: f64, category: &str) -> TransactionDraft {
        TransactionDraft {
            kind,
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            value,
            description: "lançamento".into(),
            category: category.into(),
        }
    }

    #[test]
    fn locked_session_refuses_reads_and_writes() {
        let mut session = FinanceSession::open(MemoryStore::new(), &clock());
        assert!(matches!(session.report(), Err(FinanceError::Locked)));
        assert!(matches!(
            session.add_transaction(draft(TransactionKind::Income, 10.0, "Salário")),
            Err(FinanceError::Locked)
        ));
        assert!(matches!(session.export_backup(), Err(FinanceError::Locked)));
    }

    #[test]
    fn first_unlock_persists_pin() {
        let mut session = FinanceSession::open(MemoryStore::new(), &clock());
        assert_eq!(
            session.unlock("2468").unwrap(),
            UnlockOutcome::Created("2468".into())
        );
        assert_eq!(session.store().raw(PIN_KEY).as_deref(), Some("2468"));
    }

    #[test]
    fn starts_on_current_month_and_navigates() {
        let mut session = FinanceSession::open(MemoryStore::new(), &clock());
        assert_eq!(session.selected_month(), MonthKey::new(2024, 3).unwrap());
        assert_eq!(session.previous_month(), MonthKey::new(2024, 2).unwrap());
        assert_eq!(session.next_month(), MonthKey::new(2024, 3).unwrap());
    }

    #[test]
    fn mutations_are_written_through() {
        let mut session = FinanceSession::open(MemoryStore::new(), &clock());
        session.unlock("1").unwrap();
        session
            .add_transaction(draft(TransactionKind::Income, 1000.0, "Salário"))
            .unwrap();
        session
            .add_transaction(draft(TransactionKind::Expense, 300.0, "Alimentação"))
            .unwrap();

        let report = session.report().unwrap();
        assert_eq!(report.totals.net, 700.0);

        let reopened = PersistenceAdapter::new(session.store()).load();
        assert_eq!(reopened.snapshot.transactions.len(), 2);
    }

    #[test]
    fn failed_validation_leaves_state_unchanged() {
        let mut session = FinanceSession::open(MemoryStore::new(), &clock());
        session.unlock("1").unwrap();
        let err = session
            .add_transaction(draft(TransactionKind::Expense, -5.0, "Lazer"))
            .unwrap_err();
        assert!(matches!(err, FinanceError::Validation(_)));
        assert!(session.snapshot().unwrap().is_empty());
    }

    #[test]
    fn copy_previous_month_targets_selected_month() {
        let mut session = FinanceSession::open(MemoryStore::new(), &clock());
        session.unlock("1").unwrap();
        session
            .add_transaction(draft(TransactionKind::Expense, 80.0, "Transporte"))
            .unwrap();
        session.next_month();
        assert_eq!(session.copy_previous_month().unwrap(), 1);
        let april = session.month_transactions().unwrap();
        assert_eq!(april.len(), 1);
        assert_eq!(april[0].date, NaiveDate::from_ymd_opt(2024, 4, 5).unwrap());
    }

    #[test]
    fn bad_restore_keeps_current_state() {
        let mut session = FinanceSession::open(MemoryStore::new(), &clock());
        session.unlock("1").unwrap();
        session
            .set_investment(InvestmentBucket::Equities, 250.0)
            .unwrap();
        assert!(session.restore_backup(b"{oops").is_err());
        assert_eq!(
            session
                .snapshot()
                .unwrap()
                .investments
                .balance(InvestmentBucket::Equities),
            250.0
        );
    }
}
