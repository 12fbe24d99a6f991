use crate::{
    errors::{InputError, TrackerError},
    ledger::{Ledger, Transaction},
    storage::PersistenceGateway,
    view::{DisplaySettings, Theme, ViewModel, ViewProjector},
};

use super::form::TransactionForm;

/// Everything a display surface needs to redraw from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub view: ViewModel,
    pub theme: Theme,
    pub currency: String,
}

/// Result of an accepted submission. The in-memory append always stands,
/// even when `save_error` reports that persisting it failed.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub transaction: Transaction,
    pub snapshot: Snapshot,
    pub save_error: Option<TrackerError>,
}

impl SubmitOutcome {
    pub fn persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

type Subscriber = Box<dyn FnMut(&Snapshot)>;

/// Owns the ledger, display settings and storage for one session, and pushes
/// a fresh [`Snapshot`] to subscribers after every change.
pub struct Tracker {
    ledger: Ledger,
    settings: DisplaySettings,
    projector: ViewProjector,
    storage: Box<dyn PersistenceGateway>,
    subscribers: Vec<Subscriber>,
    load_warnings: Vec<String>,
}

impl Tracker {
    /// Loads prior transactions from `storage`. Missing or unreadable data
    /// starts an empty ledger.
    pub fn open(
        storage: Box<dyn PersistenceGateway>,
        settings: DisplaySettings,
        projector: ViewProjector,
    ) -> Self {
        let (ledger, load_warnings) = match storage.load() {
            Ok(Some(report)) => {
                let ledger = Ledger::from_transactions(report.transactions);
                (ledger, report.warnings)
            }
            Ok(None) => {
                tracing::info!(storage = %storage.describe(), "no saved ledger, starting empty");
                (Ledger::new(), Vec::new())
            }
            Err(err) => {
                tracing::warn!(
                    storage = %storage.describe(),
                    error = %err,
                    "saved ledger unreadable, starting empty"
                );
                (Ledger::new(), vec![err.to_string()])
            }
        };
        Self {
            ledger,
            settings,
            projector,
            storage,
            subscribers: Vec::new(),
            load_warnings,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn storage(&self) -> &dyn PersistenceGateway {
        self.storage.as_ref()
    }

    /// Problems found while loading: rejected records or an unreadable file.
    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            view: self.projector.project(&self.ledger, &self.settings),
            theme: self.settings.theme,
            currency: self.settings.currency.clone(),
        }
    }

    /// Registers a callback invoked with every new snapshot.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Snapshot) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Validates and records the form. On success the form is cleared,
    /// subscribers are notified and the ledger is saved. On rejection the form
    /// and ledger are left untouched.
    pub fn submit(&mut self, form: &mut TransactionForm) -> Result<SubmitOutcome, InputError> {
        let submission = form.validate()?;
        let transaction = self
            .ledger
            .append(submission.amount, submission.category, submission.kind)
            .clone();
        form.reset();

        let snapshot = self.publish();
        let save_error = self.storage.save(self.ledger.all()).err();
        if let Some(err) = &save_error {
            tracing::warn!(
                id = transaction.id(),
                error = %err,
                "transaction kept in memory but not saved"
            );
        }
        Ok(SubmitOutcome {
            transaction,
            snapshot,
            save_error,
        })
    }

    /// Re-attempts persisting the full ledger, e.g. after a failed save.
    pub fn save(&self) -> Result<(), TrackerError> {
        self.storage.save(self.ledger.all())
    }

    pub fn toggle_theme(&mut self) -> Snapshot {
        let theme = self.settings.toggle_theme();
        tracing::debug!(%theme, "theme toggled");
        self.publish()
    }

    fn publish(&mut self) -> Snapshot {
        let snapshot = self.snapshot();
        for subscriber in &mut self.subscribers {
            subscriber(&snapshot);
        }
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::Result,
        ledger::{Category, TransactionType},
        storage::{LoadReport, MemoryStorage},
    };
    use chrono::NaiveDate;
    use std::{cell::RefCell, rc::Rc};

    struct BrokenStorage;

    impl PersistenceGateway for BrokenStorage {
        fn load(&self) -> Result<Option<LoadReport>> {
            Err(TrackerError::Storage("corrupt".into()))
        }

        fn save(&self, _: &[Transaction]) -> Result<()> {
            Err(TrackerError::Storage("disk full".into()))
        }

        fn describe(&self) -> String {
            "broken".into()
        }
    }

    fn tracker_with(storage: impl PersistenceGateway + 'static) -> Tracker {
        Tracker::open(
            Box::new(storage),
            DisplaySettings::default(),
            ViewProjector::default(),
        )
    }

    #[test]
    fn opens_with_previously_saved_transactions() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        let txn = Transaction::new(1, 30000.0, Category::Deposit, TransactionType::Income, date);
        let saved = vec![txn];
        let tracker = tracker_with(MemoryStorage::with_transactions(saved.clone()));
        assert_eq!(tracker.ledger().all(), saved.as_slice());
        assert!(tracker.load_warnings().is_empty());
    }

    #[test]
    fn unreadable_storage_starts_empty() {
        let tracker = tracker_with(BrokenStorage);
        assert!(tracker.ledger().is_empty());
        assert_eq!(tracker.load_warnings().len(), 1);
    }

    #[test]
    fn accepted_submission_resets_form_and_notifies() {
        let mut tracker = tracker_with(MemoryStorage::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        tracker.subscribe(move |snapshot| {
            let rows = snapshot.view.rows.len();
            sink.borrow_mut().push(rows);
        });

        let mut form = TransactionForm::new("30000", "Deposit", "income");
        let outcome = tracker.submit(&mut form).expect("accepted");
        assert!(outcome.persisted());
        assert!(form.is_empty());
        assert_eq!(outcome.transaction.amount(), 30000.0);

        let mut form = TransactionForm::new("1500", "Food", "expense");
        tracker.submit(&mut form).expect("accepted");

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(tracker.ledger().balance(), 28500.0);
    }

    #[test]
    fn rejected_submission_changes_nothing() {
        let mut tracker = tracker_with(MemoryStorage::new());
        let notified = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&notified);
        tracker.subscribe(move |_| *counter.borrow_mut() += 1);

        let mut form = TransactionForm::new("-20", "Food", "expense");
        let err = tracker.submit(&mut form).unwrap_err();
        assert_eq!(err, InputError::NonPositiveAmount("-20".into()));
        assert_eq!(form, TransactionForm::new("-20", "Food", "expense"));
        assert!(tracker.ledger().is_empty());
        assert_eq!(*notified.borrow(), 0);
    }

    #[test]
    fn failed_save_keeps_in_memory_entry() {
        let mut tracker = tracker_with(BrokenStorage);
        let mut form = TransactionForm::new("99", "Bills", "expense");
        let outcome = tracker.submit(&mut form).expect("accepted");
        assert!(!outcome.persisted());
        assert_eq!(tracker.ledger().len(), 1);
        assert!(tracker.save().is_err());
    }

    #[test]
    fn theme_toggle_publishes_snapshot() {
        let mut tracker = tracker_with(MemoryStorage::new());
        let themes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&themes);
        tracker.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.theme));

        assert_eq!(tracker.toggle_theme().theme, Theme::Dark);
        assert_eq!(tracker.toggle_theme().theme, Theme::Light);
        assert_eq!(*themes.borrow(), vec![Theme::Dark, Theme::Light]);
    }
}
