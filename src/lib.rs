#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger records income and expense entries, keeps a running balance,
//! and projects the ledger into a themed, render-ready list view.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;
pub mod view;

use std::sync::Once;

pub use crate::core::{Snapshot, SubmitOutcome, Tracker, TransactionForm};
pub use errors::{InputError, TrackerError};
pub use ledger::{Category, Ledger, Transaction, TransactionType};
pub use storage::{JsonStorage, MemoryStorage, PersistenceGateway};
pub use view::{DisplaySettings, Theme, ViewModel, ViewProjector};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Pocket Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }

    #[test]
    fn root_exports_cover_a_full_session() {
        use super::*;

        let mut tracker = Tracker::open(
            Box::new(MemoryStorage::new()),
            DisplaySettings::default(),
            ViewProjector::default(),
        );
        let outcome = tracker
            .submit(&mut TransactionForm::new("12", "Transport", "expense"))
            .expect("accepted");
        assert_eq!(outcome.transaction.kind(), TransactionType::Expense);
        assert_eq!(tracker.ledger().balance(), -12.0);
    }
}
