use std::sync::Mutex;

use crate::{
    errors::{Result, TrackerError},
    ledger::Transaction,
};

use super::{LoadReport, PersistenceGateway};

/// Keeps the saved list in process memory. Useful for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: Mutex<Option<Vec<Transaction>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            saved: Mutex::new(Some(transactions)),
        }
    }

    /// Copy of the last saved list, if any.
    pub fn snapshot(&self) -> Option<Vec<Transaction>> {
        self.saved.lock().ok().and_then(|guard| guard.clone())
    }
}

impl PersistenceGateway for MemoryStorage {
    fn load(&self) -> Result<Option<LoadReport>> {
        let guard = self.saved.lock().map_err(|_| lock_poisoned())?;
        Ok(guard.as_ref().map(|transactions| LoadReport {
            transactions: transactions.clone(),
            warnings: Vec::new(),
        }))
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let mut guard = self.saved.lock().map_err(|_| lock_poisoned())?;
        *guard = Some(transactions.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

fn lock_poisoned() -> TrackerError {
    TrackerError::Storage("memory storage lock poisoned".into())
}
