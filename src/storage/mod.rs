//! Durable storage for the transaction list.

pub mod json_backend;
pub mod memory;

use crate::{errors::Result, ledger::Transaction};

/// Transactions recovered from storage plus one warning per rejected record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<String>,
}

/// Abstraction over persistence backends capable of storing the full ledger.
pub trait PersistenceGateway: Send + Sync {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<LoadReport>>;

    /// Replaces whatever was stored before with `transactions`.
    fn save(&self, transactions: &[Transaction]) -> Result<()>;

    /// Short human-readable location used in logs and the shell banner.
    fn describe(&self) -> String;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
