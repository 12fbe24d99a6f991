//! Transaction model and the append-only ledger that owns it.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{Category, KNOWN_CATEGORIES};
pub use ledger::{Ledger, Totals};
pub use transaction::{parse_date, Transaction, TransactionType, DATE_FORMAT, MAX_TRANSACTION_ID};
