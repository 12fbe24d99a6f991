//! Session state: input validation, the owning tracker, and filesystem helpers.

pub mod form;
pub mod tracker;
pub mod utils;

pub use form::{parse_amount, Submission, TransactionForm};
pub use tracker::{Snapshot, SubmitOutcome, Tracker};
