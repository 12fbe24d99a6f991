//! Derived, render-ready projections of ledger state.

pub mod formatter;
pub mod projector;
pub mod theme;

pub use formatter::{icon, is_large, Formatter, FALLBACK_ICON, LARGE_TRANSACTION_THRESHOLD};
pub use projector::{BalanceSummary, Polarity, RowDescriptor, ViewModel, ViewProjector};
pub use theme::{DisplaySettings, Theme, DEFAULT_CURRENCY};
