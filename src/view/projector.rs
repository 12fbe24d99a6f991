use crate::ledger::{Ledger, Totals, Transaction, TransactionType};

use super::{
    formatter::{icon, is_large, Formatter},
    theme::DisplaySettings,
};

/// Sign classification of a balance, used only for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    NonNegative,
    Negative,
}

impl Polarity {
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            Polarity::NonNegative
        } else {
            Polarity::Negative
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSummary {
    pub balance: f64,
    pub polarity: Polarity,
    pub formatted: String,
    pub totals: Totals,
    pub formatted_income: String,
    pub formatted_expense: String,
}

/// One render-ready line of the transaction list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    pub id: u64,
    pub icon: &'static str,
    pub category: String,
    pub date: String,
    pub amount: String,
    pub kind: TransactionType,
    pub large: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub summary: BalanceSummary,
    /// Most recent transaction first.
    pub rows: Vec<RowDescriptor>,
}

/// Derives a [`ViewModel`] from ledger state. Holds no state of its own
/// besides the formatter it renders with.
#[derive(Debug, Clone, Default)]
pub struct ViewProjector {
    formatter: Formatter,
}

impl ViewProjector {
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }

    pub fn project(&self, ledger: &Ledger, settings: &DisplaySettings) -> ViewModel {
        let balance = ledger.balance();
        let totals = ledger.totals();
        let summary = BalanceSummary {
            balance,
            polarity: Polarity::of(balance),
            formatted: self.formatter.format_balance(balance),
            totals,
            formatted_income: self.formatter.format_balance(totals.income),
            formatted_expense: self.formatter.format_balance(totals.expense),
        };
        let rows = ledger
            .all()
            .iter()
            .rev()
            .map(|txn| self.row(txn, &settings.currency))
            .collect();
        ViewModel { summary, rows }
    }

    pub fn row(&self, txn: &Transaction, currency: &str) -> RowDescriptor {
        RowDescriptor {
            id: txn.id(),
            icon: icon(txn.category()),
            category: txn.category().label().to_string(),
            date: self.formatter.format_date(txn.date()),
            amount: self.formatter.format_amount(txn, currency),
            kind: txn.kind(),
            large: is_large(txn),
        }
    }
}
