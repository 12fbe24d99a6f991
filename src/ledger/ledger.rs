use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Local, NaiveDate, Utc};

use super::{category::Category, transaction::Transaction, transaction::TransactionType};

/// Last id handed out in this process; keeps ids unique across ledgers.
static LAST_ISSUED_ID: AtomicU64 = AtomicU64::new(0);

/// Ordered, append-only list of transactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    max_id: u64,
}

/// Gross income and expense figures. `expense` is reported as a positive magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps previously persisted transactions, keeping their order.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        let max_id = transactions.iter().map(Transaction::id).max().unwrap_or(0);
        Self {
            transactions,
            max_id,
        }
    }

    /// Records a new transaction dated today. `amount` must already be validated
    /// as a positive finite number.
    pub fn append(
        &mut self,
        amount: f64,
        category: Category,
        kind: TransactionType,
    ) -> &Transaction {
        self.append_dated(amount, category, kind, Local::now().date_naive())
    }

    pub(crate) fn append_dated(
        &mut self,
        amount: f64,
        category: Category,
        kind: TransactionType,
        date: NaiveDate,
    ) -> &Transaction {
        let id = next_id(self.max_id);
        self.max_id = id;
        let txn = Transaction::new(id, amount, category, kind, date);
        tracing::debug!(
            id,
            amount = txn.amount(),
            category = %txn.category(),
            "transaction appended"
        );
        self.transactions.push(txn);
        &self.transactions[self.transactions.len() - 1]
    }

    /// Net balance: income minus expenses. Zero for an empty ledger.
    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::amount).sum()
    }

    pub fn totals(&self) -> Totals {
        self.transactions
            .iter()
            .fold(Totals::default(), |mut totals, txn| {
                if txn.is_income() {
                    totals.income += txn.amount();
                } else {
                    totals.expense -= txn.amount();
                }
                totals
            })
    }

    /// All transactions in insertion (chronological) order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// Millisecond timestamp id, bumped past both the process-wide last id and the
/// ledger's own maximum so ids stay strictly increasing.
fn next_id(ledger_max: u64) -> u64 {
    let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let mut issued = now;
    let _ = LAST_ISSUED_ID.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
        issued = id_after(now, last, ledger_max);
        Some(issued)
    });
    issued
}

/// Saturates at `u64::MAX`; stored ids are capped at [`super::MAX_TRANSACTION_ID`]
/// so a loaded ledger always leaves room above its maximum.
fn id_after(now: u64, last_issued: u64, ledger_max: u64) -> u64 {
    now.max(last_issued.saturating_add(1))
        .max(ledger_max.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MAX_TRANSACTION_ID;

    fn sample() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.append(30000.0, Category::Deposit, TransactionType::Income);
        ledger.append(1500.0, Category::Food, TransactionType::Expense);
        ledger
    }

    #[test]
    fn empty_ledger_has_zero_balance() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balance(), 0.0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn balance_is_sum_of_signed_amounts() {
        let ledger = sample();
        assert_eq!(ledger.balance(), 28500.0);
        let expected: f64 = ledger.all().iter().map(|t| t.amount()).sum();
        assert_eq!(ledger.balance(), expected);
    }

    #[test]
    fn append_grows_by_one_and_lands_last() {
        let mut ledger = sample();
        let before = ledger.len();
        let id = ledger
            .append(250.0, Category::Transport, TransactionType::Expense)
            .id();
        assert_eq!(ledger.len(), before + 1);
        let last = ledger.all().last().unwrap();
        assert_eq!(last.id(), id);
        assert_eq!(last.amount(), -250.0);
        assert_eq!(last.date(), Local::now().date_naive());
    }

    #[test]
    fn ids_strictly_increase_even_within_one_millisecond() {
        let mut ledger = Ledger::new();
        for _ in 0..50 {
            ledger.append(1.0, Category::Food, TransactionType::Expense);
        }
        let ids: Vec<u64> = ledger.all().iter().map(|t| t.id()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn new_ids_stay_above_loaded_ids() {
        let far_future = 4_000_000_000_000_000;
        let date = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        let loaded = Transaction::new(
            far_future,
            10.0,
            Category::Bills,
            TransactionType::Expense,
            date,
        );
        let mut ledger = Ledger::from_transactions(vec![loaded]);
        let id = ledger
            .append(5.0, Category::Food, TransactionType::Expense)
            .id();
        assert!(id > far_future);
    }

    #[test]
    fn largest_storable_id_still_leaves_room_for_appends() {
        let now = 1_744_675_200_000;
        let id = id_after(now, now, MAX_TRANSACTION_ID);
        assert_eq!(id, MAX_TRANSACTION_ID + 1);
        assert!(id < u64::MAX);
    }

    #[test]
    fn id_after_saturates_instead_of_overflowing() {
        assert_eq!(id_after(10, 3, 7), 10);
        assert_eq!(id_after(10, 12, 7), 13);
        assert_eq!(id_after(10, 3, 40), 41);
        assert_eq!(id_after(0, u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn totals_split_income_and_expense() {
        let totals = sample().totals();
        assert_eq!(totals.income, 30000.0);
        assert_eq!(totals.expense, 1500.0);
    }
}
