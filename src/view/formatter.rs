use chrono::NaiveDate;

use crate::{
    currency::{self, LocaleConfig},
    ledger::{Category, Transaction},
};

/// Absolute amount at or above which a transaction is flagged for emphasis.
pub const LARGE_TRANSACTION_THRESHOLD: f64 = 10_000.0;

pub const FALLBACK_ICON: &str = "📌";

/// Symbol shown next to a category. Unrecognised labels share one fallback.
pub fn icon(category: &Category) -> &'static str {
    match category {
        Category::Food => "🍕",
        Category::Transport => "🚗",
        Category::Deposit => "💰",
        Category::Bills => "💡",
        Category::Entertainment => "🎬",
        Category::Shopping => "🛍️",
        Category::Other(_) => FALLBACK_ICON,
    }
}

pub fn is_large(txn: &Transaction) -> bool {
    txn.amount().abs() >= LARGE_TRANSACTION_THRESHOLD
}

/// Turns transactions and balances into display strings for one locale.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    locale: LocaleConfig,
}

impl Formatter {
    pub fn new(locale: LocaleConfig) -> Self {
        Self { locale }
    }

    /// `+30,000 ₹` for income, `1,500 ₹` for expenses: negative amounts show
    /// only their magnitude, polarity is left to the surface.
    pub fn format_amount(&self, txn: &Transaction, currency: &str) -> String {
        let sign = if txn.amount() >= 0.0 { "+" } else { "" };
        let magnitude = currency::format_number(&self.locale, txn.amount().abs());
        format!("{sign}{magnitude} {currency}")
    }

    /// Net balance read-out, `-` prefixed when negative.
    pub fn format_balance(&self, balance: f64) -> String {
        currency::format_number(&self.locale, balance)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        currency::format_date(&self.locale, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionType;

    fn txn(amount: f64, kind: TransactionType) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2025, 4, 16).unwrap();
        Transaction::new(1, amount, Category::Food, kind, date)
    }

    #[test]
    fn known_categories_have_fixed_icons() {
        assert_eq!(icon(&Category::parse("Food")), "🍕");
        assert_eq!(icon(&Category::Transport), "🚗");
        assert_eq!(icon(&Category::Deposit), "💰");
        assert_eq!(icon(&Category::Bills), "💡");
        assert_eq!(icon(&Category::Entertainment), "🎬");
        assert_eq!(icon(&Category::Shopping), "🛍️");
    }

    #[test]
    fn fallback_icon_is_shared() {
        let unknown = icon(&Category::parse("Unknown"));
        assert_eq!(unknown, icon(&Category::parse("AnythingElse")));
        assert_eq!(unknown, FALLBACK_ICON);
        assert_eq!(icon(&Category::parse("food")), FALLBACK_ICON);
    }

    #[test]
    fn large_flag_boundary() {
        assert!(is_large(&txn(10_000.0, TransactionType::Income)));
        assert!(is_large(&txn(10_000.0, TransactionType::Expense)));
        assert!(!is_large(&txn(9_999.99, TransactionType::Expense)));
    }

    #[test]
    fn income_gets_plus_and_expense_shows_magnitude() {
        let formatter = Formatter::default();
        assert_eq!(
            formatter.format_amount(&txn(30_000.0, TransactionType::Income), "₹"),
            "+30,000 ₹"
        );
        assert_eq!(
            formatter.format_amount(&txn(1_500.0, TransactionType::Expense), "₹"),
            "1,500 ₹"
        );
    }

    #[test]
    fn amounts_follow_locale_grouping() {
        let formatter = Formatter::new(LocaleConfig::for_tag("en-US"));
        assert_eq!(
            formatter.format_amount(&txn(1_250_000.5, TransactionType::Income), "$"),
            "+1,250,000.5 $"
        );
        let indian = Formatter::default();
        assert_eq!(
            indian.format_amount(&txn(1_250_000.5, TransactionType::Income), "₹"),
            "+12,50,000.5 ₹"
        );
    }

    #[test]
    fn balance_keeps_minus_sign() {
        let formatter = Formatter::default();
        assert_eq!(formatter.format_balance(-2_500.0), "-2,500");
        assert_eq!(formatter.format_balance(0.0), "0");
    }
}
