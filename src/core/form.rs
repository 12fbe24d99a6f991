use crate::{
    errors::InputError,
    ledger::{Category, TransactionType},
};

/// Raw, unvalidated fields of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub amount: String,
    pub category: String,
    pub kind: String,
}

/// A submission that passed validation and may be appended to the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub amount: f64,
    pub category: Category,
    pub kind: TransactionType,
}

impl TransactionForm {
    pub fn new(
        amount: impl Into<String>,
        category: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            kind: kind.into(),
        }
    }

    pub fn validate(&self) -> Result<Submission, InputError> {
        let amount = parse_amount(&self.amount)?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(InputError::MissingCategory);
        }
        let kind = self.kind.parse::<TransactionType>()?;
        Ok(Submission {
            amount,
            category: Category::parse(category),
            kind,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Accepts positive finite decimals only.
pub fn parse_amount(raw: &str) -> Result<f64, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::MissingAmount);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| InputError::NonNumericAmount(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(InputError::NonNumericAmount(trimmed.to_string()));
    }
    if value <= 0.0 {
        return Err(InputError::NonPositiveAmount(trimmed.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_produces_submission() {
        let form = TransactionForm::new(" 1500 ", "Food", "expense");
        let submission = form.validate().expect("valid");
        assert_eq!(submission.amount, 1500.0);
        assert_eq!(submission.category, Category::Food);
        assert_eq!(submission.kind, TransactionType::Expense);
    }

    #[test]
    fn amount_must_be_positive_number() {
        assert_eq!(parse_amount(""), Err(InputError::MissingAmount));
        for raw in ["abc", "inf", "NaN"] {
            let expected = InputError::NonNumericAmount(raw.into());
            assert_eq!(parse_amount(raw), Err(expected));
        }
        for raw in ["0", "-5"] {
            let expected = InputError::NonPositiveAmount(raw.into());
            assert_eq!(parse_amount(raw), Err(expected));
        }
        assert_eq!(parse_amount("12.75"), Ok(12.75));
    }

    #[test]
    fn missing_category_and_type_are_rejected() {
        let form = TransactionForm::new("10", "   ", "income");
        assert_eq!(form.validate(), Err(InputError::MissingCategory));
        let form = TransactionForm::new("10", "Food", "");
        assert_eq!(form.validate(), Err(InputError::MissingType));
        let form = TransactionForm::new("10", "Food", "refund");
        let expected = InputError::InvalidType("refund".into());
        assert_eq!(form.validate(), Err(expected));
    }

    #[test]
    fn reset_clears_every_field() {
        let mut form = TransactionForm::new("10", "Food", "income");
        form.reset();
        assert!(form.is_empty());
    }
}
