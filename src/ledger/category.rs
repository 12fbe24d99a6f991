use std::fmt;

use serde::{Deserialize, Serialize};

/// Spending/earning label attached to every transaction.
///
/// Labels outside the recognised set are kept verbatim in [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Transport,
    Deposit,
    Bills,
    Entertainment,
    Shopping,
    Other(String),
}

/// Recognised categories in menu order.
pub static KNOWN_CATEGORIES: [Category; 6] = [
    Category::Food,
    Category::Transport,
    Category::Deposit,
    Category::Bills,
    Category::Entertainment,
    Category::Shopping,
];

impl Category {
    /// Maps a label onto a category. Surrounding whitespace is ignored, the rest
    /// must match a known label exactly: `food` stays `Other("food")`.
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        KNOWN_CATEGORIES
            .iter()
            .find(|known| known.label() == trimmed)
            .cloned()
            .unwrap_or_else(|| Category::Other(trimmed.to_string()))
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Deposit => "Deposit",
            Category::Bills => "Bills",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Other(label) => label,
        }
    }

}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::parse(&label)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::parse(label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognises_known_labels_after_trimming() {
        assert_eq!(Category::parse("Food"), Category::Food);
        assert_eq!(Category::parse("  Shopping "), Category::Shopping);
    }

    #[test]
    fn differently_cased_labels_are_kept_as_typed() {
        assert_eq!(Category::parse("food"), Category::Other("food".into()));
        assert_eq!(Category::parse("BILLS"), Category::Other("BILLS".into()));
        let json = serde_json::to_string(&Category::parse("food")).unwrap();
        assert_eq!(json, "\"food\"");
    }

    #[test]
    fn unknown_labels_are_kept_verbatim() {
        let category = Category::parse(" Gym membership ");
        assert_eq!(category, Category::Other("Gym membership".into()));
        assert_eq!(category.label(), "Gym membership");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"Entertainment\"");
        let back: Category = serde_json::from_str("\"Rent\"").unwrap();
        assert_eq!(back, Category::Other("Rent".into()));
    }
}
