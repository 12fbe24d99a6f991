use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "₹";

/// Presentation palette. Toggles between two states forever; never touches ledger data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-scoped display preferences. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub theme: Theme,
    pub currency: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl DisplaySettings {
    pub fn with_currency(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            ..Self::default()
        }
    }

    /// Flips the theme and returns the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_light_theme_and_rupee() {
        let settings = DisplaySettings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.currency, "₹");
    }

    #[test]
    fn toggle_alternates_between_light_and_dark() {
        let mut settings = DisplaySettings::default();
        assert_eq!(settings.toggle_theme(), Theme::Dark);
        assert_eq!(settings.toggle_theme(), Theme::Light);
        for _ in 0..10 {
            settings.toggle_theme();
        }
        assert_eq!(settings.theme, Theme::Light);
    }
}
