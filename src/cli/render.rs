use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use crate::{
    core::Snapshot,
    ledger::TransactionType,
    view::{Polarity, RowDescriptor, Theme, ViewModel},
};

const LARGE_MARKER: &str = "[large]";

/// Terminal display surface. Every update redraws the whole view.
#[derive(Debug, Clone, Copy)]
pub struct Surface {
    plain: bool,
    clear_screen: bool,
}

impl Surface {
    pub fn new(plain: bool, clear_screen: bool) -> Self {
        Self {
            plain,
            clear_screen,
        }
    }

    /// Redraws `snapshot` on stdout. Terminal write failures are logged and
    /// otherwise ignored; the next snapshot redraws everything anyway.
    pub fn present(&self, snapshot: &Snapshot) {
        if let Err(err) = self.draw(&mut io::stdout(), snapshot) {
            tracing::debug!(error = %err, "failed to redraw terminal view");
        }
    }

    fn draw(&self, out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
        if self.clear_screen {
            execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        write!(out, "{}", self.render(snapshot))?;
        out.flush()
    }

    pub fn render(&self, snapshot: &Snapshot) -> String {
        let currency = snapshot.currency.as_str();
        let palette = Palette {
            theme: snapshot.theme,
            plain: self.plain,
        };
        let mut out = String::new();
        let title = format!("=== Pocket Ledger [{}] ===", snapshot.theme);
        out.push_str(&palette.header(&title));
        out.push('\n');
        out.push_str(&balance_line(&snapshot.view, currency, &palette));
        out.push('\n');
        let summary = &snapshot.view.summary;
        let totals = format!(
            "Income: {} {currency}  Expenses: {} {currency}",
            summary.formatted_income, summary.formatted_expense
        );
        out.push_str(&palette.muted(&totals));
        out.push('\n');

        if snapshot.view.rows.is_empty() {
            out.push_str(&palette.muted("No transactions yet."));
            out.push('\n');
            return out;
        }

        let width = snapshot
            .view
            .rows
            .iter()
            .map(|row| row.category.chars().count() + row.date.len() + 3)
            .max()
            .unwrap_or(0);
        for row in &snapshot.view.rows {
            out.push_str(&row_line(row, width, &palette));
            out.push('\n');
        }
        out
    }
}

fn balance_line(view: &ViewModel, currency: &str, palette: &Palette) -> String {
    let amount = format!("{} {}", view.summary.formatted, currency);
    let amount = match view.summary.polarity {
        Polarity::NonNegative => palette.positive(&amount),
        Polarity::Negative => palette.negative(&amount),
    };
    format!("Balance: {amount}")
}

fn row_line(row: &RowDescriptor, width: usize, palette: &Palette) -> String {
    let label = format!("{} ({})", row.category, row.date);
    let amount = match row.kind {
        TransactionType::Income => palette.positive(&row.amount),
        TransactionType::Expense => palette.negative(&row.amount),
    };
    let mut line = format!("{} {:<width$}  {}", row.icon, label, amount);
    if palette.plain {
        line.push_str(&format!("  {}", row.kind));
    }
    if row.large {
        line.push_str("  ");
        line.push_str(&palette.emphasis(LARGE_MARKER));
    }
    line
}

/// Two exhaustive palettes, one per theme. Plain mode disables colour entirely.
struct Palette {
    theme: Theme,
    plain: bool,
}

impl Palette {
    fn paint(
        &self,
        text: &str,
        light: fn(&str) -> ColoredString,
        dark: fn(&str) -> ColoredString,
    ) -> String {
        if self.plain {
            return text.to_string();
        }
        match self.theme {
            Theme::Light => light(text).to_string(),
            Theme::Dark => dark(text).to_string(),
        }
    }

    fn header(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().blue(), |t| t.bold().bright_cyan())
    }

    fn positive(&self, text: &str) -> String {
        self.paint(text, |t| t.green(), |t| t.bright_green())
    }

    fn negative(&self, text: &str) -> String {
        self.paint(text, |t| t.red(), |t| t.bright_red())
    }

    fn muted(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed(), |t| t.white())
    }

    fn emphasis(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().yellow(), |t| t.bold().bright_yellow())
    }
}
