use colored::Colorize;
use std::fmt;

/// Message categories used by the shell output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Writes shell messages to stdout. Plain mode drops colour and keeps the
/// textual labels so scripted runs stay greppable.
#[derive(Clone, Copy, Debug)]
pub struct Printer {
    pub plain: bool,
}

impl Printer {
    pub fn new(plain: bool) -> Self {
        Self { plain }
    }

    pub fn style(&self, kind: MessageKind, message: impl fmt::Display) -> String {
        let text = match kind {
            MessageKind::Info => message.to_string(),
            MessageKind::Success => format!("OK: {message}"),
            MessageKind::Warning => format!("WARNING: {message}"),
            MessageKind::Error => format!("ERROR: {message}"),
        };
        if self.plain {
            return text;
        }
        match kind {
            MessageKind::Info => text,
            MessageKind::Success => text.bright_green().to_string(),
            MessageKind::Warning => text.bright_yellow().to_string(),
            MessageKind::Error => text.bright_red().to_string(),
        }
    }

    pub fn info(&self, message: impl fmt::Display) {
        println!("{}", self.style(MessageKind::Info, message));
    }

    pub fn success(&self, message: impl fmt::Display) {
        println!("{}", self.style(MessageKind::Success, message));
    }

    pub fn warning(&self, message: impl fmt::Display) {
        println!("{}", self.style(MessageKind::Warning, message));
    }

    pub fn error(&self, message: impl fmt::Display) {
        println!("{}", self.style(MessageKind::Error, message));
    }
}
