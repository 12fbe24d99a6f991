use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::{
    config::{Config, ConfigManager},
    core::{Tracker, TransactionForm},
    ledger::{Category, KNOWN_CATEGORIES},
    storage::JsonStorage,
    utils::build_info,
    view::{Formatter, ViewProjector},
};

use super::{output::Printer, render::Surface, CliError};

pub const SCRIPT_ENV: &str = "POCKET_LEDGER_CLI_SCRIPT";

const PROMPT: &str = "ledger> ";
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// One shell command as listed by `help` and offered by completion.
struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    about: &'static str,
}

const COMMANDS: [CommandSpec; 8] = [
    CommandSpec {
        name: "add",
        usage: "add <amount> <category> <income|expense>",
        about: "record a transaction",
    },
    CommandSpec {
        name: "list",
        usage: "list",
        about: "redraw the transaction list",
    },
    CommandSpec {
        name: "balance",
        usage: "balance",
        about: "show the current balance",
    },
    CommandSpec {
        name: "theme",
        usage: "theme",
        about: "toggle light/dark theme",
    },
    CommandSpec {
        name: "config",
        usage: "config [show|init]",
        about: "inspect or write the config file",
    },
    CommandSpec {
        name: "version",
        usage: "version",
        about: "show build information",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        about: "show this overview",
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        about: "leave the shell",
    },
];

const USAGE_WIDTH: usize = 41;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

enum LoopControl {
    Continue,
    Exit,
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };
    let mut shell = Shell::open(mode, ConfigManager::new());
    match mode {
        CliMode::Interactive => run_interactive(&mut shell),
        CliMode::Script => run_script(&mut shell),
    }
}

fn run_interactive(shell: &mut Shell) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new()));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if let LoopControl::Exit = shell.handle_line(trimmed) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                shell.printer.info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(shell: &mut Shell) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        let line = line?;
        if let LoopControl::Exit = shell.handle_line(&line) {
            break;
        }
    }
    Ok(())
}

/// Command dispatcher around one [`Tracker`] session.
struct Shell {
    tracker: Tracker,
    manager: ConfigManager,
    config: Config,
    printer: Printer,
    surface: Surface,
}

impl Shell {
    fn open(mode: CliMode, manager: ConfigManager) -> Self {
        let plain = mode == CliMode::Script;
        let printer = Printer::new(plain);
        let config = manager.load().unwrap_or_else(|err| {
            printer.warning(format!("{err}; using default settings"));
            Config::default()
        });

        let ledger_path = manager.ledger_path(&config);
        let storage = JsonStorage::new(ledger_path, Some(config.backup_retention));
        let projector = ViewProjector::new(Formatter::new(config.locale_config()));
        let mut tracker = Tracker::open(Box::new(storage), config.display_settings(), projector);

        let surface = Surface::new(plain, mode == CliMode::Interactive);
        tracker.subscribe(move |snapshot| surface.present(snapshot));

        let location = tracker.storage().describe();
        printer.info(format!("Pocket Ledger: {location}"));
        for warning in tracker.load_warnings() {
            printer.warning(warning);
        }
        surface.present(&tracker.snapshot());

        Self {
            tracker,
            manager,
            config,
            printer,
            surface,
        }
    }

    fn handle_line(&mut self, line: &str) -> LoopControl {
        let tokens = match split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                let message = format!("could not parse `{}`: {err}", line.trim());
                self.printer.warning(message);
                return LoopControl::Continue;
            }
        };
        let Some((raw, args)) = tokens.split_first() else {
            return LoopControl::Continue;
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        match raw.to_lowercase().as_str() {
            "add" => self.add(&args),
            "list" | "show" => self.surface.present(&self.tracker.snapshot()),
            "balance" => self.balance(),
            "theme" => {
                let theme = self.tracker.toggle_theme().theme;
                self.printer.success(format!("Theme switched to {theme}"));
            }
            "config" => self.config_command(&args),
            "version" => self.printer.info(build_info::current().summary()),
            "help" => self.help(),
            "exit" | "quit" => return LoopControl::Exit,
            other => self.unknown(other),
        }
        LoopControl::Continue
    }

    fn add(&mut self, args: &[&str]) {
        let mut form = match args {
            [amount, category, kind] => TransactionForm::new(*amount, *category, *kind),
            _ => {
                self.printer.warning(format!("usage: {}", COMMANDS[0].usage));
                return;
            }
        };
        match self.tracker.submit(&mut form) {
            Ok(outcome) => {
                let txn = &outcome.transaction;
                let message = format!("Recorded {} {}", txn.category(), txn.kind());
                self.printer.success(message);
                if let Some(err) = outcome.save_error {
                    self.printer.warning(format!("kept in memory only: {err}"));
                }
            }
            Err(err) => self.printer.error(format!("Rejected: {err}")),
        }
    }

    fn balance(&self) {
        let snapshot = self.tracker.snapshot();
        let balance = &snapshot.view.summary.formatted;
        let message = format!("Balance: {balance} {}", snapshot.currency);
        self.printer.info(message);
    }

    fn config_command(&mut self, args: &[&str]) {
        match args.first().copied().unwrap_or("show") {
            "show" => self.show_config(),
            "init" => match self.manager.save(&self.config) {
                Ok(()) => {
                    let path = self.manager.path().display();
                    self.printer.success(format!("Wrote {path}"));
                }
                Err(err) => self.printer.error(err),
            },
            other => {
                let hint = format!("unknown config action `{other}` (use show or init)");
                self.printer.warning(hint);
            }
        }
    }

    fn show_config(&self) {
        let config = &self.config;
        let printer = &self.printer;
        let ledger_path = self.manager.ledger_path(config);
        printer.info(format!("Config file: {}", self.manager.path().display()));
        printer.info(format!("  data dir: {}", self.manager.base_dir().display()));
        printer.info(format!("  locale: {}", config.locale));
        printer.info(format!("  currency: {}", config.currency));
        printer.info(format!("  theme: {}", self.tracker.settings().theme));
        printer.info(format!("  ledger file: {}", ledger_path.display()));
        printer.info(format!("  backup retention: {}", config.backup_retention));
    }

    fn help(&self) {
        self.printer.info("Available commands:");
        for command in &COMMANDS {
            let usage = format!("{:<USAGE_WIDTH$}{}", command.usage, command.about);
            self.printer.info(format!("  {usage}"));
        }
        let categories: Vec<&str> = KNOWN_CATEGORIES.iter().map(Category::label).collect();
        let categories = categories.join(", ");
        let line = format!("Categories: {categories} (other labels are kept as typed)");
        self.printer.info(line);
    }

    fn unknown(&self, command: &str) {
        let suggestion = COMMANDS
            .iter()
            .map(|spec| (spec.name, strsim::jaro_winkler(command, spec.name)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1));
        let message = match suggestion {
            Some((name, _)) => format!("unknown command `{command}`. Did you mean `{name}`?"),
            None => format!("unknown command `{command}`. Type `help` for a list."),
        };
        self.printer.warning(message);
    }
}

/// Completes command names and, after `add <amount>`, category labels.
struct CommandHelper;

impl CommandHelper {
    fn new() -> Self {
        Self
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let needle = &prefix[start..];
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let options: Vec<&str> = match words.as_slice() {
            [] => COMMANDS.iter().map(|spec| spec.name).collect(),
            ["add", _] => KNOWN_CATEGORIES.iter().map(Category::label).collect(),
            ["add", _, _] => vec!["income", "expense"],
            _ => Vec::new(),
        };
        let candidates = options
            .into_iter()
            .filter(|option| option.starts_with(needle))
            .map(|option| Pair {
                display: option.to_string(),
                replacement: option.to_string(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}
