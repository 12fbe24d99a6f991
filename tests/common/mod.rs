#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use pocket_ledger::ledger::{Category, Transaction, TransactionType};
use tempfile::TempDir;

pub const BIN_NAME: &str = "pocket_ledger_cli";

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh data directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// CLI in script mode, reading commands from stdin, with its data under `home`.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("POCKET_LEDGER_CLI_SCRIPT", "1")
        .env("POCKET_LEDGER_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn sample_transactions() -> Vec<Transaction> {
    let deposit_day = day(2025, 4, 15);
    let food_day = day(2025, 4, 16);
    let income = TransactionType::Income;
    let expense = TransactionType::Expense;
    vec![
        Transaction::new(1, 30000.0, Category::Deposit, income, deposit_day),
        Transaction::new(2, 1500.0, Category::Food, expense, food_day),
    ]
}
