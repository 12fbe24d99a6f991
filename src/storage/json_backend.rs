use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{
    core::utils::ensure_dir,
    errors::{Result, TrackerError},
    ledger::Transaction,
};

use super::{LoadReport, PersistenceGateway};

const BACKUP_DIR: &str = "backups";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Stores the ledger as a pretty-printed JSON array in a single file.
///
/// Writes go through a temporary sibling and a rename, so a failed save never
/// truncates the previous file. Before each overwrite the old file is copied
/// into `backups/` next to it; only the newest `retention` copies are kept.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>, retention: Option<usize>) -> Self {
        let path = path.into();
        let backups_dir = path
            .parent()
            .map(|parent| parent.join(BACKUP_DIR))
            .unwrap_or_else(|| PathBuf::from(BACKUP_DIR));
        Self {
            path,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }

    pub fn backup_path(&self, backup_name: &str) -> PathBuf {
        self.backups_dir.join(backup_name)
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("transactions");
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup = self
            .backups_dir
            .join(format!("{stem}_{timestamp}.{BACKUP_EXTENSION}"));
        fs::copy(&self.path, &backup)?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<()> {
        for stale in self.list_backups()?.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(self.backup_path(stale)) {
                tracing::warn!(backup = %stale, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl PersistenceGateway for JsonStorage {
    fn load(&self) -> Result<Option<LoadReport>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)?;
        let report = parse_transactions(&data)?;
        tracing::info!(
            path = %self.path.display(),
            loaded = report.transactions.len(),
            rejected = report.warnings.len(),
            "ledger loaded"
        );
        Ok(Some(report))
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(transactions)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), count = transactions.len(), "ledger saved");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parses a stored JSON array record by record. Records that are malformed,
/// fail validation, or repeat an earlier id are skipped with a warning.
pub fn parse_transactions(data: &str) -> Result<LoadReport> {
    let records: Vec<serde_json::Value> = serde_json::from_str(data).map_err(not_an_array)?;

    let mut report = LoadReport::default();
    let mut seen = HashSet::new();
    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(record) {
            Ok(txn) if !seen.insert(txn.id()) => {
                report
                    .warnings
                    .push(format!("record {index}: duplicate id {}", txn.id()));
            }
            Ok(txn) => report.transactions.push(txn),
            Err(err) => report.warnings.push(format!("record {index}: {err}")),
        }
    }
    for warning in &report.warnings {
        tracing::warn!("rejected stored transaction: {warning}");
    }
    Ok(report)
}

fn not_an_array(err: serde_json::Error) -> TrackerError {
    TrackerError::Storage(format!("stored ledger is not a JSON array: {err}"))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
