use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{app_data_dir, config_file_in, ensure_dir},
    currency::{LocaleConfig, DEFAULT_LOCALE},
    errors::{Result, TrackerError},
    storage::json_backend::DEFAULT_RETENTION,
    view::{DisplaySettings, DEFAULT_CURRENCY},
};

const DEFAULT_LEDGER_FILE: &str = "transactions.json";
const TMP_SUFFIX: &str = "tmp";

/// Start-up configuration. Every field has a default, so a partial or missing
/// file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Relative paths resolve against the data directory.
    pub ledger_file: PathBuf,
    pub backup_retention: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.into(),
            currency: DEFAULT_CURRENCY.into(),
            ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE),
            backup_retention: DEFAULT_RETENTION,
        }
    }
}

impl Config {
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale)
    }

    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings::with_currency(self.currency.clone())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let path = config_file_in(&base);
        Self { base, path }
    }

    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            TrackerError::Config(format!("{}: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        ensure_dir(&self.base)?;
        let json = serde_json::to_string_pretty(config)?;
        let mut tmp = self.path.clone();
        tmp.set_extension(format!("json.{TMP_SUFFIX}"));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Absolute location of the ledger file named by `config`.
    pub fn ledger_path(&self, config: &Config) -> PathBuf {
        if config.ledger_file.is_absolute() {
            config.ledger_file.clone()
        } else {
            self.base.join(&config.ledger_file)
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
