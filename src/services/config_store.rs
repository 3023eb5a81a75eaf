// Config Store
// Persists the detector calibration as JSON under the platform config dir.
// Every save of an existing file first writes a timestamped backup; old
// backups are pruned so the directory stays bounded.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use crate::services::detection::DetectorConfig;

const CONFIG_FILE: &str = "config.json";
const APP_DIR: &str = "quillcheck";
const MAX_BACKUPS: usize = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("platform config directory unavailable")]
    NoConfigDir,
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the platform config directory.
    pub fn new() -> Result<Self, ConfigError> {
        let dir = dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join(APP_DIR);
        Self::at(dir)
    }

    /// Store rooted at an explicit directory. Creates it if missing.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    /// Load the stored config. A missing file yields the default; a corrupt
    /// file is preserved as a backup and replaced by the default.
    pub fn load(&self) -> Result<DetectorConfig, ConfigError> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(DetectorConfig::default());
        }
        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str(&raw) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config unreadable, keeping backup and using defaults");
                self.backup_existing(&path)?;
                Ok(DetectorConfig::default())
            }
        }
    }

    /// Write the config, backing up any existing file first.
    pub fn save(&self, config: &DetectorConfig) -> Result<(), ConfigError> {
        let path = self.config_path();
        if path.exists() {
            self.backup_existing(&path)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&path, json)?;
        info!(path = %path.display(), "config saved");
        self.prune_backups()?;
        Ok(())
    }

    fn backup_existing(&self, path: &Path) -> Result<(), ConfigError> {
        let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        let backup = self.dir.join(format!("config-{stamp}.json.bak"));
        fs::copy(path, &backup)?;
        Ok(())
    }

    /// Keep only the newest MAX_BACKUPS backup files.
    fn prune_backups(&self) -> Result<(), ConfigError> {
        let mut backups: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with("config-") && n.ends_with(".json.bak"))
                    .unwrap_or(false)
            })
            .collect();
        if backups.len() <= MAX_BACKUPS {
            return Ok(());
        }
        // Timestamped names sort chronologically.
        backups.sort();
        for stale in &backups[..backups.len() - MAX_BACKUPS] {
            if let Err(err) = fs::remove_file(stale) {
                warn!(path = %stale.display(), error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}
