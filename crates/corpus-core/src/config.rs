use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::archive::{is_plain_filename, ArchiveDescriptor};
use crate::error::FetchError;

/// Remote directory holding the Large Text Compression Benchmark corpora.
pub const DEFAULT_BASE_ADDRESS: &str = "https://cs.fit.edu/~mmahoney/compression";

/// Archives fetched when no list is configured.
pub const DEFAULT_FILENAMES: &[&str] = &["enwik8.bz2", "enwik9.bz2"];

/// Destination directory, relative to the invocation directory.
pub const DEFAULT_TARGET_DIR: &str = "data";

/// Fetcher configuration, optionally loaded from `~/.config/corpus-fetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL the archive names are appended to.
    pub base_address: String,
    /// Archive file names, processed in order.
    pub filenames: Vec<String>,
    /// Directory the archives are stored and decompressed in.
    pub target_dir: PathBuf,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Abort a transfer that stays below this many bytes/sec ...
    pub low_speed_limit_bytes: u32,
    /// ... for this many seconds.
    pub low_speed_time_secs: u64,
    /// Optional total timeout per request, in seconds (None = unlimited).
    pub timeout_secs: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            filenames: DEFAULT_FILENAMES.iter().map(|s| s.to_string()).collect(),
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            connect_timeout_secs: 30,
            low_speed_limit_bytes: 1024,
            low_speed_time_secs: 60,
            timeout_secs: None,
        }
    }
}

/// Per-request transfer limits handed to the retrieval step.
#[derive(Debug, Clone, Copy)]
pub struct TransferLimits {
    pub connect_timeout: Duration,
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub timeout: Option<Duration>,
}

impl FetchConfig {
    /// Archive descriptors in configured order.
    pub fn archives(&self) -> Vec<ArchiveDescriptor> {
        self.filenames
            .iter()
            .map(|f| ArchiveDescriptor::new(self.base_address.clone(), f.clone()))
            .collect()
    }

    pub fn transfer_limits(&self) -> TransferLimits {
        TransferLimits {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            low_speed_limit: self.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }

    /// Checks the base address and archive names before any I/O happens.
    pub fn validate(&self) -> Result<(), FetchError> {
        let parsed = url::Url::parse(&self.base_address).map_err(|e| {
            FetchError::Config(format!("invalid base address {:?}: {}", self.base_address, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::Config(format!(
                "unsupported scheme {:?} in base address",
                parsed.scheme()
            )));
        }
        if self.filenames.is_empty() {
            return Err(FetchError::Config("archive list is empty".to_string()));
        }
        if let Some(bad) = self.filenames.iter().find(|f| !is_plain_filename(f)) {
            return Err(FetchError::Config(format!(
                "archive name {:?} is not a plain file name",
                bad
            )));
        }
        if self.target_dir.as_os_str().is_empty() {
            return Err(FetchError::Config("target directory is empty".to_string()));
        }
        Ok(())
    }
}

/// Location of the user config file, if one exists.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("corpus-fetch")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load configuration from `path`. Keys missing from the file take their defaults.
pub fn load_from_path(path: &Path) -> Result<FetchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load the user config if present; otherwise the built-in defaults. Never writes.
pub fn load_or_default() -> Result<FetchConfig> {
    match config_path()? {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load_from_path(&path)
        }
        None => Ok(FetchConfig::default()),
    }
}
