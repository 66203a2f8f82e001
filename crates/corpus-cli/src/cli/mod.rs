//! CLI for corpus-fetch.

mod report;

use anyhow::Result;
use clap::Parser;
use corpus_core::config::{self, FetchConfig};
use corpus_core::Fetcher;
use std::path::PathBuf;

/// Exit code when `--strict` is set and some archive step failed.
pub const EXIT_STEP_FAILED: i32 = 2;

/// Download the enwik8/enwik9 benchmark corpora and decompress them into `data/`.
#[derive(Debug, Parser)]
#[command(name = "corpus-fetch")]
#[command(about = "Fetch and decompress compression-benchmark corpora", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/corpus-fetch/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the base address archives are fetched from.
    #[arg(long, value_name = "URL")]
    pub base_address: Option<String>,

    /// Archive to fetch (repeatable). Replaces the configured list.
    #[arg(long = "file", value_name = "NAME")]
    pub files: Vec<String>,

    /// Directory to store and decompress archives in (default: data).
    #[arg(long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Exit non-zero when any retrieval or decompression failed.
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, mut cfg: FetchConfig) -> FetchConfig {
        if let Some(base) = &self.base_address {
            cfg.base_address = base.clone();
        }
        if !self.files.is_empty() {
            cfg.filenames = self.files.clone();
        }
        if let Some(dir) = &self.target_dir {
            cfg.target_dir = dir.clone();
        }
        cfg
    }

    /// Parse process arguments and run. Returns the process exit code.
    pub fn run_from_args() -> Result<i32> {
        Cli::parse().run()
    }

    /// Load config, run the fetcher, print the report. Returns the process exit code.
    ///
    /// Fatal errors (bad config, target directory not creatable) are `Err`.
    pub fn run(self) -> Result<i32> {
        let loaded = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_default()?,
        };
        let cfg = self.apply_overrides(loaded);
        tracing::debug!("effective config: {:?}", cfg);

        let report = Fetcher::new(cfg).run()?;
        report::print_report(&report);
        tracing::info!(
            downloaded = report.downloaded().count(),
            failures = report.failure_count(),
            "run complete"
        );

        if self.strict && report.has_failures() {
            return Ok(EXIT_STEP_FAILED);
        }
        Ok(0)
    }
}
