//! Sequential fetch-and-decompress over the configured archive list.
//!
//! Each archive's pipeline is independent: a failed retrieval or
//! decompression is recorded and the run moves on. Only configuration and
//! target-directory errors abort.

use crate::archive::ArchiveDescriptor;
use crate::config::FetchConfig;
use crate::decompress::decompress_in_place;
use crate::error::FetchError;
use crate::retrieve::retrieve_no_clobber;
use crate::workdir::WorkDir;

pub use crate::retrieve::Retrieval;

/// Result of both steps for one archive.
#[derive(Debug)]
pub struct ArchiveOutcome {
    pub archive: ArchiveDescriptor,
    pub retrieval: Result<Retrieval, FetchError>,
    /// Bytes of decompressed output on success.
    pub decompression: Result<u64, FetchError>,
}

impl ArchiveOutcome {
    pub fn is_ok(&self) -> bool {
        self.retrieval.is_ok() && self.decompression.is_ok()
    }
}

/// Per-archive outcomes of a run, in configured order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<ArchiveOutcome>,
}

impl RunReport {
    /// Number of failed steps (retrieval and decompression counted separately).
    pub fn failure_count(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| o.retrieval.is_err() as usize + o.decompression.is_err() as usize)
            .sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Archives that were actually downloaded this run.
    pub fn downloaded(&self) -> impl Iterator<Item = &ArchiveDescriptor> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.retrieval, Ok(Retrieval::Downloaded { .. })))
            .map(|o| &o.archive)
    }
}

pub struct Fetcher {
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Runs the whole sequence. Returns `Err` only for fatal errors.
    pub fn run(&self) -> Result<RunReport, FetchError> {
        self.config.validate()?;
        let workdir = WorkDir::acquire(&self.config.target_dir)?;
        let limits = self.config.transfer_limits();

        let mut report = RunReport::default();
        for archive in self.config.archives() {
            let url = archive.url();
            let archive_path = workdir.join(&archive.filename);
            let output_path = workdir.join(&archive.decompressed_name());

            let retrieval = retrieve_no_clobber(&url, &archive_path, &limits).map_err(|source| {
                FetchError::Retrieval {
                    url: url.clone(),
                    source,
                }
            });
            if let Err(e) = &retrieval {
                tracing::warn!(archive = %archive.filename, "{}", e);
            }

            let decompression = decompress_in_place(&archive_path, &output_path);
            if let Err(e) = &decompression {
                tracing::warn!(archive = %archive.filename, "{}", e);
            }

            report.outcomes.push(ArchiveOutcome {
                archive,
                retrieval,
                decompression,
            });
        }

        tracing::info!(
            archives = report.outcomes.len(),
            failures = report.failure_count(),
            dir = %workdir.root().display(),
            "fetch run finished"
        );
        Ok(report)
    }
}
