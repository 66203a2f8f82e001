//! Human-readable run summary: one line per archive, failures on stderr.

use corpus_core::{ArchiveOutcome, Retrieval, RunReport};

pub fn print_report(report: &RunReport) {
    for outcome in &report.outcomes {
        let line = summary_line(outcome);
        if outcome.is_ok() {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }
    let failures = report.failure_count();
    if failures > 0 {
        eprintln!("{} step(s) failed; see messages above.", failures);
    }
}

fn summary_line(outcome: &ArchiveOutcome) -> String {
    let fetched = match &outcome.retrieval {
        Ok(Retrieval::Downloaded { bytes }) => format!("downloaded {:.1} MiB", mib(*bytes)),
        Ok(Retrieval::Skipped) => "already present".to_string(),
        Err(e) => format!("retrieval failed: {}", e),
    };
    let unpacked = match &outcome.decompression {
        Ok(bytes) => format!(
            "decompressed {} ({:.1} MiB)",
            outcome.archive.decompressed_name(),
            mib(*bytes)
        ),
        Err(e) => format!("decompression failed: {}", e),
    };
    format!("{}: {}; {}", outcome.archive.filename, fetched, unpacked)
}

fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1_048_576.0
}
