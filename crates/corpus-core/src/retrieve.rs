//! No-clobber HTTP retrieval.
//!
//! A single sequential GET writes the response body into a file that is
//! created on the first body byte. An existing file of the same name is
//! never touched and the remote is not contacted.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::TransferLimits;
use crate::error::RetrievalError;

/// What the retrieval step did for one archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retrieval {
    /// Fetched from the remote; `bytes` written to disk.
    Downloaded { bytes: u64 },
    /// A local file with this name already existed.
    Skipped,
}

/// Fetches `url` into `dest` unless `dest` already exists.
pub fn retrieve_no_clobber(
    url: &str,
    dest: &Path,
    limits: &TransferLimits,
) -> Result<Retrieval, RetrievalError> {
    if fs::symlink_metadata(dest).is_ok() {
        tracing::info!(path = %dest.display(), "already present, not retrieving");
        return Ok(Retrieval::Skipped);
    }
    tracing::info!(%url, path = %dest.display(), "retrieving");
    let bytes = download_to_new_file(url, dest, limits)?;
    Ok(Retrieval::Downloaded { bytes })
}

/// Opens `dest` on first use. Fails if it appeared since the existence check.
fn write_chunk(out: &mut Option<BufWriter<File>>, dest: &Path, data: &[u8]) -> io::Result<()> {
    if out.is_none() {
        let file = File::options().write(true).create_new(true).open(dest)?;
        *out = Some(BufWriter::new(file));
    }
    match out.as_mut() {
        Some(w) => w.write_all(data),
        None => Err(io::Error::other("output file not open")),
    }
}

fn download_to_new_file(
    url: &str,
    dest: &Path,
    limits: &TransferLimits,
) -> Result<u64, RetrievalError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    // Error statuses fail before any body byte reaches the write callback.
    easy.fail_on_error(true)?;
    easy.connect_timeout(limits.connect_timeout)?;
    easy.low_speed_limit(limits.low_speed_limit)?;
    easy.low_speed_time(limits.low_speed_time)?;
    if let Some(t) = limits.timeout {
        easy.timeout(t)?;
    }

    let mut out: Option<BufWriter<File>> = None;
    let mut written = 0u64;
    let mut storage_err: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match write_chunk(&mut out, dest, data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                storage_err = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = storage_err {
        return Err(RetrievalError::Storage(e));
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            let code = easy.response_code()?;
            return Err(RetrievalError::Http(code));
        }
        if out.is_some() {
            tracing::warn!(
                path = %dest.display(),
                written,
                "transfer aborted; partial file left on disk"
            );
        }
        return Err(RetrievalError::Curl(e));
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        if out.take().is_some() {
            if let Err(rm) = fs::remove_file(dest) {
                tracing::warn!(path = %dest.display(), "could not remove rejected body: {}", rm);
            }
        }
        return Err(RetrievalError::Http(code));
    }

    match out {
        Some(mut w) => w.flush()?,
        // Empty body: still leave a file behind so the next run skips it.
        None => {
            File::options().write(true).create_new(true).open(dest)?;
        }
    }
    tracing::info!(%url, bytes = written, "retrieved");
    Ok(written)
}
