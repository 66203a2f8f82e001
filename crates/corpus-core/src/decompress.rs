//! In-place bzip2 decompression.
//!
//! Streams the archive into its decompressed sibling, truncating any earlier
//! output. The archive itself is kept.

use bzip2::read::MultiBzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::FetchError;

const BUF_SIZE: usize = 1024 * 1024;

/// Decompresses `archive` into `output`, returning the number of bytes written.
///
/// On a decode or write failure the partial `output` is removed.
pub fn decompress_in_place(archive: &Path, output: &Path) -> Result<u64, FetchError> {
    let err = |source: io::Error| FetchError::Decompression {
        path: archive.to_path_buf(),
        source,
    };

    let input = File::open(archive).map_err(err)?;
    let mut decoder = MultiBzDecoder::new(BufReader::with_capacity(BUF_SIZE, input));
    let out = File::create(output).map_err(err)?;
    let mut writer = BufWriter::with_capacity(BUF_SIZE, out);

    tracing::info!(
        archive = %archive.display(),
        output = %output.display(),
        "decompressing"
    );
    let copied = io::copy(&mut decoder, &mut writer).and_then(|n| writer.flush().map(|()| n));
    match copied {
        Ok(n) => {
            tracing::info!(output = %output.display(), bytes = n, "decompressed");
            Ok(n)
        }
        Err(e) => {
            drop(writer);
            if let Err(rm) = fs::remove_file(output) {
                tracing::warn!(output = %output.display(), "could not remove partial output: {}", rm);
            }
            Err(err(e))
        }
    }
}
