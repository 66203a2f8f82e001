//! Archive descriptors: where an archive comes from and what it unpacks to.

/// Suffix rewrites applied when naming the decompressed output, checked in order.
const SUFFIX_MAP: &[(&str, &str)] = &[(".tbz2", ".tar"), (".tbz", ".tar"), (".bz2", ""), (".bz", "")];

/// Appended when the archive name carries no recognised compression suffix.
const FALLBACK_SUFFIX: &str = ".out";

/// One remote archive: a base address plus the file name under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveDescriptor {
    pub base_address: String,
    pub filename: String,
}

impl ArchiveDescriptor {
    pub fn new(base_address: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            base_address: base_address.into(),
            filename: filename.into(),
        }
    }

    /// Source URL: base address, one `/`, file name.
    pub fn url(&self) -> String {
        format!("{}/{}", self.base_address.trim_end_matches('/'), self.filename)
    }

    /// Name of the decompressed sibling (compression suffix removed).
    pub fn decompressed_name(&self) -> String {
        decompressed_name(&self.filename)
    }
}

/// Derives the decompressed file name the way `bunzip2` does.
///
/// `x.bz2` → `x`, `x.tbz2` → `x.tar`, anything else → `x.out`.
pub fn decompressed_name(filename: &str) -> String {
    for (suffix, replacement) in SUFFIX_MAP {
        if let Some(stem) = filename.strip_suffix(suffix) {
            if !stem.is_empty() {
                return format!("{}{}", stem, replacement);
            }
        }
    }
    format!("{}{}", filename, FALLBACK_SUFFIX)
}

/// Returns true if `name` is safe to use as a single path component.
///
/// Rejects empty names, `.`/`..`, separators, NUL and control characters.
pub fn is_plain_filename(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    !name
        .chars()
        .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}
