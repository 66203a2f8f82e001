pub mod archive;
pub mod config;
pub mod decompress;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod retrieve;
pub mod workdir;

pub use archive::ArchiveDescriptor;
pub use config::FetchConfig;
pub use error::{FetchError, RetrievalError};
pub use fetcher::{ArchiveOutcome, Fetcher, Retrieval, RunReport};
