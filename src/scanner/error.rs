use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Scan canceled by user")]
    Cancelled,
}
