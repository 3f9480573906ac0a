use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a word list
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("Failed to fetch word list: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Word list source {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to read word list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
