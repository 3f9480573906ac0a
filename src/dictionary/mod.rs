//! Dictionary Loader
//!
//! Word list fetching, expansion into a lookup set, and live reload.

pub mod error;
pub mod source;
pub mod watch;
pub mod words;

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

pub use error::DictionaryError;
pub use source::{DEFAULT_DICTIONARY_URL, DictionarySource};
pub use words::{BUILTIN_WORDS, Dictionary, capitalize};

/// Availability of the dictionary for the running server
#[derive(Debug, Clone, Default)]
pub enum DictionaryState {
    /// Initial fetch has not completed yet
    #[default]
    Loading,
    Ready(Arc<Dictionary>),
    /// Fetch failed and no earlier dictionary is available
    Unavailable(String),
}

impl DictionaryState {
    pub fn ready(&self) -> Option<Arc<Dictionary>> {
        match self {
            Self::Ready(dictionary) => Some(dictionary.clone()),
            Self::Loading | Self::Unavailable(_) => None,
        }
    }
}

/// Result of replacing the shared dictionary
#[derive(Debug)]
pub enum ReloadOutcome {
    /// New dictionary in use, with its entry count
    Loaded(usize),
    /// Load failed; the dictionary loaded earlier is still in use
    KeptPrevious(DictionaryError),
    /// Load failed and there is nothing to fall back to
    Unavailable(DictionaryError),
}

/// Dictionary shared between requests, replaced one load at a time
///
/// Reloads are serialized so that a slow load started earlier can never
/// overwrite the result of a later one.
#[derive(Debug, Default)]
pub struct SharedDictionary {
    state: RwLock<DictionaryState>,
    loading: Mutex<()>,
}

impl SharedDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dictionary in use, if one has loaded
    pub async fn ready(&self) -> Option<Arc<Dictionary>> {
        self.state.read().await.ready()
    }

    /// Load from `source` and swap the result in
    pub async fn reload<I, S>(&self, source: &DictionarySource, extra_words: I) -> ReloadOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let _loading = self.loading.lock().await;

        match source.load(extra_words).await {
            Ok(dictionary) => {
                let entries = dictionary.len();
                *self.state.write().await = DictionaryState::Ready(Arc::new(dictionary));
                ReloadOutcome::Loaded(entries)
            }
            Err(e) => {
                let mut state = self.state.write().await;
                if let DictionaryState::Ready(_) = *state {
                    ReloadOutcome::KeptPrevious(e)
                } else {
                    *state = DictionaryState::Unavailable(e.to_string());
                    ReloadOutcome::Unavailable(e)
                }
            }
        }
    }
}
