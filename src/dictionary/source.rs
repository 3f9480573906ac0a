//! Word list sources
//!
//! Fetches the raw newline-delimited word list over HTTP or from disk.

use std::fmt;
use std::path::PathBuf;

use super::error::DictionaryError;
use super::words::Dictionary;

/// Word list used when nothing else is configured
pub const DEFAULT_DICTIONARY_URL: &str =
    "https://raw.githubusercontent.com/dolph/dictionary/refs/heads/master/popular.txt";

/// Where the word list comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    Remote(String),
    File(PathBuf),
}

impl Default for DictionarySource {
    fn default() -> Self {
        Self::Remote(DEFAULT_DICTIONARY_URL.to_string())
    }
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl DictionarySource {
    /// Fetch the raw word list text
    pub async fn fetch_word_list(&self) -> Result<String, DictionaryError> {
        match self {
            Self::Remote(url) => fetch_remote(url).await,
            Self::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| DictionaryError::Io {
                        path: path.clone(),
                        source,
                    })
            }
        }
    }

    /// Fetch the word list and build a dictionary from it
    pub async fn load<I, S>(&self, extra_words: I) -> Result<Dictionary, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        log::info!("Loading word list from {}", self);
        let text = self.fetch_word_list().await?;
        let dictionary = Dictionary::from_word_list(&text).with_extra_words(extra_words);
        log::info!("Loaded {} dictionary entries from {}", dictionary.len(), self);
        Ok(dictionary)
    }
}

async fn fetch_remote(url: &str) -> Result<String, DictionaryError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        log::warn!("Word list source returned status {}: {}", status, url);
        return Err(DictionaryError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(response.text().await?)
}
