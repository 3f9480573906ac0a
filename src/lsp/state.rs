//! Shared server state
//!
//! Everything a detached task (debounced validation, dictionary reload)
//! needs to publish results back to the client.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::Client;
use tower_lsp::lsp_types::{MessageType, Url};

use crate::Config;
use crate::dictionary::{DictionarySource, ReloadOutcome, SharedDictionary};
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::create_lsp_diagnostic;
use crate::validation::validate_document;

/// Cheaply cloneable handle on the state shared by all requests
#[derive(Clone)]
pub struct ServerState {
    pub client: Client,
    pub dictionary: Arc<SharedDictionary>,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    source: DictionarySource,
    extra_words: Arc<Vec<String>>,
}

impl ServerState {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            dictionary: Arc::new(SharedDictionary::new()),
            documents: Arc::new(Mutex::new(HashMap::new())),
            source: config.dictionary_source.clone(),
            extra_words: Arc::new(config.extra_words.clone()),
        }
    }

    pub fn source(&self) -> &DictionarySource {
        &self.source
    }

    /// Fetch the word list again and revalidate every open document
    ///
    /// Returns whether a fresh dictionary is now in use. A failed reload
    /// keeps an already loaded dictionary.
    pub async fn reload_dictionary(&self) -> bool {
        let message = match self
            .dictionary
            .reload(&self.source, self.extra_words.iter())
            .await
        {
            ReloadOutcome::Loaded(entries) => {
                self.client
                    .log_message(
                        MessageType::INFO,
                        format!("Dictionary loaded: {} entries from {}", entries, self.source),
                    )
                    .await;

                self.publish_all().await;
                return true;
            }
            ReloadOutcome::KeptPrevious(e) => {
                log::warn!("Failed to reload dictionary from {}: {}", self.source, e);
                format!(
                    "Failed to reload dictionary ({}), keeping the previous word list",
                    e
                )
            }
            ReloadOutcome::Unavailable(e) => {
                log::warn!("Failed to load dictionary from {}: {}", self.source, e);
                format!("Dictionary unavailable ({}), editing without spellcheck", e)
            }
        };

        self.client.show_message(MessageType::WARNING, message).await;
        false
    }

    /// Validate a document and replace its published diagnostics
    ///
    /// Does nothing until a dictionary is ready; the load revalidates every
    /// open document once it completes.
    pub async fn publish_diagnostics(&self, uri: Url) {
        let Some(dictionary) = self.dictionary.ready().await else {
            log::debug!("Dictionary not ready, skipping diagnostics for {}", uri);
            return;
        };

        let (content, version) = {
            let docs = self.documents.lock().await;
            match docs.get(&uri) {
                Some(doc) => (doc.content.clone(), doc.version),
                None => return,
            }
        };

        let result = validate_document(&content, &dictionary);
        let diagnostics: Vec<_> = result
            .diagnostics
            .into_iter()
            .map(create_lsp_diagnostic)
            .collect();

        log::debug!("Publishing {} diagnostics for {}", diagnostics.len(), uri);
        self.client
            .publish_diagnostics(uri, diagnostics, Some(version))
            .await;
    }

    /// Revalidate every open document
    pub async fn publish_all(&self) {
        let uris: Vec<Url> = self.documents.lock().await.keys().cloned().collect();
        for uri in uris {
            self.publish_diagnostics(uri).await;
        }
    }

    /// Remove any diagnostics shown for a document
    pub async fn clear_diagnostics(&self, uri: Url) {
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}
