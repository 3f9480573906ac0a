use notify::RecommendedWatcher;
use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::Config;
use crate::dictionary::DictionarySource;
use crate::dictionary::watch::{WatchEvent, watch_word_list};
use crate::lsp::debounce::Debouncer;
use crate::lsp::handlers::{
    EXPORT_DOCUMENT_COMMAND, HandleCompletion, HandleDiagnostics, HandleExecuteCommand,
    RELOAD_DICTIONARY_COMMAND,
};
use crate::lsp::state::ServerState;

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub state: ServerState,
    pub config: Config,
    pub debouncer: Debouncer<Url>,
    watcher: Mutex<Option<RecommendedWatcher>>,
}

impl Backend {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            state: ServerState::new(client, &config),
            debouncer: Debouncer::new(config.debounce),
            config,
            watcher: Mutex::new(None),
        }
    }

    pub fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(
                TextDocumentSyncKind::FULL,
            )),
            completion_provider: Some(CompletionOptions {
                resolve_provider: Some(false),
                ..Default::default()
            }),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: vec![
                    RELOAD_DICTIONARY_COMMAND.to_string(),
                    EXPORT_DOCUMENT_COMMAND.to_string(),
                ],
                work_done_progress_options: Default::default(),
            }),
            ..Default::default()
        }
    }

    fn spawn_dictionary_load(&self) {
        let state = self.state.clone();
        tokio::spawn(async move {
            state.reload_dictionary().await;
        });
    }

    /// Reload the dictionary whenever a local word list changes on disk
    async fn start_watching(&self) {
        let DictionarySource::File(path) = self.state.source() else {
            return;
        };

        let (watcher, mut rx) = match watch_word_list(path) {
            Ok(watching) => watching,
            Err(e) => {
                log::warn!("Not watching word list {}: {:#}", path.display(), e);
                return;
            }
        };
        *self.watcher.lock().await = Some(watcher);

        let state = self.state.clone();
        let reloads = Debouncer::new(self.config.debounce);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                match event {
                    WatchEvent::WordListChanged(path) => {
                        log::info!("Word list changed: {}", path.display());
                        let state = state.clone();
                        reloads.schedule((), async move {
                            state.reload_dictionary().await;
                        });
                    }
                    WatchEvent::WatcherError(e) => {
                        state
                            .client
                            .log_message(
                                MessageType::ERROR,
                                format!("Word list watcher error: {}", e),
                            )
                            .await;
                    }
                }
            }
        });
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.state
            .client
            .log_message(
                MessageType::INFO,
                format!(
                    "spellcheck-language-server initialized, loading dictionary from {}",
                    self.state.source()
                ),
            )
            .await;

        self.spawn_dictionary_load();
        self.start_watching().await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> tower_lsp::jsonrpc::Result<Option<CompletionResponse>> {
        self.handle_completion(params).await
    }

    async fn execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> tower_lsp::jsonrpc::Result<Option<serde_json::Value>> {
        self.handle_execute_command(params).await
    }

    // Opening validates right away, without waiting for the debounce delay
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.store_document(doc.uri.clone(), doc.text, doc.version)
            .await;
        self.publish_diagnostics(doc.uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        if let Some(change) = params.content_changes.into_iter().last() {
            self.store_document(uri.clone(), change.text, version).await;
            self.schedule_diagnostics(uri);
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.debouncer.cancel(&uri);
        self.state.documents.lock().await.remove(&uri);
        self.state.clear_diagnostics(uri).await;
    }
}
