use serde_json::Value;
use tower_lsp::jsonrpc::{Error as LspError, Result as LspResult};
use tower_lsp::lsp_types::*;

use crate::dictionary::Dictionary;
use crate::export::export_document;
use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::validation::engine::Diagnostic as ValidationDiagnostic;

/// Re-fetch the word list and revalidate open documents
pub const RELOAD_DICTIONARY_COMMAND: &str = "spellcheck.reloadDictionary";

/// Write a document's text to `document.txt` in the export directory
pub const EXPORT_DOCUMENT_COMMAND: &str = "spellcheck.exportDocument";

/// Source label attached to every published diagnostic
pub const DIAGNOSTIC_SOURCE: &str = "spellcheck";

/// Trait for handling completion requests
#[tower_lsp::async_trait]
pub trait HandleCompletion {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>>;
}

/// Trait for handling workspace commands
#[tower_lsp::async_trait]
pub trait HandleExecuteCommand {
    async fn handle_execute_command(&self, params: ExecuteCommandParams)
    -> LspResult<Option<Value>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    async fn store_document(&self, uri: Url, content: String, version: i32);
    async fn publish_diagnostics(&self, uri: Url);
    fn schedule_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleCompletion for Backend {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        let pos = params.text_document_position.position;

        let Some(dictionary) = self.state.dictionary.ready().await else {
            return Ok(None);
        };

        let completions = completion_items(&dictionary, pos);
        if completions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompletionResponse::Array(completions)))
        }
    }
}

/// Offer every dictionary word, replacing the character before the cursor
///
/// No prefix filtering happens here; the client filters the list.
pub fn completion_items(dictionary: &Dictionary, position: Position) -> Vec<CompletionItem> {
    let range = Range::new(
        Position::new(position.line, position.character.saturating_sub(1)),
        position,
    );

    dictionary
        .iter()
        .map(|word| CompletionItem {
            label: word.to_string(),
            kind: Some(CompletionItemKind::KEYWORD),
            insert_text: Some(word.to_string()),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit::new(
                range,
                word.to_string(),
            ))),
            ..Default::default()
        })
        .collect()
}

#[tower_lsp::async_trait]
impl HandleExecuteCommand for Backend {
    async fn handle_execute_command(
        &self,
        params: ExecuteCommandParams,
    ) -> LspResult<Option<Value>> {
        match params.command.as_str() {
            RELOAD_DICTIONARY_COMMAND => {
                let loaded = self.state.reload_dictionary().await;
                Ok(Some(Value::Bool(loaded)))
            }
            EXPORT_DOCUMENT_COMMAND => {
                let uri = uri_argument(&params.arguments)?;

                let content = {
                    let docs = self.state.documents.lock().await;
                    docs.get(&uri).map(|doc| doc.content.clone())
                }
                .ok_or_else(|| LspError::invalid_params(format!("Unknown document: {}", uri)))?;

                let path = export_document(&self.config.export_dir, &content)
                    .await
                    .map_err(|e| {
                        log::error!("Export of {} failed: {:#}", uri, e);
                        let mut err = LspError::internal_error();
                        err.message = format!("{:#}", e).into();
                        err
                    })?;

                self.state
                    .client
                    .show_message(MessageType::INFO, format!("Saved {}", path.display()))
                    .await;

                Ok(Some(Value::String(path.display().to_string())))
            }
            other => Err(LspError::invalid_params(format!(
                "Unknown command: {}",
                other
            ))),
        }
    }
}

fn uri_argument(arguments: &[Value]) -> LspResult<Url> {
    let value = arguments
        .first()
        .ok_or_else(|| LspError::invalid_params("Missing document URI argument"))?;

    serde_json::from_value(value.clone())
        .map_err(|e| LspError::invalid_params(format!("Invalid document URI: {}", e)))
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Replace the stored snapshot of a document
    async fn store_document(&self, uri: Url, content: String, version: i32) {
        let mut docs = self.state.documents.lock().await;
        docs.insert(uri, DocumentState { content, version });
    }

    /// Publish diagnostics for a document right away
    async fn publish_diagnostics(&self, uri: Url) {
        self.state.publish_diagnostics(uri).await;
    }

    /// Publish diagnostics once the document stops changing
    fn schedule_diagnostics(&self, uri: Url) {
        let state = self.state.clone();
        self.debouncer.schedule(uri.clone(), async move {
            state.publish_diagnostics(uri).await;
        });
    }
}

/// Convert a validation diagnostic into its LSP form
pub fn create_lsp_diagnostic(validation_diagnostic: ValidationDiagnostic) -> Diagnostic {
    let line = (validation_diagnostic.line - 1) as u32;

    Diagnostic::new(
        Range::new(
            Position::new(line, (validation_diagnostic.start_column - 1) as u32),
            Position::new(line, (validation_diagnostic.end_column - 1) as u32),
        ),
        Some(DiagnosticSeverity::ERROR),
        None,
        Some(DIAGNOSTIC_SOURCE.to_string()),
        validation_diagnostic.message,
        None,
        None,
    )
}
