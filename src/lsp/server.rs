use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::Config;
use crate::lsp::backend::Backend;

/// Start the LSP server on stdio
pub async fn serve(config: Config) -> Result<()> {
    log::info!(
        "Starting spellcheck language server (dictionary: {})",
        config.dictionary_source
    );
    if let Some(path) = &config.project_config_path {
        log::info!("Using project configuration {}", path.display());
    }

    let (service, socket) = LspService::build(move |client| Backend::new(client, config)).finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    log::info!("Spellcheck language server stopped");
    Ok(())
}
