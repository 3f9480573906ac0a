use anyhow::Result;
use spellcheck_language_server::Config;
use spellcheck_language_server::check::run_check;
use spellcheck_language_server::logging;
use spellcheck_language_server::lsp::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;
    logging::init(&config.log_level);

    if config.check_files.is_empty() {
        return serve(config).await;
    }

    if run_check(&config).await? > 0 {
        std::process::exit(1);
    }
    Ok(())
}
