//! Batch check mode
//!
//! Spell checks files from the command line and prints one line per
//! diagnostic in `path:line:column: error: message` form.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::Config;
use crate::dictionary::Dictionary;
use crate::validation::validate_document;

/// Check every configured file, returning the number of diagnostics found
pub async fn run_check(config: &Config) -> Result<usize> {
    let dictionary = config
        .dictionary_source
        .load(&config.extra_words)
        .await
        .with_context(|| format!("Dictionary unavailable from {}", config.dictionary_source))?;

    let mut out = std::io::stdout();
    let mut found = 0;

    for path in &config.check_files {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        found += check_text(path, &content, &dictionary, &mut out)?;
    }

    log::info!(
        "Checked {} file(s), {} diagnostic(s)",
        config.check_files.len(),
        found
    );
    Ok(found)
}

/// Validate one text and write its diagnostics to `out`
pub fn check_text<W: Write>(
    path: &Path,
    content: &str,
    dictionary: &Dictionary,
    out: &mut W,
) -> Result<usize> {
    let result = validate_document(content, dictionary);

    for diagnostic in &result.diagnostics {
        writeln!(
            out,
            "{}:{}:{}: error: {}",
            path.display(),
            diagnostic.line,
            diagnostic.start_column,
            diagnostic.message
        )?;
    }

    Ok(result.diagnostics.len())
}
