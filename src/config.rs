//! Configuration management for the spell checking language server.
//!
//! Handles:
//! - Command-line argument parsing
//! - Project configuration (`.spellcheck.toml`)
//! - Dictionary source selection

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dictionary::DictionarySource;

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = ".spellcheck.toml";

/// Delay between the last change and the validation pass
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Command-line arguments for the spell checking language server
#[derive(Debug, Default, Parser)]
#[command(name = "spellcheck-language-server")]
#[command(about = "Dictionary based spell checking language server")]
#[command(version)]
pub struct Args {
    /// URL of a newline-delimited word list
    #[arg(long, help = "URL of a newline-delimited word list")]
    pub dictionary_url: Option<String>,

    /// Local word list, takes precedence over any URL
    #[arg(long, help = "Local newline-delimited word list file")]
    pub dictionary_file: Option<PathBuf>,

    /// Debounce delay in milliseconds
    #[arg(long, help = "Delay in milliseconds before re-checking a changed document")]
    pub debounce_ms: Option<u64>,

    /// Directory receiving exported documents
    #[arg(long, help = "Directory where exported documents are written")]
    pub export_dir: Option<PathBuf>,

    /// Check files and print diagnostics instead of serving LSP
    #[arg(long, num_args = 1.., value_name = "FILE")]
    pub check: Vec<PathBuf>,

    /// Log level for the language server
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Contents of `.spellcheck.toml`
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    pub dictionary_url: Option<String>,
    pub dictionary_file: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
    pub export_dir: Option<PathBuf>,
    pub extra_words: Vec<String>,
}

impl ProjectConfig {
    /// Parse a project configuration file, resolving relative paths
    /// against the file's directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.dictionary_file = config.dictionary_file.map(|p| base.join(p));
            config.export_dir = config.export_dir.map(|p| base.join(p));
        }

        Ok(config)
    }

    /// Find the nearest project configuration file from `start` upward
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the word list is fetched from
    pub dictionary_source: DictionarySource,
    /// Words accepted in addition to the word list
    pub extra_words: Vec<String>,
    pub debounce: Duration,
    /// Directory receiving `document.txt` exports
    pub export_dir: PathBuf,
    /// Files to check in batch mode
    pub check_files: Vec<PathBuf>,
    /// Log level
    pub log_level: String,
    /// Project configuration file that was applied, if any
    pub project_config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_source: DictionarySource::default(),
            extra_words: Vec::new(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            export_dir: default_export_dir(),
            check_files: Vec::new(),
            log_level: "info".to_string(),
            project_config_path: None,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments and the project
    /// configuration found from the working directory
    pub fn from_args_and_env() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;
        Self::from_args_in(Args::parse(), &cwd)
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        Self::from_args_with_project(args, None)
    }

    /// Create configuration from explicit arguments, discovering the project
    /// configuration from `dir` upward
    pub fn from_args_in(args: Args, dir: &Path) -> Result<Self> {
        let project = match ProjectConfig::discover(dir) {
            Some(path) => {
                let project = ProjectConfig::load(&path)?;
                Some((path, project))
            }
            None => None,
        };
        Self::from_args_with_project(args, project)
    }

    fn from_args_with_project(
        args: Args,
        project: Option<(PathBuf, ProjectConfig)>,
    ) -> Result<Self> {
        let (project_config_path, project) = match project {
            Some((path, project)) => (Some(path), project),
            None => (None, ProjectConfig::default()),
        };

        // A local file wins over a URL; command line wins over project file
        let dictionary_source = if let Some(path) = args.dictionary_file {
            DictionarySource::File(path)
        } else if let Some(url) = args.dictionary_url {
            DictionarySource::Remote(url)
        } else if let Some(path) = project.dictionary_file {
            DictionarySource::File(path)
        } else if let Some(url) = project.dictionary_url {
            DictionarySource::Remote(url)
        } else {
            DictionarySource::default()
        };

        let debounce_ms = args
            .debounce_ms
            .or(project.debounce_ms)
            .unwrap_or(DEFAULT_DEBOUNCE_MS);

        let export_dir = args
            .export_dir
            .or(project.export_dir)
            .unwrap_or_else(default_export_dir);

        Ok(Config {
            dictionary_source,
            extra_words: project.extra_words,
            debounce: Duration::from_millis(debounce_ms),
            export_dir,
            check_files: args.check,
            log_level: args.log_level,
            project_config_path,
        })
    }

    pub fn has_project_config(&self) -> bool {
        self.project_config_path.is_some()
    }
}

/// Exports land where a browser would put a download
fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}
