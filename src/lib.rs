//! Spellcheck Language Server
//!
//! A Language Server Protocol implementation that flags words missing from
//! a dictionary.
//!
//! This library provides:
//! - Word list loading (remote or local) and expansion
//! - Line tokenization and dictionary validation
//! - LSP protocol implementation with debounced validation
//! - Configuration management

pub mod check;
pub mod config;
pub mod dictionary;
pub mod export;
pub mod logging;
pub mod lsp;
pub mod parser;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use dictionary::{Dictionary, DictionarySource};
pub use parser::{Token, tokenize_line};
pub use validation::{Diagnostic, validate_document};
