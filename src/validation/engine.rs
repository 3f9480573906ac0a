//! Validation Engine
//!
//! Core spell checking logic separated from parsing and LSP concerns.

use crate::dictionary::Dictionary;
use crate::parser::{Token, split_lines, tokenize_line};

/// An error for a misspelled token
///
/// Lines and columns are 1-based. Columns count UTF-16 code units and the
/// end column is exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub word: String,
    pub message: String,
}

/// Result of validating a document or line
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_unknown_word(&mut self, line: usize, span: (usize, usize), word: &str) {
        self.diagnostics.push(Diagnostic {
            line,
            start_column: span.0,
            end_column: span.1,
            word: word.to_string(),
            message: format!("'{}' is not a valid word", word),
        });
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Validate a single line of text
pub fn validate_line(line_num: usize, line: &str, dictionary: &Dictionary) -> ValidationResult {
    let mut result = ValidationResult::new();

    for token in tokenize_line(line) {
        if token.is_empty() || dictionary.contains(&token.normalized) {
            continue;
        }
        let span = locate(line, &token);
        result.add_unknown_word(line_num, span, &token.normalized);
    }

    result
}

/// Validate an entire document
pub fn validate_document(content: &str, dictionary: &Dictionary) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (line_num, line) in split_lines(content).enumerate() {
        let line_result = validate_line(line_num + 1, line, dictionary);
        result.diagnostics.extend(line_result.diagnostics);
    }

    result
}

/// Column span of a token within its line
///
/// Uses the first occurrence of the normalized text in the line, so a
/// repeated word always points at its first appearance. Falls back to the
/// token's own position when the normalized text never appears verbatim.
fn locate(line: &str, token: &Token<'_>) -> (usize, usize) {
    let normalized: &str = &token.normalized;
    let (offset, text) = match line.find(normalized) {
        Some(offset) => (offset, normalized),
        None => (token.offset, token.raw),
    };

    let start = utf16_len(&line[..offset]) + 1;
    (start, start + utf16_len(text))
}

fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
