//! Text Lexer
//!
//! Splits lines into whitespace-delimited tokens and normalizes them.
//! Focus: keep the raw slice and its offset so callers can map back to
//! positions without re-scanning.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Characters removed from anywhere inside a token before lookup
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.,;!"'0-9(){}\[\]]"#).expect("punctuation pattern is valid")
});

/// A whitespace-delimited token of a single line
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    /// Token exactly as it appears in the line
    pub raw: &'a str,
    /// Byte offset of `raw` within the line
    pub offset: usize,
    /// Token with punctuation and digits stripped
    pub normalized: Cow<'a, str>,
}

impl Token<'_> {
    /// True when nothing is left after normalization
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }
}

/// Split a document into lines on `\n` only
///
/// A trailing `\r` of a CRLF line is left in place.
pub fn split_lines(text: &str) -> std::str::Split<'_, char> {
    text.split('\n')
}

/// Strip the punctuation class from a token
pub fn normalize(raw: &str) -> Cow<'_, str> {
    PUNCTUATION.replace_all(raw, "")
}

/// Tokenize one line into whitespace-delimited tokens
///
/// Any run of whitespace separates tokens. The one exception is a `\r` run
/// that ends the line right after a token character: it stays part of that
/// last token, as a CRLF line leaves it.
pub fn tokenize_line(line: &str) -> Vec<Token<'_>> {
    let body = line.trim_end_matches('\r');
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, ch) in body.char_indices() {
        if ch.is_whitespace() {
            if let Some(begin) = start.take() {
                tokens.push(make_token(line, begin, idx));
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }

    // An open token at the end of the body absorbs the trailing `\r` run
    if let Some(begin) = start {
        tokens.push(make_token(line, begin, line.len()));
    }

    tokens
}

fn make_token(line: &str, begin: usize, end: usize) -> Token<'_> {
    let raw = &line[begin..end];
    Token {
        raw,
        offset: begin,
        normalized: normalize(raw),
    }
}
