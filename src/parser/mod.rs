//! Text Parser
//!
//! Line splitting and tokenization for spell checking.

pub mod lexer;

pub use lexer::{Token, normalize, split_lines, tokenize_line};
