//! Dictionary Words
//!
//! The lookup set built from a newline-delimited word list.

use std::collections::BTreeSet;

/// Words accepted regardless of the word list contents
pub const BUILTIN_WORDS: [&str; 4] = ["a", "i", "A", "I"];

/// Set of correctly spelled tokens (case-sensitive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: BTreeSet<String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl Dictionary {
    /// Create a dictionary holding only the built-in words
    pub fn new() -> Self {
        let words = BUILTIN_WORDS.iter().map(|w| w.to_string()).collect();
        Self { words }
    }

    /// Build a dictionary from the body of a word list
    ///
    /// Lines are split on `\n` and trimmed; empty lines are dropped. Every
    /// remaining word is accepted as written and with its first character
    /// upper-cased.
    pub fn from_word_list(text: &str) -> Self {
        let mut dictionary = Self::new();
        dictionary.extend(text.split('\n'));
        dictionary
    }

    /// Add extra words using the same expansion as the word list
    pub fn with_extra_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(words);
        self
    }

    /// Add a single word and its capitalized variant
    pub fn insert_word(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        self.words.insert(capitalize(word));
        self.words.insert(word.to_string());
    }

    fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert_word(word.as_ref());
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over all accepted tokens in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Upper-case the first character of a word, leaving the rest untouched
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
