//! Vocabulary the lexer classifies against.
//!
//! The sets are plain data: built once, handed to [`Lexer::with_config`] and
//! never mutated while scanning. A vocabulary can also be read from JSON,
//! e.g. `{"keywords": ["def", "if", "else", "return", "imprimir"]}`; fields
//! left out keep their default value.
//!
//! [`Lexer::with_config`]: super::Lexer::with_config

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const KEYWORDS: &[&str] = &["def", "if", "else", "return"];
pub const SPANISH_KEYWORDS: &[&str] = &["función", "si", "entonces", "mientras", "para", "resultado"];
pub const OPERATORS: &[&str] = &["+", "-", "*", "/", "=", "==", "!=", "<", ">", "<=", ">="];
pub const PARENTHESES: &[char] = &['(', ')'];
pub const PUNCTUATION: &[char] = &['[', ']', '{', '}', ',', ';', ':'];

/// First characters that may combine with a following `=`.
pub const COMPOUND_STARTS: &[char] = &['>', '<', '=', '!'];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read vocabulary: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed vocabulary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{0}' belongs to more than one token class")]
    Overlap(char),

    #[error("'\"' always opens a string and cannot be reserved")]
    QuoteReserved,

    #[error("invalid operator {0:?}")]
    BadOperator(String),

    #[error("invalid keyword {0:?}")]
    BadKeyword(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexerConfig {
    keywords: BTreeSet<String>,
    operators: BTreeSet<String>,
    parentheses: BTreeSet<char>,
    punctuation: BTreeSet<char>,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            keywords: KEYWORDS.iter().map(|k| k.to_string()).collect(),
            operators: OPERATORS.iter().map(|o| o.to_string()).collect(),
            parentheses: PARENTHESES.iter().copied().collect(),
            punctuation: PUNCTUATION.iter().copied().collect(),
        }
    }
}

impl LexerConfig {
    /// English keywords plus their Spanish spellings.
    pub fn localized() -> Self {
        let mut config = Self::default();
        config.keywords.extend(SPANISH_KEYWORDS.iter().map(|k| k.to_string()));
        config
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LexerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that every character maps to at most one scanning rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for keyword in &self.keywords {
            let mut chars = keyword.chars();
            let leads_alpha = chars.next().is_some_and(|c| c.is_alphabetic());
            if !leads_alpha || !chars.all(|c| c.is_alphanumeric() || c == '_') {
                return Err(ConfigError::BadKeyword(keyword.clone()));
            }
        }

        let mut singles = BTreeSet::new();
        for op in &self.operators {
            let chars: Vec<char> = op.chars().collect();
            match chars.as_slice() {
                ['"', ..] => return Err(ConfigError::QuoteReserved),
                [c] if c.is_alphanumeric() || c.is_whitespace() => return Err(ConfigError::BadOperator(op.clone())),
                [c] => { singles.insert(*c); }
                [first, '='] if COMPOUND_STARTS.contains(first) => {}
                _ => return Err(ConfigError::BadOperator(op.clone())),
            }
        }

        for c in self.parentheses.iter().chain(&self.punctuation) {
            if *c == '"' { return Err(ConfigError::QuoteReserved); }
            // Earlier scanning rules would claim these before the class is consulted.
            if COMPOUND_STARTS.contains(c) || c.is_alphanumeric() || c.is_whitespace() {
                return Err(ConfigError::Overlap(*c));
            }
        }
        for c in &self.parentheses {
            if singles.contains(c) || self.punctuation.contains(c) { return Err(ConfigError::Overlap(*c)); }
        }
        for c in &self.punctuation {
            if singles.contains(c) { return Err(ConfigError::Overlap(*c)); }
        }
        Ok(())
    }

    pub fn is_keyword(&self, word: &str) -> bool { self.keywords.contains(word) }
    pub fn is_operator(&self, lexeme: &str) -> bool { self.operators.contains(lexeme) }
    pub fn is_parenthesis(&self, c: char) -> bool { self.parentheses.contains(&c) }
    pub fn is_punctuation(&self, c: char) -> bool { self.punctuation.contains(&c) }

    pub fn keywords(&self) -> impl Iterator<Item = &str> { self.keywords.iter().map(String::as_str) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english_only() {
        let config = LexerConfig::default();
        assert!(config.is_keyword("def"));
        assert!(!config.is_keyword("si"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_localized_adds_spanish() {
        let config = LexerConfig::localized();
        assert!(config.is_keyword("return"));
        assert!(config.is_keyword("función"));
        assert!(config.is_keyword("mientras"));
        let mut keywords: Vec<&str> = config.keywords().collect();
        keywords.sort_unstable();
        assert_eq!(keywords, [
            "def", "else", "entonces", "función", "if", "mientras", "para", "resultado", "return", "si",
        ]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LexerConfig::from_json_str(r#"{"keywords": ["def", "imprimir"]}"#).unwrap();
        assert!(config.is_keyword("imprimir"));
        assert!(!config.is_keyword("if"));
        assert!(config.is_operator(">="));
        assert!(config.is_punctuation(':'));
    }

    #[test]
    fn test_rejects_quote_as_punctuation() {
        let err = LexerConfig::from_json_str(r#"{"punctuation": [",", "\""]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::QuoteReserved));
    }

    #[test]
    fn test_rejects_overlapping_classes() {
        let err = LexerConfig::from_json_str(r#"{"punctuation": ["(", ","]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Overlap('(')));
        let err = LexerConfig::from_json_str(r#"{"operators": ["+"], "punctuation": [":", ",", "="]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Overlap('=')));
        let err = LexerConfig::from_json_str(r#"{"parentheses": ["(", ")", "!"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Overlap('!')));
        let err = LexerConfig::from_json_str(r#"{"punctuation": [",", "x"]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Overlap('x')));
    }

    #[test]
    fn test_rejects_bad_operators_and_keywords() {
        assert!(matches!(
            LexerConfig::from_json_str(r#"{"operators": ["+", "**"]}"#).unwrap_err(),
            ConfigError::BadOperator(op) if op == "**"
        ));
        assert!(matches!(
            LexerConfig::from_json_str(r#"{"keywords": ["9lives"]}"#).unwrap_err(),
            ConfigError::BadKeyword(_)
        ));
        assert!(matches!(
            LexerConfig::from_json_str(r#"{"colours": []}"#).unwrap_err(),
            ConfigError::Json(_)
        ));
    }
}
