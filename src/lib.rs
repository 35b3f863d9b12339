//! # sintaxis — lexer and syntax checker for a small Python-like language
//!
//! The language has:
//! - Function definitions, `if`/`else`, `return` and call expressions
//! - Newline-terminated statements, blocks nested by column
//! - Flat binary operator chains (`suma(3, 5) > 5`)
//! - Optional Spanish keyword spellings (`función`, `si`, `resultado`, ...)
//!
//! Nothing is evaluated and no tree is built: the contract is a token stream
//! and a verdict.
//!
//! ## Quick Start
//!
//! ```rust
//! sintaxis::check("def f(a, b):\n    return a\n").unwrap();
//! assert!(sintaxis::check("def f(a, b)\n    return a\n").is_err());
//! ```
//!
//! ## Tokenize and Parse Separately
//!
//! ```rust
//! use sintaxis::{Lexer, LexerConfig, Parser};
//! let tokens = Lexer::with_config("si x > 1:\n    y()\n", LexerConfig::localized()).tokenize().unwrap();
//! let mut parser = Parser::new(tokens);
//! parser.parse().unwrap();
//! assert_eq!(parser.statements(), 2);
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

use std::fs;
use std::path::Path;

pub use error::{Error, Result};
pub use lexer::token::{Keyword, Token, TokenKind};
pub use lexer::{ConfigError, LexError, LexErrorKind, Lexer, LexerConfig};
pub use parser::{Expected, ParseError, Parser};

/// Scan source with the default English vocabulary.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    tokenize_with(source, LexerConfig::default())
}

pub fn tokenize_with(source: &str, config: LexerConfig) -> Result<Vec<Token>> {
    Ok(Lexer::with_config(source, config).tokenize()?)
}

/// Check that source is syntactically valid.
///
/// Returns the first lexical or syntax error, positioned at the offending
/// character or token.
pub fn check(source: &str) -> Result<()> {
    check_with(source, LexerConfig::default())
}

pub fn check_with(source: &str, config: LexerConfig) -> Result<()> {
    let tokens = tokenize_with(source, config)?;
    Parser::new(tokens).parse()?;
    Ok(())
}

/// Read and check a file.
pub fn check_file(path: impl AsRef<Path>, config: LexerConfig) -> Result<()> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    check_with(&source, config)
}
