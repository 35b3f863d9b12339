use std::path::PathBuf;

use thiserror::Error;

use crate::lexer::{ConfigError, LexError};
use crate::parser::ParseError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("lexical error at {0}")]
    Lex(#[from] LexError),

    #[error("syntax error at {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Line and column of the offending character or token, when there is one.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Lex(e) => Some((e.line, e.col)),
            Error::Parse(e) => Some((e.line, e.col)),
            Error::Config(_) | Error::Io { .. } => None,
        }
    }
}
