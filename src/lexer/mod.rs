pub mod config;
pub mod token;

use thiserror::Error;

pub use self::config::{ConfigError, LexerConfig};
use self::config::COMPOUND_STARTS;
use self::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string")]
    UnterminatedString,

    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
}

/// A scanning failure. For unterminated strings the position is the opening quote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{col}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub col: usize,
}

impl LexError {
    fn new(kind: LexErrorKind, line: usize, col: usize) -> Self { Self { kind, line, col } }
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    config: LexerConfig,
}

impl Lexer {
    pub fn new(source: &str) -> Self { Self::with_config(source, LexerConfig::default()) }

    pub fn with_config(source: &str, config: LexerConfig) -> Self {
        Self { chars: source.chars().collect(), pos: 0, line: 1, col: 1, config }
    }

    fn current(&self) -> Option<char> { self.chars.get(self.pos).copied() }
    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        self.pos += 1;
        if ch == '\n' { self.line += 1; self.col = 1; } else { self.col += 1; }
        Some(ch)
    }
    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(|c| c != '\n' && c.is_whitespace()) { self.advance(); }
    }
    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.current().filter(|c| pred(*c)) { text.push(c); self.advance(); }
        text
    }
    fn single(&mut self, kind: TokenKind) -> Token {
        let (line, col) = (self.line, self.col);
        let text: String = self.advance().into_iter().collect();
        Token::new(kind, text, line, col)
    }

    fn read_integer(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let digits = self.take_while(|c| c.is_ascii_digit());
        Token::new(TokenKind::Integer, digits, line, col)
    }

    fn read_word(&mut self) -> Token {
        let (line, col) = (self.line, self.col);
        let word = self.take_while(|c| c.is_alphanumeric() || c == '_');
        let kind = if self.config.is_keyword(&word) { TokenKind::Keyword } else { TokenKind::Identifier };
        Token::new(kind, word, line, col)
    }

    // `>=` must never split into `>` and `=`, so this runs before single-character operators.
    fn read_compound(&mut self, first: char) -> Result<Token, LexError> {
        let (line, col) = (self.line, self.col);
        self.advance();
        if self.current() == Some('=') {
            let pair = format!("{first}=");
            if self.config.is_operator(&pair) {
                self.advance();
                return Ok(Token::new(TokenKind::Operator, pair, line, col));
            }
        }
        let lone = first.to_string();
        if self.config.is_operator(&lone) { Ok(Token::new(TokenKind::Operator, lone, line, col)) }
        else { Err(LexError::new(LexErrorKind::UnexpectedCharacter(first), line, col)) }
    }

    fn read_string(&mut self) -> Result<Token, LexError> {
        let (line, col) = (self.line, self.col);
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(Token::new(TokenKind::Str, text, line, col)),
                Some(c) => text.push(c),
                None => return Err(LexError::new(LexErrorKind::UnterminatedString, line, col)),
            }
        }
    }

    /// Scans one lexeme. Once the input is exhausted every call returns EOF.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let (line, col) = (self.line, self.col);
        let Some(ch) = self.current() else { return Ok(Token::eof(line, col)); };

        match ch {
            '\n' => Ok(self.single(TokenKind::Newline)),
            c if c.is_ascii_digit() => Ok(self.read_integer()),
            c if c.is_alphabetic() => Ok(self.read_word()),
            c if COMPOUND_STARTS.contains(&c) => self.read_compound(c),
            c if self.config.is_operator(c.encode_utf8(&mut [0; 4])) => Ok(self.single(TokenKind::Operator)),
            c if self.config.is_parenthesis(c) => Ok(self.single(TokenKind::Parenthesis)),
            c if self.config.is_punctuation(c) => Ok(self.single(TokenKind::Punctuation)),
            '"' => self.read_string(),
            other => Err(LexError::new(LexErrorKind::UnexpectedCharacter(other), line, col)),
        }
    }

    /// Scans the whole source. The result always ends with exactly one EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done { return Ok(tokens); }
        }
    }
}
