use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // --- Words ---
    Identifier, Keyword,

    // --- Literals ---
    Integer,
    #[serde(rename = "STRING")]
    Str,

    // --- Symbols ---
    Operator, Parenthesis, Punctuation,

    // --- Structure ---
    Newline, Eof,

    // Part of the vocabulary but never produced by the scanner.
    Boolean, Comment,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "IDENTIFIER", TokenKind::Keyword => "KEYWORD",
            TokenKind::Integer => "INTEGER", TokenKind::Str => "STRING",
            TokenKind::Operator => "OPERATOR", TokenKind::Parenthesis => "PARENTHESIS",
            TokenKind::Punctuation => "PUNCTUATION",
            TokenKind::Newline => "NEWLINE", TokenKind::Eof => "EOF",
            TokenKind::Boolean => "BOOLEAN", TokenKind::Comment => "COMMENT",
        };
        f.write_str(name)
    }
}

/// Grammar role of a reserved word.
///
/// Several spellings can share a role (`def` and `función` both open a
/// function definition). Whether a spelling is reserved at all is up to the
/// lexer's [`LexerConfig`](super::LexerConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword { Def, If, Else, Return, Then, While, For }

impl Keyword {
    pub fn from_spelling(word: &str) -> Option<Keyword> {
        match word {
            "def" | "función" => Some(Keyword::Def),
            "if" | "si" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "return" | "resultado" => Some(Keyword::Return),
            "entonces" => Some(Keyword::Then),
            "mientras" => Some(Keyword::While),
            "para" => Some(Keyword::For),
            _ => None,
        }
    }

    /// Spelling used in diagnostics: English when the role has one, Spanish otherwise.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Def => "def", Keyword::If => "if", Keyword::Else => "else",
            Keyword::Return => "return", Keyword::Then => "entonces",
            Keyword::While => "mientras", Keyword::For => "para",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact lexeme. `None` only for EOF.
    pub text: Option<String>,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, col: usize) -> Self {
        Self { kind, text: Some(text.into()), line, col }
    }

    pub fn eof(line: usize, col: usize) -> Self {
        Self { kind: TokenKind::Eof, text: None, line, col }
    }

    pub fn text(&self) -> &str { self.text.as_deref().unwrap_or("") }

    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text.as_deref() == Some(text)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        if self.kind != TokenKind::Keyword { return None; }
        self.text.as_deref().and_then(Keyword::from_spelling)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{}({:?}) @ {}:{}", self.kind, text, self.line, self.col),
            None => write!(f, "{} @ {}:{}", self.kind, self.line, self.col),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_spellings_share_roles() {
        assert_eq!(Keyword::from_spelling("función"), Some(Keyword::Def));
        assert_eq!(Keyword::from_spelling("si"), Some(Keyword::If));
        assert_eq!(Keyword::from_spelling("resultado"), Some(Keyword::Return));
        assert_eq!(Keyword::from_spelling("funcion"), None);
    }

    #[test]
    fn test_diagnostic_spelling_is_reserved_somewhere() {
        for role in [Keyword::Def, Keyword::If, Keyword::Else, Keyword::Return, Keyword::Then, Keyword::While, Keyword::For] {
            assert_eq!(Keyword::from_spelling(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_keyword_role_requires_keyword_kind() {
        let ident = Token::new(TokenKind::Identifier, "if", 1, 1);
        let kw = Token::new(TokenKind::Keyword, "if", 1, 1);
        assert_eq!(ident.keyword(), None);
        assert_eq!(kw.keyword(), Some(Keyword::If));
    }

    #[test]
    fn test_display() {
        assert_eq!(Token::new(TokenKind::Operator, ">=", 2, 3).to_string(), "OPERATOR(\">=\") @ 2:3");
        assert_eq!(Token::eof(4, 1).to_string(), "EOF @ 4:1");
    }
}
