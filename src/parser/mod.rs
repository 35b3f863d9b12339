use std::fmt;

use thiserror::Error;

use crate::lexer::token::{Keyword, Token, TokenKind};

/// Deepest nesting of blocks and parenthesised expressions accepted.
pub const MAX_DEPTH: usize = 256;

/// What the rule in force would have accepted at the failing position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// A token of `kind`, with exactly `text` when the grammar pins it down.
    Token { kind: TokenKind, text: Option<&'static str> },
    Statement,
    Expression,
    /// A statement starting at column `col`, the indentation of the enclosing block.
    Alignment { col: usize },
    /// Anything that does not open another nesting level past [`MAX_DEPTH`].
    Shallower,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token { kind, text: Some(text) } => write!(f, "{} {:?}", kind, text),
            Expected::Token { kind, text: None } => write!(f, "{}", kind),
            Expected::Statement => f.write_str("statement"),
            Expected::Expression => f.write_str("expression"),
            Expected::Alignment { col } => write!(f, "statement at column {}", col),
            Expected::Shallower => write!(f, "at most {} nested levels", MAX_DEPTH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}:{col}: expected {expected}, found {}", describe(.found, .text))]
pub struct ParseError {
    pub expected: Expected,
    pub found: TokenKind,
    pub text: Option<String>,
    pub line: usize,
    pub col: usize,
}

fn describe(kind: &TokenKind, text: &Option<String>) -> String {
    match (kind, text) {
        (TokenKind::Newline | TokenKind::Eof, _) | (_, None) => kind.to_string(),
        (_, Some(text)) => format!("{} {:?}", kind, text),
    }
}

/// One-token-lookahead recognizer.
///
/// The parser validates structure only; nothing is built. Blocks are
/// delimited by the column of their first statement, `else` pairs with the
/// `if` at the same column, and expressions are flat operator chains.
///
/// Columns are character positions: a tab is one column, like a space, so
/// a block must not mix tab and space indentation.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
    trace: bool,
    statements: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = tokens.last().map_or(Token::eof(1, 1), |t| Token::eof(t.line, t.col));
        Self { tokens, pos: 0, eof, trace: false, statements: 0, depth: 0 }
    }

    /// Emit `tracing` events for every rule entered and token consumed.
    pub fn with_trace(mut self, trace: bool) -> Self { self.trace = trace; self }

    /// Statements accepted so far, at every nesting level.
    pub fn statements(&self) -> usize { self.statements }

    fn current(&self) -> &Token { self.tokens.get(self.pos).unwrap_or(&self.eof) }
    fn at(&self, kind: TokenKind) -> bool { self.current().kind == kind }
    fn at_text(&self, kind: TokenKind, text: &str) -> bool { self.current().is(kind, text) }
    fn at_end(&self) -> bool { self.at(TokenKind::Eof) }
    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            if self.trace { tracing::trace!(token = %self.tokens[self.pos], "consumed"); }
            self.pos += 1;
        }
    }
    fn skip_newlines(&mut self) { while self.at(TokenKind::Newline) { self.advance(); } }
    fn rule(&self, name: &'static str) {
        if self.trace {
            let t = self.current();
            tracing::debug!(rule = name, line = t.line, col = t.col, "entering");
        }
    }
    fn error(&self, expected: Expected) -> ParseError {
        let t = self.current();
        ParseError { expected, found: t.kind, text: t.text.clone(), line: t.line, col: t.col }
    }

    fn eat(&mut self, matched: bool, expected: Expected) -> Result<(), ParseError> {
        if matched { self.advance(); Ok(()) } else { Err(self.error(expected)) }
    }
    fn expect(&mut self, kind: TokenKind, text: Option<&'static str>) -> Result<(), ParseError> {
        let t = self.current();
        let matched = t.kind == kind && text.map_or(true, |text| t.text.as_deref() == Some(text));
        self.eat(matched, Expected::Token { kind, text })
    }
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        let matched = self.current().keyword() == Some(keyword);
        self.eat(matched, Expected::Token { kind: TokenKind::Keyword, text: Some(keyword.as_str()) })
    }
    // Errors end the parse, so only the successful path needs to leave.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth == MAX_DEPTH { return Err(self.error(Expected::Shallower)); }
        self.depth += 1;
        Ok(())
    }
    fn leave(&mut self) { self.depth -= 1; }
    fn end_of_statement(&mut self) -> Result<(), ParseError> {
        if self.at_end() { return Ok(()); }
        self.expect(TokenKind::Newline, None)
    }

    /// Validates the whole token sequence through EOF.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.rule("program");
        self.skip_newlines();
        if self.at_end() { return Ok(()); }
        let indent = self.current().col;
        self.parse_body(0, indent)
    }

    // Statements aligned at `indent` until the input ends or a token at or left of `owner`.
    fn parse_body(&mut self, owner: usize, indent: usize) -> Result<(), ParseError> {
        loop {
            self.parse_statement()?;
            self.skip_newlines();
            if self.at_end() { return Ok(()); }
            let col = self.current().col;
            if col == indent { continue; }
            if col <= owner { return Ok(()); }
            return Err(self.error(Expected::Alignment { col: indent }));
        }
    }

    fn parse_block(&mut self, owner: usize) -> Result<(), ParseError> {
        self.rule("block");
        self.enter()?;
        if !self.at(TokenKind::Newline) && !self.at_end() {
            self.parse_statement()?;
        } else {
            self.skip_newlines();
            let indent = self.current().col;
            if !self.at_end() && indent > owner { self.parse_body(owner, indent)?; }
        }
        self.leave();
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<(), ParseError> {
        self.rule("statement");
        let (role, kind) = (self.current().keyword(), self.current().kind);
        match role {
            Some(Keyword::Def) => self.parse_function()?,
            Some(Keyword::If) => self.parse_if()?,
            Some(Keyword::Return) => self.parse_return()?,
            Some(_) => return Err(self.error(Expected::Statement)),
            None if kind == TokenKind::Keyword => return Err(self.error(Expected::Statement)),
            None => self.parse_expr_stmt()?,
        }
        self.statements += 1;
        Ok(())
    }

    fn parse_function(&mut self) -> Result<(), ParseError> {
        self.rule("function_def");
        let owner = self.current().col;
        self.expect_keyword(Keyword::Def)?;
        self.expect(TokenKind::Identifier, None)?;
        self.expect(TokenKind::Parenthesis, Some("("))?;
        self.parse_params()?;
        self.expect(TokenKind::Parenthesis, Some(")"))?;
        self.expect(TokenKind::Punctuation, Some(":"))?;
        self.parse_block(owner)
    }

    fn parse_params(&mut self) -> Result<(), ParseError> {
        if !self.at(TokenKind::Identifier) { return Ok(()); }
        loop {
            self.expect(TokenKind::Identifier, None)?;
            if self.at_text(TokenKind::Punctuation, ",") { self.advance(); } else { return Ok(()); }
        }
    }

    fn parse_if(&mut self) -> Result<(), ParseError> {
        self.rule("if_stmt");
        let owner = self.current().col;
        self.expect_keyword(Keyword::If)?;
        self.parse_expr()?;
        self.expect(TokenKind::Punctuation, Some(":"))?;
        self.parse_block(owner)?;

        self.skip_newlines();
        let t = self.current();
        if t.keyword() == Some(Keyword::Else) && t.col == owner {
            self.expect_keyword(Keyword::Else)?;
            self.expect(TokenKind::Punctuation, Some(":"))?;
            self.parse_block(owner)?;
        }
        Ok(())
    }

    fn parse_return(&mut self) -> Result<(), ParseError> {
        self.rule("return_stmt");
        self.expect_keyword(Keyword::Return)?;
        self.parse_expr()?;
        self.end_of_statement()
    }

    fn parse_expr_stmt(&mut self) -> Result<(), ParseError> {
        self.parse_expr()?;
        self.end_of_statement()
    }

    fn parse_expr(&mut self) -> Result<(), ParseError> {
        self.rule("expression");
        self.enter()?;
        self.parse_primary()?;
        while self.at(TokenKind::Operator) {
            self.advance();
            self.parse_primary()?;
        }
        self.leave();
        Ok(())
    }

    fn parse_primary(&mut self) -> Result<(), ParseError> {
        match self.current().kind {
            TokenKind::Identifier => {
                self.advance();
                if self.at_text(TokenKind::Parenthesis, "(") { self.parse_call() } else { Ok(()) }
            }
            TokenKind::Integer | TokenKind::Str => { self.advance(); Ok(()) }
            TokenKind::Parenthesis if self.at_text(TokenKind::Parenthesis, "(") => {
                self.advance();
                self.parse_expr()?;
                self.expect(TokenKind::Parenthesis, Some(")"))
            }
            _ => Err(self.error(Expected::Expression)),
        }
    }

    fn parse_call(&mut self) -> Result<(), ParseError> {
        self.rule("call");
        self.expect(TokenKind::Parenthesis, Some("("))?;
        if !self.at_text(TokenKind::Parenthesis, ")") {
            loop {
                self.parse_expr()?;
                if self.at_text(TokenKind::Punctuation, ",") { self.advance(); } else { break; }
            }
        }
        self.expect(TokenKind::Parenthesis, Some(")"))
    }
}
