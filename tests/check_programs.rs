use std::path::PathBuf;

use sintaxis::{Error, Expected, LexErrorKind, Lexer, LexerConfig, Parser, TokenKind};

fn program(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/programs").join(name)
}

fn statements(name: &str, config: LexerConfig) -> usize {
    let source = std::fs::read_to_string(program(name)).unwrap();
    let tokens = Lexer::with_config(&source, config).tokenize().unwrap();
    let mut parser = Parser::new(tokens);
    parser.parse().unwrap();
    parser.statements()
}

#[test]
fn test_sample_programs_are_valid() {
    assert_eq!(statements("suma.src", LexerConfig::default()), 5);
    assert_eq!(statements("nested.src", LexerConfig::default()), 7);
    assert_eq!(statements("suma_es.src", LexerConfig::localized()), 5);
}

#[test]
fn test_spanish_program_needs_spanish_keywords() {
    let err = sintaxis::check_file(program("suma_es.src"), LexerConfig::default()).unwrap_err();
    // `función suma(...)` without the Spanish vocabulary is an identifier followed by another one.
    assert_eq!(err.position(), Some((1, 9)));
    assert!(matches!(err, Error::Parse(e) if e.found == TokenKind::Identifier));
}

#[test]
fn test_vocabulary_from_json() {
    let config = LexerConfig::from_json(program("vocab.json")).unwrap();
    assert!(config.is_keyword("resultado"));
    assert!(!config.is_keyword("mientras"));
    sintaxis::check_file(program("suma_es.src"), config).unwrap();
}

#[test]
fn test_missing_colon_is_reported_after_parameters() {
    let err = sintaxis::check_file(program("missing_colon.src"), LexerConfig::default()).unwrap_err();
    match err {
        Error::Parse(e) => {
            assert_eq!(e.expected, Expected::Token { kind: TokenKind::Punctuation, text: Some(":") });
            assert_eq!(e.found, TokenKind::Newline);
            assert_eq!((e.line, e.col), (1, 12));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_unterminated_string_is_a_lexical_error() {
    let err = sintaxis::check_file(program("unterminated.src"), LexerConfig::default()).unwrap_err();
    assert!(matches!(&err, Error::Lex(e) if e.kind == LexErrorKind::UnterminatedString));
    assert_eq!(err.position(), Some((2, 11)));
    assert_eq!(err.to_string(), "lexical error at 2:11: unterminated string");
}

#[test]
fn test_missing_file() {
    let err = sintaxis::check_file(program("nope.src"), LexerConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(err.position(), None);
}

#[test]
fn test_eof_sits_past_last_character() {
    let tokens = sintaxis::tokenize("def f():\n    return 1").unwrap();
    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!((eof.line, eof.col), (2, 13));
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
}

#[test]
fn test_token_positions_match_source() {
    let source = std::fs::read_to_string(program("nested.src")).unwrap();
    let lines: Vec<Vec<char>> = source.lines().map(|l| l.chars().collect()).collect();
    for token in sintaxis::tokenize(&source).unwrap() {
        let Some(text) = &token.text else { continue };
        let line = &lines[token.line - 1];
        let expected: Vec<char> = match token.kind {
            TokenKind::Newline => continue,
            TokenKind::Str => format!("\"{text}\"").chars().collect(),
            _ => text.chars().collect(),
        };
        let start = token.col - 1;
        assert_eq!(&line[start..start + expected.len()], &expected[..], "{token}");
    }
}
