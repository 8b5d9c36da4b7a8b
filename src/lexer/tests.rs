//! Unit tests for the lexer module.
//!
//! Covers keywords and identifiers, literals with escape sequences,
//! operators and punctuation, both comment forms, and error cases.

use super::{
    lexer::{tokenize, value_to_bytes},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.alan".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "byte else false if int proc reference return while true".to_string();
    let tokens = tokenize(source, Some("test.alan".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Byte);
    assert_eq!(tokens[1].kind, TokenKind::Else);
    assert_eq!(tokens[2].kind, TokenKind::False);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::Int);
    assert_eq!(tokens[5].kind, TokenKind::Proc);
    assert_eq!(tokens[6].kind, TokenKind::Reference);
    assert_eq!(tokens[7].kind, TokenKind::Return);
    assert_eq!(tokens[8].kind, TokenKind::While);
    assert_eq!(tokens[9].kind, TokenKind::True);
    assert_eq!(tokens[10].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 CamelCase integer".to_string();
    let tokens = tokenize(source, Some("test.alan".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "CamelCase");
    // Keywords only match whole words
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "integer");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_identifier_cannot_start_with_underscore() {
    assert!(tokenize("_hidden".to_string(), None).is_err());
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 1000".to_string();
    let tokens = tokenize(source, Some("test.alan".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].value, "1000");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_chars() {
    let source = r"'a' '\n' '\'' '\x41' '\\' '\0'".to_string();
    let tokens = tokenize(source, Some("test.alan".to_string())).unwrap();

    assert!(tokens[..6].iter().all(|token| token.kind == TokenKind::Char));
    assert_eq!(tokens[0].value, "a");
    assert_eq!(tokens[1].value, "\n");
    assert_eq!(tokens[2].value, "'");
    assert_eq!(tokens[3].value, "A");
    assert_eq!(tokens[4].value, "\\");
    assert_eq!(tokens[5].value, "\0");
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_char_literal_must_hold_one_char() {
    let error = tokenize("'ab'".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidCharLiteral");

    let error = tokenize("''".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidCharLiteral");
}

#[test]
fn test_char_literal_must_fit_in_a_byte() {
    let error = tokenize("'é'".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidCharLiteral");

    let error = tokenize("'€'".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidCharLiteral");

    let tokens = tokenize(r"'\xFF' '\x80'".to_string(), None).unwrap();
    assert_eq!(value_to_bytes(&tokens[0].value), vec![0xFF]);
    assert_eq!(value_to_bytes(&tokens[1].value), vec![0x80]);
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "two words" """#.to_string();
    let tokens = tokenize(source, Some("test.alan".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "two words");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, "");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "back\\slash" "hex\x41" "quote\"d" "cr\r""#.to_string();
    let tokens = tokenize(source, Some("test.alan".to_string())).unwrap();

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "back\\slash");
    assert_eq!(tokens[3].value, "hexA");
    assert_eq!(tokens[4].value, "quote\"d");
    assert_eq!(tokens[5].value, "cr\r");
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_string_values_are_bytes() {
    let tokens = tokenize(r#""é" "a\xE9b" "€""#.to_string(), None).unwrap();

    assert_eq!(value_to_bytes(&tokens[0].value), vec![0xC3, 0xA9]);
    assert_eq!(value_to_bytes(&tokens[1].value), vec![b'a', 0xE9, b'b']);
    assert_eq!(value_to_bytes(&tokens[2].value), vec![0xE2, 0x82, 0xAC]);
}

#[test]
fn test_invalid_escape_sequence() {
    let error = tokenize(r#""bad\q""#.to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidEscapeSequence");

    let error = tokenize(r"'\xZZ'".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidEscapeSequence");
}

#[test]
fn test_string_cannot_span_lines() {
    assert!(tokenize("\"one\ntwo\"".to_string(), None).is_err());
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % == != < > <= >= = & | !"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_operators_without_spaces() {
    assert_eq!(
        kinds("a<=b==c!=!d"),
        vec![
            TokenKind::Identifier,
            TokenKind::LessEquals,
            TokenKind::Identifier,
            TokenKind::Equals,
            TokenKind::Identifier,
            TokenKind::NotEquals,
            TokenKind::Not,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] , ; :"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_line_comments() {
    let source = "x = 5; -- this is a comment\ny = 10;".to_string();
    let tokens = tokenize(source, Some("test.alan".to_string())).unwrap();

    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[3].kind, TokenKind::Semicolon);
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "y");
    assert_eq!(tokens[7].kind, TokenKind::Semicolon);
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_single_dash_is_an_operator() {
    assert_eq!(
        kinds("a - -b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dash,
            TokenKind::Dash,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_nested_block_comments() {
    assert_eq!(
        kinds("a (* outer (* inner *) still outer *) b"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_block_comment_spans_lines() {
    assert_eq!(
        kinds("(*\n  header\n*)\nmain"),
        vec![TokenKind::Identifier, TokenKind::EOF]
    );
}

#[test]
fn test_unterminated_block_comment() {
    let error = tokenize("a (* (* closed once *)".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnterminatedComment");
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_paren_star_without_space_is_comment() {
    // `(*` always opens a comment, even inside an expression
    assert!(tokenize("(*x".to_string(), None).is_err());
}

#[test]
fn test_tokenize_unrecognized_token() {
    let error = tokenize("x = @".to_string(), Some("test.alan".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_token_spans() {
    let source = "f(\"ab\") ;".to_string();
    let tokens = tokenize(source, Some("test.alan".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[0].span.end.0, 1);
    // The string span covers its quotes
    assert_eq!(tokens[2].span.start.0, 2);
    assert_eq!(tokens[2].span.end.0, 6);
    assert_eq!(tokens[4].span.start.0, 8);
    assert_eq!(tokens[5].kind, TokenKind::EOF);
    assert_eq!(tokens[5].span.start.0, 9);
    assert_eq!(*tokens[5].span.start.1, "test.alan");
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x".to_string(), None).unwrap();
    assert_eq!(*tokens[0].span.start.1, "shell");
}

#[test]
fn test_tokenize_whitespace_handling() {
    assert_eq!(
        kinds("  \t x \r\n  =\n\n 42  "),
        vec![
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_tokenize_function_header() {
    assert_eq!(
        kinds("swap(a : reference int, b : reference int) : proc"),
        vec![
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Reference,
            TokenKind::Int,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Reference,
            TokenKind::Int,
            TokenKind::CloseParen,
            TokenKind::Colon,
            TokenKind::Proc,
            TokenKind::EOF,
        ]
    );
}
