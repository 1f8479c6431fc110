extern crate lox;

use lox::token::{Token, Type};
use lox::value::Value;

#[test]
fn create_token() {
    let token = Token::new(Type::LeftParen, "(".to_string(), Value::Nil, 3);

    assert_eq!(token.r#type, Type::LeftParen);
    assert_eq!(token.lexeme, "(");
    assert_eq!(token.literal, Value::Nil);
    assert_eq!(token.line, 3);
}

#[test]
fn display_token() {
    let token = Token::new(Type::Number, "12".to_string(), Value::Number(12.0), 3);

    assert_eq!(format!("{token}"), "Number 12 12 @ line 3");
}

#[test]
fn display_token_with_nil_literal() {
    let token = Token::new(Type::Semicolon, ";".to_string(), Value::Nil, 1);

    assert_eq!(format!("{token}"), "Semicolon ; nil @ line 1");
}

#[test]
fn tokens_with_same_fields_are_equal() {
    let a = Token::new(Type::Identifier, "x".to_string(), Value::Nil, 1);
    let b = Token::new(Type::Identifier, "x".to_string(), Value::Nil, 1);

    assert_eq!(a, b);
}

#[test]
fn tokens_with_different_lines_are_not_equal() {
    let a = Token::new(Type::Identifier, "x".to_string(), Value::Nil, 1);
    let b = Token::new(Type::Identifier, "x".to_string(), Value::Nil, 2);

    assert_ne!(a, b);
}
