use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::{Error, ScanError};
use crate::token::{Token, Type};
use crate::value::Value;

/// Converts source text into an ordered token sequence terminated by a
/// single `EOF` token. Built on `peekmore`'s two-ahead lookahead iterator
/// rather than indexing into a byte slice, since only `peek`/`peek_next`
/// are ever needed.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    line: u32,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: Vec::new(),
            line: 1,
        }
    }

    /// Scans the whole source and returns the token sequence.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::EOF, String::new(), Value::Nil, self.line));
        self.tokens
    }

    fn advance(&mut self) -> char {
        self.source.next().expect("advance called past end of source")
    }

    fn peek(&mut self) -> char {
        self.source.peek().copied().unwrap_or('\0')
    }

    fn peek_next(&mut self) -> char {
        self.source.peek_next().copied().unwrap_or('\0')
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Value) {
        self.tokens.push(Token::new(r#type, lexeme, literal, self.line));
    }

    fn add_single_char_token(&mut self, r#type: Type) {
        let c = self.advance();
        self.add_token(r#type, c.to_string(), Value::Nil);
    }

    fn add_double_char_token(&mut self, r#type: Type) {
        let first = self.advance();
        let second = self.advance();
        self.add_token(r#type, format!("{first}{second}"), Value::Nil);
    }

    /// Consumes a `/* ... */` comment, nesting to arbitrary depth. The
    /// opening `/*` has already been consumed by the caller.
    fn skip_nested_block_comment(&mut self) {
        let start_line = self.line;
        let mut depth = 1usize;

        while depth > 0 {
            if self.is_at_end() {
                ScanError {
                    line: start_line,
                    message: "Unterminated comment.".to_string(),
                }.throw();
                return;
            }

            let c = self.advance();
            match c {
                '\n' => self.line += 1,
                '/' if self.peek() == '*' => {
                    self.advance();
                    depth += 1;
                },
                '*' if self.peek() == '/' => {
                    self.advance();
                    depth -= 1;
                },
                _ => {},
            }
        }
    }

    /// Consumes a string literal. The opening `"` has already been
    /// consumed by the caller.
    fn string(&mut self) {
        let start_line = self.line;
        let mut value = String::new();

        while !self.is_at_end() && self.peek() != '"' {
            let c = self.advance();
            if c == '\n' {
                self.line += 1;
            }
            value.push(c);
        }

        if self.is_at_end() {
            ScanError {
                line: start_line,
                message: "Unterminated string.".to_string(),
            }.throw();
            return;
        }

        self.advance(); // the closing quote

        self.add_token(Type::String, value.clone(), Value::String(value));
    }

    fn number(&mut self) {
        let mut value = String::new();

        while self.peek().is_ascii_digit() {
            value.push(self.advance());
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            value.push(self.advance()); // the '.'
            while self.peek().is_ascii_digit() {
                value.push(self.advance());
            }
        }

        let number: f64 = value.parse().expect("scanned digits to form a valid number");
        self.add_token(Type::Number, value, Value::Number(number));
    }

    fn identifier(&mut self) {
        let mut value = String::new();

        while self.peek().is_alphanumeric() || self.peek() == '_' {
            value.push(self.advance());
        }

        let r#type = match value.as_str() {
            "and" => Type::And,
            "class" => Type::Class,
            "else" => Type::Else,
            "false" => Type::False,
            "for" => Type::For,
            "fun" => Type::Fun,
            "if" => Type::If,
            "nil" => Type::Nil,
            "or" => Type::Or,
            "print" => Type::Print,
            "return" => Type::Return,
            "super" => Type::Super,
            "this" => Type::This,
            "true" => Type::True,
            "var" => Type::Var,
            "while" => Type::While,
            _ => Type::Identifier,
        };

        self.add_token(r#type, value, Value::Nil);
    }

    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),
            '?' => self.add_single_char_token(Type::Question),
            ':' => self.add_single_char_token(Type::Colon),

            '!' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::BangEqual, "!=".to_string(), Value::Nil);
                } else {
                    self.add_token(Type::Bang, "!".to_string(), Value::Nil);
                }
            },
            '=' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::EqualEqual, "==".to_string(), Value::Nil);
                } else {
                    self.add_token(Type::Equal, "=".to_string(), Value::Nil);
                }
            },
            '<' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::LessEqual, "<=".to_string(), Value::Nil);
                } else {
                    self.add_token(Type::Less, "<".to_string(), Value::Nil);
                }
            },
            '>' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::GreaterEqual, ">=".to_string(), Value::Nil);
                } else {
                    self.add_token(Type::Greater, ">".to_string(), Value::Nil);
                }
            },
            '/' => {
                self.advance();
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.skip_nested_block_comment();
                } else {
                    self.add_token(Type::Slash, "/".to_string(), Value::Nil);
                }
            },

            ' ' | '\r' | '\t' => {
                self.advance();
            },

            '\n' => {
                self.advance();
                self.line += 1;
            },

            '"' => {
                self.advance();
                self.string();
            },

            c if c.is_ascii_digit() => self.number(),

            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                ScanError {
                    line: self.line,
                    message: format!("Unexpected character '{c}'."),
                }.throw();
            },
        }
    }
}
