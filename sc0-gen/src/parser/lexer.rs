use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::CompileError;
use crate::span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Keywords
    Assign, If, Else, While, Print, Binop, Unop, True, False,
    // Operators
    Plus,          // +
    Minus,         // -
    Star,          // *
    Slash,         // /
    AndAnd,        // &&
    OrOr,          // ||
    EqualEqual,    // ==
    NotEqual,      // !=
    Less,          // <
    LessEqual,     // <=
    Greater,       // >
    GreaterEqual,  // >=
    Bang,          // !
    // Brackets
    LParen,        // (
    RParen,        // )
    LBrace,        // {
    RBrace,        // }
    // Identifiers and literals
    Identifier(String),
    IntLiteral(i32),
    StrLiteral(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Character stream that keeps track of line and column.
struct Cursor<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |&(i, _)| i)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn error(&self, line: usize, column: usize, message: String) -> CompileError {
        CompileError::LexerError { line, column, message }
    }
}

pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, CompileError> {
    let mut tokens = Vec::new();
    let mut cursor = Cursor::new(source);

    while let Some(ch) = cursor.peek() {
        let (line, column, start) = (cursor.line, cursor.column, cursor.offset());

        let token = match ch {
            ' ' | '\t' | '\r' | '\n' => {
                cursor.bump();
                continue;
            }
            '#' => {
                // Comments run to the end of the line
                while let Some(ch) = cursor.peek() {
                    if ch == '\n' { break; }
                    cursor.bump();
                }
                continue;
            }
            '0'..='9' => parse_number(&mut cursor, false, line, column)?,
            'a'..='z' | 'A'..='Z' | '_' => {
                let ident = parse_identifier(&mut cursor);
                match ident.as_str() {
                    "Assign" => Token::Assign,
                    "If" => Token::If,
                    "Else" => Token::Else,
                    "While" => Token::While,
                    "Print" => Token::Print,
                    "Binop" => Token::Binop,
                    "Unop" => Token::Unop,
                    "true" => Token::True,
                    "false" => Token::False,
                    _ => Token::Identifier(ident),
                }
            }
            '"' => {
                cursor.bump();
                parse_string(&mut cursor, line, column)?
            }
            '-' => {
                cursor.bump();
                // `-5` is a literal, `- 5` is the operator followed by 5
                match cursor.peek() {
                    Some('0'..='9') => parse_number(&mut cursor, true, line, column)?,
                    _ => Token::Minus,
                }
            }
            _ => {
                cursor.bump();
                match ch {
                    '+' => Token::Plus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '<' if cursor.eat('=') => Token::LessEqual,
                    '<' => Token::Less,
                    '>' if cursor.eat('=') => Token::GreaterEqual,
                    '>' => Token::Greater,
                    '!' if cursor.eat('=') => Token::NotEqual,
                    '!' => Token::Bang,
                    '=' if cursor.eat('=') => Token::EqualEqual,
                    '&' if cursor.eat('&') => Token::AndAnd,
                    '|' if cursor.eat('|') => Token::OrOr,
                    _ => {
                        return Err(cursor.error(line, column, format!("Unexpected character: '{}'", ch)));
                    }
                }
            }
        };

        let span = Span::new(line, column, start, cursor.offset());
        tokens.push(SpannedToken { token, span });
    }

    let end = source.len();
    tokens.push(SpannedToken {
        token: Token::Eof,
        span: Span::new(cursor.line, cursor.column, end, end),
    });
    Ok(tokens)
}

fn parse_number(cursor: &mut Cursor, negative: bool, line: usize, column: usize) -> Result<Token, CompileError> {
    let mut digits = String::new();
    if negative {
        digits.push('-');
    }

    while let Some(ch) = cursor.peek() {
        match ch {
            '0'..='9' => {
                digits.push(ch);
                cursor.bump();
            }
            _ => break,
        }
    }

    digits
        .parse::<i32>()
        .map(Token::IntLiteral)
        .map_err(|_| cursor.error(line, column, format!("Integer literal out of range: {}", digits)))
}

fn parse_identifier(cursor: &mut Cursor) -> String {
    let mut ident = String::new();

    while let Some(ch) = cursor.peek() {
        match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' => {
                ident.push(ch);
                cursor.bump();
            }
            _ => break,
        }
    }

    ident
}

// Opening quote already consumed; no escape sequences.
fn parse_string(cursor: &mut Cursor, line: usize, column: usize) -> Result<Token, CompileError> {
    let mut text = String::new();

    loop {
        match cursor.peek() {
            Some('"') => {
                cursor.bump();
                return Ok(Token::StrLiteral(text));
            }
            Some('\n') | None => {
                return Err(cursor.error(line, column, "Unclosed string literal".to_string()));
            }
            Some(ch) => {
                text.push(ch);
                cursor.bump();
            }
        }
    }
}
