//! Rule text tokenizer

use crate::error::{Result, RuleEngineError};
use crate::rule::ast::Comparator;

/// One lexical unit with its byte offset in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Attribute name like `age` (also carries the keywords `true`/`false`,
    /// which the parser interprets in literal position)
    Ident(String),
    /// Integer or decimal literal
    Number(f64),
    /// Single- or double-quoted string literal, quotes stripped
    Str(String),
    Comparator(Comparator),
    And,
    Or,
    OpenParen,
    CloseParen,
}

/// Tokenize a rule string eagerly into a full token vector
///
/// The grammar needs one token of lookahead, which is simplest over a fixed
/// sequence. Whitespace is discarded; every other character must start a
/// valid token.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::OpenParen,
                    position,
                });
            }
            ')' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::CloseParen,
                    position,
                });
            }
            '\'' | '"' => {
                chars.next();
                let literal = read_string(&mut chars, c, position)?;
                tokens.push(Token {
                    kind: TokenKind::Str(literal),
                    position,
                });
            }
            '>' | '<' | '=' | '!' => {
                chars.next();
                let comparator = read_comparator(&mut chars, c, position)?;
                tokens.push(Token {
                    kind: TokenKind::Comparator(comparator),
                    position,
                });
            }
            c if c.is_ascii_digit() => {
                let number = read_number(&mut chars, position)?;
                tokens.push(Token {
                    kind: TokenKind::Number(number),
                    position,
                });
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let word = read_ident(&mut chars);
                let kind = match word.as_str() {
                    "AND" => TokenKind::And,
                    "OR" => TokenKind::Or,
                    _ => TokenKind::Ident(word),
                };
                tokens.push(Token { kind, position });
            }
            _ => {
                return Err(RuleEngineError::UnexpectedCharacter {
                    position,
                    character: c,
                })
            }
        }
    }

    Ok(tokens)
}

type CharStream<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn read_string(chars: &mut CharStream, quote: char, start: usize) -> Result<String> {
    let mut literal = String::new();
    for (_, c) in chars.by_ref() {
        if c == quote {
            return Ok(literal);
        }
        literal.push(c);
    }
    Err(RuleEngineError::UnterminatedString { position: start })
}

fn read_comparator(chars: &mut CharStream, first: char, position: usize) -> Result<Comparator> {
    let followed_by_eq = matches!(chars.peek(), Some(&(_, '=')));
    if followed_by_eq {
        chars.next();
    }

    match (first, followed_by_eq) {
        ('>', false) => Ok(Comparator::Greater),
        ('<', false) => Ok(Comparator::Less),
        ('>', true) => Ok(Comparator::GreaterEqual),
        ('<', true) => Ok(Comparator::LessEqual),
        ('=', true) => Ok(Comparator::Equal),
        ('!', true) => Ok(Comparator::NotEqual),
        // A lone '=' or '!' is not a token
        _ => Err(RuleEngineError::UnexpectedCharacter {
            position,
            character: first,
        }),
    }
}

fn read_number(chars: &mut CharStream, position: usize) -> Result<f64> {
    let mut text = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_digit() {
            text.push(c);
            chars.next();
        } else {
            break;
        }
    }

    // Consume a '.' only when a digit follows, so "30." leaves the dot to
    // fail as an unexpected character
    if let Some(&(_, '.')) = chars.peek() {
        let mut lookahead = chars.clone();
        lookahead.next();
        if matches!(lookahead.peek(), Some(&(_, d)) if d.is_ascii_digit()) {
            text.push('.');
            chars.next();
            while let Some(&(_, c)) = chars.peek() {
                if c.is_ascii_digit() {
                    text.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
        }
    }

    text.parse::<f64>()
        .map_err(|_| RuleEngineError::ParseError {
            position,
            message: format!("invalid numeric literal: {}", text),
        })
}

fn read_ident(chars: &mut CharStream) -> String {
    let mut word = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            word.push(c);
            chars.next();
        } else {
            break;
        }
    }
    word
}
