//! Recursive-descent parser for rule strings
//!
//! Grammar:
//! ```text
//! expr        := andExpr ( "OR" andExpr )*
//! andExpr     := term ( "AND" term )*
//! term        := "(" expr ")" | comparison
//! comparison  := IDENT comparator literal
//! ```
//! AND binds tighter than OR, both are left-associative, parentheses
//! override precedence.

use crate::error::{Result, RuleEngineError};
use crate::rule::ast::{Literal, LogicalOperator, Node};
use crate::rule::lexer::{tokenize, Token, TokenKind};

/// Parse a rule string into an AST
///
/// The parser performs no semantic checking: attribute existence and value
/// types are the evaluator's concern.
pub fn parse(text: &str) -> Result<Node> {
    let mut parser = Parser::new(text)?;
    let node = parser.expr()?;
    parser.expect_end()?;
    Ok(node)
}

/// Parse a string that must be a single comparison, nothing more
///
/// Used by condition replacement, where the replacement text has to stand
/// on its own as a leaf.
pub fn parse_comparison(text: &str) -> Result<Node> {
    let mut parser = Parser::new(text)?;
    let node = parser.comparison()?;
    parser.expect_end()?;
    Ok(node)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Position reported for unexpected end of input
    end: usize,
}

impl Parser {
    fn new(text: &str) -> Result<Self> {
        let tokens = tokenize(text)?;
        if tokens.is_empty() {
            return Err(RuleEngineError::ParseError {
                position: 0,
                message: "empty rule".to_string(),
            });
        }
        Ok(Parser {
            tokens,
            pos: 0,
            end: text.len(),
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, message: impl Into<String>) -> RuleEngineError {
        let position = match self.peek() {
            Some(token) => token.position,
            None => self.end,
        };
        RuleEngineError::ParseError {
            position,
            message: message.into(),
        }
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.error("unexpected token after end of expression")),
        }
    }

    fn expr(&mut self) -> Result<Node> {
        let mut node = self.and_expr()?;
        while matches!(self.peek(), Some(t) if t.kind == TokenKind::Or) {
            self.advance();
            let right = self.and_expr()?;
            node = Node::logical(LogicalOperator::Or, node, right);
        }
        Ok(node)
    }

    fn and_expr(&mut self) -> Result<Node> {
        let mut node = self.term()?;
        while matches!(self.peek(), Some(t) if t.kind == TokenKind::And) {
            self.advance();
            let right = self.term()?;
            node = Node::logical(LogicalOperator::And, node, right);
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<Node> {
        if matches!(self.peek(), Some(t) if t.kind == TokenKind::OpenParen) {
            self.advance();
            let node = self.expr()?;
            match self.advance() {
                Some(t) if t.kind == TokenKind::CloseParen => Ok(node),
                Some(t) => Err(RuleEngineError::ParseError {
                    position: t.position,
                    message: "expected ')'".to_string(),
                }),
                None => Err(RuleEngineError::ParseError {
                    position: self.end,
                    message: "expected ')'".to_string(),
                }),
            }
        } else {
            self.comparison()
        }
    }

    fn comparison(&mut self) -> Result<Node> {
        let attribute = match self.peek() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => name.clone(),
            _ => return Err(self.error("expected attribute name")),
        };
        self.advance();

        let comparator = match self.peek() {
            Some(Token {
                kind: TokenKind::Comparator(comparator),
                ..
            }) => *comparator,
            _ => return Err(self.error("expected comparator")),
        };
        self.advance();

        let literal = match self.peek() {
            Some(Token {
                kind: TokenKind::Number(n),
                ..
            }) => Literal::Number(*n),
            Some(Token {
                kind: TokenKind::Str(s),
                ..
            }) => Literal::Str(s.clone()),
            Some(Token {
                kind: TokenKind::Ident(word),
                ..
            }) if word.as_str() == "true" => Literal::Bool(true),
            Some(Token {
                kind: TokenKind::Ident(word),
                ..
            }) if word.as_str() == "false" => Literal::Bool(false),
            _ => return Err(self.error("expected literal value")),
        };
        self.advance();

        Ok(Node::comparison(attribute, comparator, literal))
    }
}
