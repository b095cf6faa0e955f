//! Abstract syntax tree for rule expressions

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// AST node for a rule expression
///
/// A tree is either a single comparison leaf or a logical node with exactly
/// two children. Children are owned exclusively, so a tree is always finite
/// and acyclic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// Leaf condition like `age > 30`
    Comparison {
        attribute: String,
        comparator: Comparator,
        literal: Literal,
    },
    /// Internal AND/OR node
    Logical {
        operator: LogicalOperator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Greater than (>)
    #[serde(rename = ">")]
    Greater,
    /// Less than (<)
    #[serde(rename = "<")]
    Less,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    GreaterEqual,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    LessEqual,
    /// Equal (==)
    #[serde(rename = "==")]
    Equal,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    NotEqual,
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

/// Literal value on the right-hand side of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Node {
    /// Build a comparison leaf
    pub fn comparison(
        attribute: impl Into<String>,
        comparator: Comparator,
        literal: Literal,
    ) -> Self {
        Node::Comparison {
            attribute: attribute.into(),
            comparator,
            literal,
        }
    }

    /// Build a logical node from two subtrees
    pub fn logical(operator: LogicalOperator, left: Node, right: Node) -> Self {
        Node::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Serialize this tree into its wire/storage representation
    ///
    /// The shape is a nested record with a `kind` discriminator:
    /// `{"kind": "comparison", "attribute": …, "comparator": …, "literal": …}`
    /// for leaves and `{"kind": "logical", "operator": …, "left": …,
    /// "right": …}` for internal nodes.
    pub fn to_representation(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Rebuild a tree from its wire/storage representation
    ///
    /// Fails with `DeserializationError` on a malformed record: an unknown
    /// `kind` tag, a missing required field, or a logical node missing a
    /// child.
    pub fn from_representation(value: serde_json::Value) -> Result<Node> {
        Ok(serde_json::from_value(value)?)
    }
}

impl Comparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Greater => ">",
            Comparator::Less => "<",
            Comparator::GreaterEqual => ">=",
            Comparator::LessEqual => "<=",
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
        }
    }
}

impl LogicalOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{}", b),
            // Integral values render without a trailing ".0" so rendered
            // text re-parses to the same literal
            Literal::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Comparison {
                attribute,
                comparator,
                literal,
            } => write!(f, "{} {} {}", attribute, comparator, literal),
            Node::Logical {
                operator,
                left,
                right,
            } => {
                fmt_child(left, f)?;
                write!(f, " {} ", operator)?;
                fmt_child(right, f)
            }
        }
    }
}

/// Parenthesize logical children so rendered text keeps the tree shape
fn fmt_child(child: &Node, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match child {
        Node::Comparison { .. } => write!(f, "{}", child),
        Node::Logical { .. } => write!(f, "({})", child),
    }
}
