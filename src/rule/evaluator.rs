//! Rule evaluation against a typed attribute context

use crate::error::{Result, RuleEngineError};
use crate::rule::ast::{Comparator, Literal, LogicalOperator, Node};
use std::collections::HashMap;

/// Attribute value kinds a context can hold
///
/// A closed union, so the evaluator's type-mismatch detection is exhaustive
/// rather than relying on runtime probing.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    Str(String),
    Bool(bool),
}

/// Caller-supplied attribute mapping for one evaluation
pub type Context = HashMap<String, AttributeValue>;

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// Evaluate an AST against a context
///
/// Pure and read-only. A missing attribute is an error rather than a silent
/// `false`, so data-quality problems in the caller's context construction
/// surface instead of hiding. AND/OR short-circuit on the left result, and
/// the skipped side is never evaluated, so its errors never surface.
pub fn evaluate(node: &Node, context: &Context) -> Result<bool> {
    match node {
        Node::Comparison {
            attribute,
            comparator,
            literal,
        } => {
            let value = context
                .get(attribute)
                .ok_or_else(|| RuleEngineError::MissingAttribute(attribute.clone()))?;
            compare(attribute, value, *comparator, literal)
        }
        Node::Logical {
            operator: LogicalOperator::And,
            left,
            right,
        } => {
            if !evaluate(left, context)? {
                return Ok(false);
            }
            evaluate(right, context)
        }
        Node::Logical {
            operator: LogicalOperator::Or,
            left,
            right,
        } => {
            if evaluate(left, context)? {
                return Ok(true);
            }
            evaluate(right, context)
        }
    }
}

fn compare(
    attribute: &str,
    value: &AttributeValue,
    comparator: Comparator,
    literal: &Literal,
) -> Result<bool> {
    match (value, literal) {
        (AttributeValue::Number(v), Literal::Number(l)) => Ok(match comparator {
            Comparator::Greater => v > l,
            Comparator::Less => v < l,
            Comparator::GreaterEqual => v >= l,
            Comparator::LessEqual => v <= l,
            Comparator::Equal => v == l,
            Comparator::NotEqual => v != l,
        }),
        // Strings order lexicographically
        (AttributeValue::Str(v), Literal::Str(l)) => Ok(match comparator {
            Comparator::Greater => v.as_str() > l.as_str(),
            Comparator::Less => v.as_str() < l.as_str(),
            Comparator::GreaterEqual => v.as_str() >= l.as_str(),
            Comparator::LessEqual => v.as_str() <= l.as_str(),
            Comparator::Equal => v == l,
            Comparator::NotEqual => v != l,
        }),
        // Booleans only support equality
        (AttributeValue::Bool(v), Literal::Bool(l)) => match comparator {
            Comparator::Equal => Ok(v == l),
            Comparator::NotEqual => Ok(v != l),
            _ => Err(RuleEngineError::TypeMismatch(attribute.to_string())),
        },
        _ => Err(RuleEngineError::TypeMismatch(attribute.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::parser::parse;

    fn context(entries: &[(&str, AttributeValue)]) -> Context {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_numeric_comparison() {
        let ast = parse("age > 30").unwrap();

        let ctx = context(&[("age", 35i64.into())]);
        assert!(evaluate(&ast, &ctx).unwrap());

        let ctx = context(&[("age", 20i64.into())]);
        assert!(!evaluate(&ast, &ctx).unwrap());
    }

    #[test]
    fn test_missing_attribute() {
        let ast = parse("age > 30").unwrap();
        match evaluate(&ast, &Context::new()) {
            Err(RuleEngineError::MissingAttribute(name)) => assert_eq!(name, "age"),
            other => panic!("Expected MissingAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_type_mismatch() {
        let ast = parse("age > 30").unwrap();
        let ctx = context(&[("age", "thirty-five".into())]);
        match evaluate(&ast, &ctx) {
            Err(RuleEngineError::TypeMismatch(name)) => assert_eq!(name, "age"),
            other => panic!("Expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_string_comparison() {
        let ctx = context(&[("department", "Sales".into())]);

        let ast = parse("department == 'Sales'").unwrap();
        assert!(evaluate(&ast, &ctx).unwrap());

        let ast = parse("department != 'Sales'").unwrap();
        assert!(!evaluate(&ast, &ctx).unwrap());

        // Lexicographic ordering
        let ast = parse("department > 'Marketing'").unwrap();
        assert!(evaluate(&ast, &ctx).unwrap());
    }

    #[test]
    fn test_boolean_comparison() {
        let ctx = context(&[("active", true.into())]);

        let ast = parse("active == true").unwrap();
        assert!(evaluate(&ast, &ctx).unwrap());

        let ast = parse("active != true").unwrap();
        assert!(!evaluate(&ast, &ctx).unwrap());

        // Ordering comparators do not apply to booleans
        let ast = parse("active > false").unwrap();
        assert!(matches!(
            evaluate(&ast, &ctx),
            Err(RuleEngineError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_and_or_evaluation() {
        let ctx = context(&[("age", 35i64.into()), ("department", "Sales".into())]);

        let ast = parse("age > 30 AND department == 'Sales'").unwrap();
        assert!(evaluate(&ast, &ctx).unwrap());

        let ast = parse("age > 40 AND department == 'Sales'").unwrap();
        assert!(!evaluate(&ast, &ctx).unwrap());

        let ast = parse("age > 40 OR department == 'Sales'").unwrap();
        assert!(evaluate(&ast, &ctx).unwrap());
    }

    #[test]
    fn test_or_short_circuit_skips_missing_attribute() {
        let ctx = context(&[("age", 40i64.into())]);

        // The right side would fail with MissingAttribute if evaluated
        let ast = parse("age > 30 OR missing_attr == 1").unwrap();
        assert!(evaluate(&ast, &ctx).unwrap());
    }

    #[test]
    fn test_and_short_circuit_skips_missing_attribute() {
        let ctx = context(&[("age", 20i64.into())]);

        let ast = parse("age > 30 AND missing_attr == 1").unwrap();
        assert!(!evaluate(&ast, &ctx).unwrap());
    }

    #[test]
    fn test_unneeded_branch_error_still_surfaces_when_reached() {
        // When the left side does not decide the result, the right side's
        // failure is the caller's answer
        let ctx = context(&[("age", 40i64.into())]);
        let ast = parse("age > 30 AND missing_attr == 1").unwrap();
        assert!(matches!(
            evaluate(&ast, &ctx),
            Err(RuleEngineError::MissingAttribute(_))
        ));
    }

    #[test]
    fn test_evaluation_does_not_mutate() {
        let ast = parse("age > 30 AND department == 'Sales'").unwrap();
        let snapshot = ast.clone();
        let ctx = context(&[("age", 35i64.into()), ("department", "Sales".into())]);
        let _ = evaluate(&ast, &ctx);
        assert_eq!(ast, snapshot);
    }
}
