//! Combining several rule trees under one logical operator

use crate::error::{Result, RuleEngineError};
use crate::rule::ast::{LogicalOperator, Node};

/// Combine rule trees into one strictly left-associative chain
///
/// `combine([a, b, c], op)` yields `(a op b) op c`: each step takes the
/// accumulated tree as `left` and the next input as `right`. Inputs are
/// moved into the result; callers that need to keep a standalone handle
/// clone before combining. Requires at least two trees.
pub fn combine(nodes: Vec<Node>, operator: LogicalOperator) -> Result<Node> {
    if nodes.len() < 2 {
        return Err(RuleEngineError::InsufficientOperands(nodes.len()));
    }

    let mut iter = nodes.into_iter();
    let first = iter
        .next()
        .ok_or(RuleEngineError::InsufficientOperands(0))?;
    Ok(iter.fold(first, |acc, next| Node::logical(operator, acc, next)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::evaluator::{evaluate, Context};
    use crate::rule::parser::parse;

    #[test]
    fn test_combine_two() {
        let a = parse("age > 30").unwrap();
        let b = parse("salary > 50000").unwrap();
        let combined = combine(vec![a.clone(), b.clone()], LogicalOperator::And).unwrap();

        assert_eq!(combined, Node::logical(LogicalOperator::And, a, b));
    }

    #[test]
    fn test_combine_is_left_associative() {
        let a = parse("a > 1").unwrap();
        let b = parse("b > 2").unwrap();
        let c = parse("c > 3").unwrap();
        let combined =
            combine(vec![a.clone(), b.clone(), c.clone()], LogicalOperator::Or).unwrap();

        let expected = Node::logical(
            LogicalOperator::Or,
            Node::logical(LogicalOperator::Or, a, b),
            c,
        );
        assert_eq!(combined, expected);
    }

    #[test]
    fn test_combine_requires_two_operands() {
        assert!(matches!(
            combine(vec![], LogicalOperator::And),
            Err(RuleEngineError::InsufficientOperands(0))
        ));
        assert!(matches!(
            combine(vec![parse("a > 1").unwrap()], LogicalOperator::And),
            Err(RuleEngineError::InsufficientOperands(1))
        ));
    }

    #[test]
    fn test_combined_or_matches_any_individual_match() {
        let rules = [
            parse("age > 60").unwrap(),
            parse("department == 'Sales'").unwrap(),
            parse("salary >= 100000").unwrap(),
        ];

        let contexts: Vec<Context> = vec![
            [
                ("age".to_string(), 30i64.into()),
                ("department".to_string(), "Sales".into()),
                ("salary".to_string(), 40000i64.into()),
            ]
            .into_iter()
            .collect(),
            [
                ("age".to_string(), 65i64.into()),
                ("department".to_string(), "Support".into()),
                ("salary".to_string(), 40000i64.into()),
            ]
            .into_iter()
            .collect(),
            [
                ("age".to_string(), 30i64.into()),
                ("department".to_string(), "Support".into()),
                ("salary".to_string(), 40000i64.into()),
            ]
            .into_iter()
            .collect(),
        ];

        let combined = combine(rules.to_vec(), LogicalOperator::Or).unwrap();

        for ctx in &contexts {
            let any = rules
                .iter()
                .any(|rule| evaluate(rule, ctx).unwrap());
            assert_eq!(evaluate(&combined, ctx).unwrap(), any);
        }
    }
}
