//! In-place structural replacement on rule trees
//!
//! Both operations walk the whole tree and change every matching node, so
//! the edit is deterministic regardless of where a stale value sits. Both
//! return the number of nodes changed; zero matches is a valid outcome and
//! the caller decides whether that counts as a failure.

use crate::error::Result;
use crate::rule::ast::{LogicalOperator, Node};
use crate::rule::parser::parse_comparison;

/// Replace every logical node carrying `old` with `new`
///
/// Mutates the tree in place; other holders of the same tree observe the
/// change. Returns the number of nodes changed.
pub fn replace_operator(node: &mut Node, old: LogicalOperator, new: LogicalOperator) -> usize {
    match node {
        Node::Comparison { .. } => 0,
        Node::Logical {
            operator,
            left,
            right,
        } => {
            let mut count = replace_operator(left, old, new) + replace_operator(right, old, new);
            if *operator == old {
                *operator = new;
                count += 1;
            }
            count
        }
    }
}

/// Replace every comparison matching `old_text` with the parsed `new_text`
///
/// Both texts must parse as standalone comparisons; they are parsed before
/// the tree is touched, so a bad replacement leaves the tree unchanged.
/// Matching is structural: `"age>30"` and `"age > 30"` name the same
/// condition. Returns the number of nodes changed.
pub fn replace_condition(node: &mut Node, old_text: &str, new_text: &str) -> Result<usize> {
    let old = parse_comparison(old_text)?;
    let new = parse_comparison(new_text)?;
    Ok(replace_matching(node, &old, &new))
}

fn replace_matching(node: &mut Node, old: &Node, new: &Node) -> usize {
    match node {
        Node::Comparison { .. } => {
            if node == old {
                *node = new.clone();
                1
            } else {
                0
            }
        }
        Node::Logical { left, right, .. } => {
            replace_matching(left, old, new) + replace_matching(right, old, new)
        }
    }
}
