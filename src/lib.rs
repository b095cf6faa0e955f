//! Rule Engine Core - boolean rule expression engine
//!
//! Parses textual rules like `age > 30 AND department == 'Sales'` into an
//! AST, evaluates trees against a typed attribute context, combines several
//! trees under one logical operator and rewrites existing trees in place.
//! Persistence and transport live in the embedding layer; the only shape
//! this crate defines is the `kind`-tagged tree representation.
//!
//! # Example
//!
//! ```
//! use rule_engine_core::rule::{evaluate, parse, AttributeValue, Context};
//!
//! let ast = parse("age > 30 AND department == 'Sales'").unwrap();
//!
//! let mut ctx = Context::new();
//! ctx.insert("age".to_string(), AttributeValue::Number(35.0));
//! ctx.insert("department".to_string(), AttributeValue::Str("Sales".to_string()));
//!
//! assert!(evaluate(&ast, &ctx).unwrap());
//! ```

pub mod error;
pub mod rule;

pub use error::{Result, RuleEngineError};
pub use rule::{
    combine, evaluate, parse, replace_condition, replace_operator, AttributeValue, Comparator,
    Context, Literal, LogicalOperator, Node,
};
