//! Rule expression engine
//!
//! This module turns rule strings like `age > 30 AND department == 'Sales'`
//! into ASTs, evaluates them against typed contexts, combines trees under a
//! logical operator and rewrites existing trees in place.

mod ast;
pub mod cache;
mod combiner;
mod evaluator;
mod lexer;
mod mutator;
pub mod parser;


pub use ast::*;
pub use cache::*;
pub use combiner::*;
pub use evaluator::*;
pub use lexer::*;
pub use mutator::*;
pub use parser::*;
