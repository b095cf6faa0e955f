//! Rule parsing cache - Optimized with faster hashing
//!
//! Embedding layers tend to evaluate the same rule texts over and over, so
//! the parser is fronted by a global AST cache. Callers that want the pure
//! engine simply use `parser::parse` directly.

use crate::error::Result;
use crate::rule::ast::Node;
use crate::rule::evaluator::{evaluate, Context};
use crate::rule::parser;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Global rule cache with fast hashing (ahash)
static RULE_CACHE: Lazy<RwLock<AHashMap<String, Node>>> = Lazy::new(|| {
    let map = AHashMap::with_capacity(256);
    RwLock::new(map)
});

/// Get or parse a rule string, using the cache for repeated rules
#[inline]
pub fn get_or_parse(rule: &str) -> Result<Node> {
    // Fast path: check read lock first
    {
        let cache = RULE_CACHE.read();
        if let Some(ast) = cache.get(rule) {
            return Ok(ast.clone());
        }
    }

    // Slow path: parse and cache
    let ast = parser::parse(rule)?;

    {
        let mut cache = RULE_CACHE.write();
        cache.insert(rule.to_string(), ast.clone());
    }

    Ok(ast)
}

/// Evaluate a rule string against a context, using the cached AST
#[inline]
pub fn evaluate_cached(rule: &str, context: &Context) -> Result<bool> {
    let ast = get_or_parse(rule)?;
    evaluate(&ast, context)
}

/// Clear the rule cache (useful for testing)
#[allow(dead_code)]
pub fn clear_cache() {
    let mut cache = RULE_CACHE.write();
    cache.clear();
}

/// Get cache statistics
#[allow(dead_code)]
pub fn cache_size() -> usize {
    let cache = RULE_CACHE.read();
    cache.len()
}
