//! Identifier validation, applied before any process is spawned.

use capaudit_core::{BridgeExpr, LoadError};

/// Whether `name` is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Validate a dotted module path such as `multiprocessing.shared_memory`.
pub fn validate_module(module: &str) -> Result<(), LoadError> {
    if module.split('.').all(is_identifier) {
        Ok(())
    } else {
        Err(LoadError::InvalidName(module.to_string()))
    }
}

/// Validate a function or attribute name.
pub fn validate_identifier(name: &str) -> Result<(), LoadError> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(LoadError::InvalidName(name.to_string()))
    }
}

/// Validate every name referenced by a bridge expression.
pub fn validate_expr(expr: &BridgeExpr) -> Result<(), LoadError> {
    expr.names().into_iter().try_for_each(validate_identifier)
}
