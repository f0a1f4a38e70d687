use dlog_ir::Term;

use crate::error::EvalError;

/// The narrow host-predicate interface the `lisp-value` form calls through:
/// a registry of named boolean predicates, not an arbitrary
/// code-evaluation hook.
pub trait PredicateRegistry {
    /// `name` is the predicate's bare symbol text (e.g. `"<"`); `args` are
    /// the already-instantiated argument terms. Implementations should be
    /// pure and report failures as `EvalError::PredicateError` rather than
    /// panicking.
    fn call(&self, name: &str, args: &[Term]) -> Result<bool, EvalError>;
}
