use dlog_ir::Term;

/// The evaluator's fatal error kinds. Ordinary match/unify mismatches are
/// never represented here — they are just an empty frame stream.
#[derive(thiserror::Error, Debug, Clone)]
pub enum EvalError {
    #[error("invalid query: expected a pair, found {0}")]
    InvalidQuery(String),

    #[error("unbound variable in predicate filter: {0}")]
    UnboundInPredicate(String),

    #[error("host predicate `{name}` failed: {message}")]
    PredicateError { name: String, message: String },
}

impl EvalError {
    pub fn invalid_query(term: &Term) -> EvalError {
        EvalError::InvalidQuery(format!("{}", term))
    }
}
