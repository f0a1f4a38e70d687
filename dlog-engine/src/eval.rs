use std::rc::Rc;

use dlog_db::Database;
use dlog_ir::{Constant, Term};
use dlog_stream::Stream;
use tracing::instrument;

use crate::error::EvalError;
use crate::forms;
use crate::predicate::PredicateRegistry;
use crate::simple_query::simple_query;
use crate::FrameStream;

/// `qeval(query, frame-stream)`: dispatches on the query's head symbol to a
/// compound-form handler, or falls through to [`simple_query`] for anything
/// else.
#[instrument(skip(db, predicates, stream))]
pub fn qeval(
    db: Rc<Database>,
    predicates: Rc<dyn PredicateRegistry>,
    query: Term,
    stream: FrameStream,
) -> FrameStream {
    let (head, tail) = match query.as_pair() {
        Some(pair) => pair,
        None => return Stream::singleton(Err(EvalError::invalid_query(&query))),
    };

    let form_tag = match head {
        Term::Constant(Constant::Symbol(s)) => Some(s.resolve()),
        _ => None,
    };
    let tail = tail.clone();

    match form_tag {
        Some("and") => forms::and(db, predicates, tail, stream),
        Some("or") => forms::or(db, predicates, tail, stream),
        Some("not") => {
            let operand = tail.head().cloned().unwrap_or_else(Term::nil);
            forms::not(db, predicates, operand, stream)
        }
        Some("lisp-value") => forms::lisp_value(predicates, tail, stream),
        Some("always-true") => forms::always_true(stream),
        _ => simple_query(db, predicates, query, stream),
    }
}
