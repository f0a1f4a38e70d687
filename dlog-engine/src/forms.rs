use std::rc::Rc;

use dlog_db::Database;
use dlog_ir::Term;
use dlog_stream::{Delayed, Stream};

use crate::error::EvalError;
use crate::predicate::PredicateRegistry;
use crate::util::flat_eval;
use crate::{eval::qeval, FrameResult, FrameStream};

/// `and(conjuncts, s)`: empty list of conjuncts returns `s` unchanged;
/// otherwise each conjunct's output frame stream feeds the next.
pub(crate) fn and(
    db: Rc<Database>,
    predicates: Rc<dyn PredicateRegistry>,
    conjuncts: Term,
    stream: FrameStream,
) -> FrameStream {
    match conjuncts.as_pair() {
        None => stream,
        Some((first, rest)) => {
            let rest = rest.clone();
            let extended = qeval(db.clone(), predicates.clone(), first.clone(), stream);
            and(db, predicates, rest, extended)
        }
    }
}

/// `or(disjuncts, s)`: fair interleave of each disjunct's result stream,
/// evaluated against the *same* input stream `s` (not threaded between
/// disjuncts, unlike `and`).
pub(crate) fn or(
    db: Rc<Database>,
    predicates: Rc<dyn PredicateRegistry>,
    disjuncts: Term,
    stream: FrameStream,
) -> FrameStream {
    match disjuncts.as_pair() {
        None => Stream::empty(),
        Some((first, rest)) => {
            let rest = rest.clone();
            let first_stream = qeval(db.clone(), predicates.clone(), first.clone(), stream.clone());
            let delayed: Delayed<FrameResult> =
                Rc::new(move || or(db.clone(), predicates.clone(), rest.clone(), stream.clone()));
            dlog_stream::interleave_delayed(first_stream, delayed)
        }
    }
}

/// `not(operand, s)`: negation-as-failure relative to the current frame.
/// For each frame, re-evaluates `operand` against a singleton stream of
/// just that frame; the frame survives iff that
/// evaluation is empty. A fatal error inside the operand's evaluation is
/// propagated rather than treated as emptiness.
pub(crate) fn not(
    db: Rc<Database>,
    predicates: Rc<dyn PredicateRegistry>,
    operand: Term,
    stream: FrameStream,
) -> FrameStream {
    flat_eval(
        stream,
        Rc::new(move |frame| {
            let inner = qeval(
                db.clone(),
                predicates.clone(),
                operand.clone(),
                Stream::singleton(Ok(frame.clone())),
            );
            match inner.head() {
                None => Stream::singleton(Ok(frame)),
                Some(Err(e)) => Stream::singleton(Err(e.clone())),
                Some(Ok(_)) => Stream::empty(),
            }
        }),
    )
}

/// `lisp-value(call, s)`: instantiates `call` under each frame (every
/// variable must already be bound, else `UnboundInPredicate`), then invokes
/// the host predicate registry and passes the frame through iff it returns
/// true.
pub(crate) fn lisp_value(
    predicates: Rc<dyn PredicateRegistry>,
    call: Term,
    stream: FrameStream,
) -> FrameStream {
    flat_eval(
        stream,
        Rc::new(move |frame| {
            let mut unbound = |var: &dlog_ir::Variable, _frame: &dlog_ir::Frame| -> Result<Term, EvalError> {
                Err(EvalError::UnboundInPredicate(format!(
                    "{}",
                    dlog_ir::contract_question_mark(var)
                )))
            };
            match dlog_ir::instantiate(&call, &frame, &mut unbound) {
                Err(e) => Stream::singleton(Err(e)),
                Ok(instantiated) => match apply_predicate(predicates.as_ref(), &instantiated) {
                    Ok(true) => Stream::singleton(Ok(frame.clone())),
                    Ok(false) => Stream::empty(),
                    Err(e) => Stream::singleton(Err(e)),
                },
            }
        }),
    )
}

/// `always-true(_, s)`: the identity form.
pub(crate) fn always_true(stream: FrameStream) -> FrameStream {
    stream
}

fn apply_predicate(predicates: &dyn PredicateRegistry, call: &Term) -> Result<bool, EvalError> {
    let name = call
        .head_symbol()
        .ok_or_else(|| EvalError::invalid_query(call))?;
    let args: Vec<Term> = call
        .tail()
        .map(|t| t.list_iter().cloned().collect())
        .unwrap_or_default();
    predicates.call(name.resolve(), &args)
}
