use crate::frame::Frame;
use crate::term::{Term, Variable};

/// Tree-walks `expr`, replacing every variable with its binding in `frame`
/// (recursively, so binding chains are resolved), and calling
/// `unbound` whenever a variable has no binding at all.
///
/// `unbound` can either manufacture a display placeholder (the driver's
/// use) or fail (the `lisp-value` predicate-filter use), hence the generic
/// error type `E`.
pub fn instantiate<E>(
    expr: &Term,
    frame: &Frame,
    unbound: &mut dyn FnMut(&Variable, &Frame) -> Result<Term, E>,
) -> Result<Term, E> {
    match expr {
        Term::Variable(var) => match frame.resolve(var) {
            Some(bound) => instantiate(bound, frame, unbound),
            None => unbound(var, frame),
        },
        Term::Pair(head, tail) => {
            let head = instantiate(head, frame, unbound)?;
            let tail = instantiate(tail, frame, unbound)?;
            Ok(Term::cons(head, tail))
        }
        Term::Constant(_) => Ok(expr.clone()),
    }
}

/// Infallible specialization used for printing results: unbound variables
/// are rewritten back to their surface `?name` form via
/// [`crate::surface::contract_question_mark`] rather than signalling an
/// error.
pub fn instantiate_for_display(expr: &Term, frame: &Frame) -> Term {
    let mut unbound = |var: &Variable, _: &Frame| -> Result<Term, std::convert::Infallible> {
        Ok(crate::surface::contract_question_mark(var))
    };
    match instantiate(expr, frame, &mut unbound) {
        Ok(term) => term,
        Err(never) => match never {},
    }
}
