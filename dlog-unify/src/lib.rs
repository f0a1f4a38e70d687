//! One-sided pattern matching and symmetric unification with occurs-check,
//! the two core algorithms behind every assertion lookup and rule
//! conclusion match.

use dlog_ir::{Frame, Term, Variable};
use tracing::{instrument, trace};

/// Matches `pattern` against `datum`, extending `frame`. The datum side is
/// never treated as containing variables of its own — it comes from a
/// stored assertion, not from another query.
pub fn match_pattern(pattern: &Term, datum: &Term, frame: Frame) -> Frame {
    if frame.is_failed() {
        return frame;
    }
    if pattern == datum {
        return frame;
    }
    if let Some(var) = pattern.as_variable() {
        return match_var(*var, datum, frame);
    }
    match (pattern, datum) {
        (Term::Pair(p_head, p_tail), Term::Pair(d_head, d_tail)) => {
            let frame = match_pattern(p_head, d_head, frame);
            match_pattern(p_tail, d_tail, frame)
        }
        _ => {
            trace!(?pattern, ?datum, "pattern match failed");
            Frame::failed()
        }
    }
}

fn match_var(var: Variable, datum: &Term, frame: Frame) -> Frame {
    match frame.lookup(&var).cloned() {
        Some(bound) => match_pattern(&bound, datum, frame),
        None => frame.extend(var, datum.clone()),
    }
}

/// Symmetric unification of `p1` and `p2`, extending `frame`. Fails
/// (returns `Frame::failed()`) on structural mismatch or on an occurs-check
/// violation — an equation like `?x = f(?x)` that has no finite solution.
#[instrument(skip(frame))]
pub fn unify(p1: &Term, p2: &Term, frame: Frame) -> Frame {
    if frame.is_failed() {
        return frame;
    }
    if p1 == p2 {
        return frame;
    }
    if let Some(v1) = p1.as_variable() {
        return extend_if_possible(*v1, p2, frame);
    }
    if let Some(v2) = p2.as_variable() {
        return extend_if_possible(*v2, p1, frame);
    }
    match (p1, p2) {
        (Term::Pair(a_head, a_tail), Term::Pair(b_head, b_tail)) => {
            let frame = unify(a_head, b_head, frame);
            unify(a_tail, b_tail, frame)
        }
        _ => {
            trace!(?p1, ?p2, "unify failed: structural mismatch");
            Frame::failed()
        }
    }
}

fn extend_if_possible(var: Variable, val: &Term, frame: Frame) -> Frame {
    if let Some(existing) = frame.lookup(&var).cloned() {
        return unify(&existing, val, frame);
    }

    if let Some(val_var) = val.as_variable() {
        if let Some(val_bound) = frame.lookup(val_var).cloned() {
            return unify(&Term::Variable(var), &val_bound, frame);
        }
    }

    if depends_on(val, &var, &frame) {
        trace!(?var, ?val, "occurs-check rejected binding");
        return Frame::failed();
    }

    frame.extend(var, val.clone())
}

/// `true` iff `var` occurs free in `expr` under `frame`'s current bindings:
/// a variable equal to `var` occurs directly, or a bound variable occurs
/// indirectly through its binding. An unrelated unbound variable does not
/// depend on `var`.
fn depends_on(expr: &Term, var: &Variable, frame: &Frame) -> bool {
    match expr {
        Term::Variable(v) => {
            if v == var {
                return true;
            }
            match frame.lookup(v) {
                Some(bound) => depends_on(bound, var, frame),
                None => false,
            }
        }
        Term::Pair(head, tail) => depends_on(head, var, frame) || depends_on(tail, var, frame),
        Term::Constant(_) => false,
    }
}
