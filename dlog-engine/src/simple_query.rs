use std::rc::Rc;

use dlog_db::{Database, Rule};
use dlog_ir::{Frame, Term};
use dlog_stream::{Delayed, Stream};
use tracing::instrument;

use crate::predicate::PredicateRegistry;
use crate::rename::rename_term;
use crate::util::flat_eval;
use crate::{eval::qeval, FrameResult, FrameStream};

/// `simple-query`: any query whose head is not a registered form tag. For
/// each input frame, produces the append-delayed concatenation of assertion
/// matches followed by rule applications, then flat-interleaves that across
/// every input frame.
#[instrument(skip(db, predicates, stream))]
pub fn simple_query(
    db: Rc<Database>,
    predicates: Rc<dyn PredicateRegistry>,
    pattern: Term,
    stream: FrameStream,
) -> FrameStream {
    flat_eval(
        stream,
        Rc::new(move |frame: Frame| {
            simple_query_one_frame(db.clone(), predicates.clone(), pattern.clone(), frame)
        }),
    )
}

fn simple_query_one_frame(
    db: Rc<Database>,
    predicates: Rc<dyn PredicateRegistry>,
    pattern: Term,
    frame: Frame,
) -> FrameStream {
    let assertions = assertion_matches(&db, &pattern, frame.clone());
    let delayed_rules: Delayed<FrameResult> = Rc::new(move || {
        apply_rules(db.clone(), predicates.clone(), pattern.clone(), frame.clone())
    });
    dlog_stream::append_delayed(assertions, delayed_rules)
}

fn assertion_matches(db: &Database, pattern: &Term, frame: Frame) -> FrameStream {
    let candidates = db.assertions_matching(pattern);
    let pattern = pattern.clone();
    dlog_stream::flatmap(
        candidates,
        Rc::new(move |assertion: Rc<Term>| {
            let result = dlog_unify::match_pattern(&pattern, &assertion, frame.clone());
            if result.is_failed() {
                Stream::empty()
            } else {
                Stream::singleton(Ok(result))
            }
        }),
    )
}

fn apply_rules(
    db: Rc<Database>,
    predicates: Rc<dyn PredicateRegistry>,
    pattern: Term,
    frame: Frame,
) -> FrameStream {
    let candidates = db.rules_matching(&pattern);
    dlog_stream::flatmap(
        candidates,
        Rc::new(move |rule: Rc<Rule>| {
            apply_rule(db.clone(), predicates.clone(), &pattern, &rule, frame.clone())
        }),
    )
}

/// One rule application's full state machine: fetch, alpha-rename, unify
/// the query pattern against the renamed conclusion (absorbing on
/// failure), then recursively evaluate the renamed body.
#[instrument(skip(db, predicates, pattern, rule, frame))]
fn apply_rule(
    db: Rc<Database>,
    predicates: Rc<dyn PredicateRegistry>,
    pattern: &Term,
    rule: &Rule,
    frame: Frame,
) -> FrameStream {
    let generation = db.next_generation();
    let renamed_conclusion = rename_term(&rule.conclusion, generation);
    let renamed_body = rename_term(&rule.body, generation);

    let unified = dlog_unify::unify(pattern, &renamed_conclusion, frame);
    if unified.is_failed() {
        return Stream::empty();
    }
    qeval(db, predicates, renamed_body, Stream::singleton(Ok(unified)))
}
