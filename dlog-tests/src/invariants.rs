//! Quantified invariants checked directly against `dlog_unify` and
//! `dlog_stream` rather than through the full evaluator.

use std::rc::Rc;

use dlog_ir::{instantiate_for_display, query_syntax_process, Frame, Term, Variable};
use dlog_stream::{interleave_delayed, Stream};
use dlog_unify::{match_pattern, unify};

fn job(who: &str, title: &str) -> Term {
    Term::list(vec![Term::symbol("job"), Term::symbol(who), Term::symbol(title)])
}

#[test]
fn match_soundness_instantiated_pattern_equals_datum() {
    let pattern = Term::list(vec![Term::symbol("job"), Term::var("who"), Term::symbol("wizard")]);
    let datum = job("Ben", "wizard");
    let frame = match_pattern(&pattern, &datum, Frame::empty());
    assert!(!frame.is_failed());
    assert_eq!(instantiate_for_display(&pattern, &frame), datum);
}

#[test]
fn unify_symmetry_same_failure_and_same_instantiation() {
    let cases: Vec<(Term, Term)> = vec![
        (Term::var("x"), Term::symbol("a")),
        (
            Term::list(vec![Term::symbol("job"), Term::var("who"), Term::symbol("wizard")]),
            job("Ben", "wizard"),
        ),
        (Term::symbol("a"), Term::symbol("b")),
        (
            Term::list(vec![Term::symbol("f"), Term::var("x")]),
            Term::list(vec![Term::symbol("f"), Term::symbol("a")]),
        ),
    ];

    for (p1, p2) in cases {
        let forward = unify(&p1, &p2, Frame::empty());
        let backward = unify(&p2, &p1, Frame::empty());
        assert_eq!(
            forward.is_failed(),
            backward.is_failed(),
            "unify({:?},{:?}) and its reverse disagreed on success",
            p1,
            p2
        );
        if !forward.is_failed() {
            assert_eq!(
                instantiate_for_display(&p1, &forward),
                instantiate_for_display(&p1, &backward),
            );
            assert_eq!(
                instantiate_for_display(&p2, &forward),
                instantiate_for_display(&p2, &backward),
            );
        }
    }
}

#[test]
fn unify_idempotence_reapplying_changes_nothing() {
    let p1 = Term::var("x");
    let p2 = Term::list(vec![Term::symbol("f"), Term::symbol("a"), Term::var("y")]);
    let once = unify(&p1, &p2, Frame::empty());
    assert!(!once.is_failed());
    let twice = unify(&p1, &p2, once.clone());
    assert_eq!(
        instantiate_for_display(&p1, &once),
        instantiate_for_display(&p1, &twice)
    );
    assert_eq!(
        instantiate_for_display(&p2, &once),
        instantiate_for_display(&p2, &twice)
    );
}

#[test]
fn occurs_check_rejects_a_variable_bound_to_a_pair_containing_itself() {
    let x = Term::var("x");
    let fx = Term::list(vec![Term::symbol("f"), Term::var("x")]);
    assert!(unify(&x, &fx, Frame::empty()).is_failed());

    // Through a binding chain: ?x = ?y, then ?y = f(?x).
    let chained = unify(&Term::var("x"), &Term::var("y"), Frame::empty());
    assert!(unify(&Term::var("y"), &fx, chained).is_failed());
}

#[test]
fn alpha_hygiene_two_renamings_of_the_same_rule_never_share_a_variable() {
    // Mirrors dlog-engine::rename's renaming discipline directly: two
    // applications draw distinct generation ids and so never collide.
    let conclusion = Term::list(vec![Term::symbol("ancestor"), Term::var("x"), Term::var("y")]);

    fn rename(term: &Term, generation: u64) -> Term {
        match term {
            Term::Constant(_) => term.clone(),
            Term::Variable(v) => Term::Variable(v.renamed(generation)),
            Term::Pair(h, t) => Term::cons(rename(h, generation), rename(t, generation)),
        }
    }

    let first = rename(&conclusion, 1);
    let second = rename(&conclusion, 2);
    assert_ne!(first, second);

    let first_x = first.list_iter().nth(1).unwrap().as_variable().copied().unwrap();
    let second_x = second.list_iter().nth(1).unwrap().as_variable().copied().unwrap();
    assert_ne!(first_x, second_x);
}

#[test]
fn interleave_fairness_splits_any_prefix_within_one() {
    fn repeat_forever(value: char) -> Stream<char> {
        Stream::cons(value, move || repeat_forever(value))
    }

    let a = repeat_forever('a');
    let b = repeat_forever('b');
    let merged = interleave_delayed(a, Rc::new(move || b.clone()));

    for n in [1usize, 2, 5, 11, 20] {
        let taken = merged.take(n);
        let a_count = taken.iter().filter(|&&c| c == 'a').count();
        let b_count = taken.iter().filter(|&&c| c == 'b').count();
        assert_eq!(a_count, (n + 1) / 2, "prefix length {n}");
        assert_eq!(b_count, n / 2, "prefix length {n}");
    }
}

#[test]
fn round_trip_display_for_a_user_variable() {
    let surface = Term::symbol("?x");
    let processed = query_syntax_process(&surface);
    let var = processed.as_variable().copied().unwrap();
    assert_eq!(var, Variable::user("x"));
    assert_eq!(dlog_ir::contract_question_mark(&var), surface);
}

#[test]
fn round_trip_display_for_a_rule_generated_variable() {
    let var = Variable::user("z").renamed(7);
    let surface = dlog_ir::contract_question_mark(&var);
    assert_eq!(surface, Term::symbol("?z-7"));
}
