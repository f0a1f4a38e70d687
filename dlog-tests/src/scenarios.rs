//! Six worked end-to-end scenarios, each run against a fresh `Database` and
//! the real evaluator — no mocking of `qeval` or the database layer
//! underneath.

use std::rc::Rc;

use dlog_db::Database;
use dlog_ir::{Term, Variable};

use crate::support::{fact, rule, run, run_with, LessThan};

fn salary(who: &str, amount: i64) -> Term {
    Term::list(vec![Term::symbol("salary"), Term::symbol(who), Term::number(amount)])
}

#[test]
fn scenario_1_fact_lookup() {
    let db = Rc::new(Database::new());
    db.assert_item(Term::list(vec![
        Term::symbol("job"),
        Term::list(vec![Term::symbol("Bitdiddle"), Term::symbol("Ben")]),
        Term::list(vec![Term::symbol("computer"), Term::symbol("wizard")]),
    ]))
    .unwrap();

    let query = Term::list(vec![
        Term::symbol("job"),
        Term::var("who"),
        Term::list(vec![Term::symbol("computer"), Term::symbol("wizard")]),
    ]);
    let results = run(&db, query, 10);
    assert_eq!(results.len(), 1);
    let frame = results[0].as_ref().unwrap();
    assert_eq!(
        frame.lookup(&Variable::user("who")).cloned(),
        Some(Term::list(vec![Term::symbol("Bitdiddle"), Term::symbol("Ben")]))
    );
}

#[test]
fn scenario_2_conjunction_over_two_clerks() {
    let db = Rc::new(Database::new());
    db.assert_item(fact(&["job", "A", "clerk"])).unwrap();
    db.assert_item(fact(&["job", "B", "clerk"])).unwrap();
    db.assert_item(salary("A", 40)).unwrap();
    db.assert_item(salary("B", 50)).unwrap();

    let query = Term::list(vec![
        Term::symbol("and"),
        Term::list(vec![Term::symbol("job"), Term::var("p"), Term::symbol("clerk")]),
        Term::list(vec![Term::symbol("salary"), Term::var("p"), Term::var("s")]),
    ]);
    let results = run(&db, query, 10);
    assert_eq!(results.len(), 2);

    let pairs: Vec<(Term, Term)> = results
        .into_iter()
        .map(|r| {
            let frame = r.unwrap();
            (
                frame.lookup(&Variable::user("p")).cloned().unwrap(),
                frame.lookup(&Variable::user("s")).cloned().unwrap(),
            )
        })
        .collect();
    // LIFO add order: B was asserted most recently, so it surfaces first.
    assert_eq!(pairs[0], (Term::symbol("B"), Term::number(50)));
    assert_eq!(pairs[1], (Term::symbol("A"), Term::number(40)));
}

#[test]
fn scenario_3_disjunction_interleaves_both_branches() {
    let db = Rc::new(Database::new());
    // Disjoint value domains (a's are negative, b's are positive) so each
    // result's origin disjunct can be read straight off its binding.
    for n in 1..=5 {
        db.assert_item(Term::list(vec![Term::symbol("a"), Term::number(-n)]))
            .unwrap();
        db.assert_item(Term::list(vec![Term::symbol("b"), Term::number(n)]))
            .unwrap();
    }

    let query = Term::list(vec![
        Term::symbol("or"),
        Term::list(vec![Term::symbol("a"), Term::var("x")]),
        Term::list(vec![Term::symbol("b"), Term::var("x")]),
    ]);
    let results = run(&db, query, 10);
    assert_eq!(results.len(), 10);

    let origins: Vec<bool> = results
        .iter()
        .map(|r| {
            let x = r.as_ref().unwrap().lookup(&Variable::user("x")).cloned().unwrap();
            matches!(x, Term::Constant(dlog_ir::Constant::Number(n)) if n < 0)
        })
        .collect();
    // Pure depth-first concatenation would yield five `a`-origins (true) in
    // a row before any `b`-origin; fair interleaving alternates instead.
    assert_eq!(origins, vec![true, false, true, false, true, false, true, false, true, false]);
}

#[test]
fn scenario_4_recursive_ancestor_rule_terminates() {
    let db = Rc::new(Database::new());
    db.assert_item(fact(&["parent", "A", "B"])).unwrap();
    db.assert_item(fact(&["parent", "B", "C"])).unwrap();
    db.assert_item(rule(
        Term::list(vec![Term::symbol("ancestor"), Term::var("x"), Term::var("y")]),
        Term::list(vec![Term::symbol("parent"), Term::var("x"), Term::var("y")]),
    ))
    .unwrap();
    db.assert_item(rule(
        Term::list(vec![Term::symbol("ancestor"), Term::var("x"), Term::var("y")]),
        Term::list(vec![
            Term::symbol("and"),
            Term::list(vec![Term::symbol("parent"), Term::var("x"), Term::var("z")]),
            Term::list(vec![Term::symbol("ancestor"), Term::var("z"), Term::var("y")]),
        ]),
    ))
    .unwrap();

    let query = Term::list(vec![Term::symbol("ancestor"), Term::symbol("A"), Term::var("w")]);
    let results = run(&db, query, 20);
    let names: Vec<Term> = results
        .into_iter()
        .map(|r| r.unwrap().lookup(&Variable::user("w")).cloned().unwrap())
        .collect();
    assert!(names.contains(&Term::symbol("B")));
    assert!(names.contains(&Term::symbol("C")));
}

#[test]
fn scenario_5_negation_as_failure_keeps_only_the_non_clerk() {
    let db = Rc::new(Database::new());
    db.assert_item(fact(&["job", "A", "clerk"])).unwrap();
    db.assert_item(fact(&["job", "B", "wizard"])).unwrap();
    db.assert_item(rule(
        Term::list(vec![Term::symbol("same"), Term::var("x"), Term::var("x")]),
        dlog_db::Rule::always_true_body(),
    ))
    .unwrap();

    let query = Term::list(vec![
        Term::symbol("and"),
        Term::list(vec![Term::symbol("job"), Term::var("p"), Term::var("j")]),
        Term::list(vec![
            Term::symbol("not"),
            Term::list(vec![Term::symbol("same"), Term::var("j"), Term::symbol("clerk")]),
        ]),
    ]);
    let results = run(&db, query, 10);
    assert_eq!(results.len(), 1);
    let frame = results[0].as_ref().unwrap();
    assert_eq!(frame.lookup(&Variable::user("p")).cloned(), Some(Term::symbol("B")));
    assert_eq!(frame.lookup(&Variable::user("j")).cloned(), Some(Term::symbol("wizard")));
}

#[test]
fn scenario_6_occurs_check_stops_a_rule_application_that_would_self_reference() {
    let db = Rc::new(Database::new());
    // (rule (twin ?x ?x))
    db.assert_item(rule(
        Term::list(vec![Term::symbol("twin"), Term::var("x"), Term::var("x")]),
        dlog_db::Rule::always_true_body(),
    ))
    .unwrap();

    // Querying (twin (f ?z) ?z) forces the rule's single variable to unify
    // with both (f ?z) and ?z: once ?x is bound to (f ?z), the second
    // occurrence tries to unify ?z against that binding, which contains ?z
    // itself. The occurs-check rejects it instead of building a cyclic frame.
    let query = Term::list(vec![
        Term::symbol("twin"),
        Term::list(vec![Term::symbol("f"), Term::var("z")]),
        Term::var("z"),
    ]);
    let results = run(&db, query, 25);
    assert!(results.is_empty());
}

#[test]
fn scenario_5_variant_exercises_lisp_value_alongside_negation() {
    let db = Rc::new(Database::new());
    db.assert_item(Term::list(vec![Term::symbol("amount"), Term::number(3)]))
        .unwrap();
    db.assert_item(Term::list(vec![Term::symbol("amount"), Term::number(30)]))
        .unwrap();

    let query = Term::list(vec![
        Term::symbol("and"),
        Term::list(vec![Term::symbol("amount"), Term::var("n")]),
        Term::list(vec![
            Term::symbol("lisp-value"),
            Term::symbol("<"),
            Term::var("n"),
            Term::number(10),
        ]),
    ]);
    let results = run_with(&db, Rc::new(LessThan), query, 10);
    assert_eq!(results.len(), 1);
    let frame = results[0].as_ref().unwrap();
    assert_eq!(frame.lookup(&Variable::user("n")).cloned(), Some(Term::number(3)));
}
