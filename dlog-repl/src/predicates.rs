//! The built-in host-predicate registry the `lisp-value` form calls
//! through. `dlog-engine` itself only defines the narrow
//! `PredicateRegistry` trait as a named-predicate escape hatch, not
//! arbitrary code evaluation; this is the one concrete implementation the
//! driver ships (`<` to filter a salary comparison, plus the handful of
//! siblings any nontrivial knowledge base reaches for).

use dlog_ir::{Constant, Term};
use dlog_engine::{EvalError, PredicateRegistry};

/// A table of two-argument boolean predicates over numbers, plus a
/// structural equality/inequality pair that works on any term. Looks up the
/// predicate by name and applies it to the args verbatim: pure, and returns
/// a boolean-like value.
pub struct BuiltinPredicates;

impl PredicateRegistry for BuiltinPredicates {
    fn call(&self, name: &str, args: &[Term]) -> Result<bool, EvalError> {
        match name {
            "<" | ">" | "<=" | ">=" | "number-equal?" => numeric(name, args),
            "equal?" => structural(args),
            "not-equal?" => Ok(!structural(args)?),
            _ => Err(EvalError::PredicateError {
                name: name.to_string(),
                message: "no such predicate".to_string(),
            }),
        }
    }
}

fn numeric(name: &str, args: &[Term]) -> Result<bool, EvalError> {
    let [a, b] = two_numbers(name, args)?;
    Ok(match name {
        "<" => a < b,
        ">" => a > b,
        "<=" => a <= b,
        ">=" => a >= b,
        "number-equal?" => a == b,
        _ => unreachable!(),
    })
}

fn two_numbers(name: &str, args: &[Term]) -> Result<[i64; 2], EvalError> {
    match args {
        [Term::Constant(Constant::Number(a)), Term::Constant(Constant::Number(b))] => Ok([*a, *b]),
        _ => Err(EvalError::PredicateError {
            name: name.to_string(),
            message: format!("expected two numbers, got {:?}", args),
        }),
    }
}

fn structural(args: &[Term]) -> Result<bool, EvalError> {
    match args {
        [a, b] => Ok(a == b),
        _ => Err(EvalError::PredicateError {
            name: "equal?".to_string(),
            message: format!("expected two arguments, got {}", args.len()),
        }),
    }
}
