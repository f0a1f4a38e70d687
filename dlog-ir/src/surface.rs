//! The surface `?x` convention: a preprocessor that rewrites every atom
//! whose printed form begins with `?` into the internal variable form
//! before a query reaches the evaluator, and a reverse transform
//! (`contract-question-mark`) used when printing results. Reading raw text
//! into a `Term` tree of bare symbols is the surface-syntax tokenizer,
//! which lives outside the core entirely; these two functions are the
//! narrow interface the core exposes at that boundary.

use std::fmt;

use crate::term::{Constant, Symbol, Term, Variable};

/// Rewrites every symbol atom beginning with `?` into a `Term::Variable`,
/// walking pairs structurally. Non-symbol atoms (numbers, strings, `Nil`,
/// booleans) are left unchanged, as are symbols not starting with `?`.
pub fn query_syntax_process(term: &Term) -> Term {
    match term {
        Term::Constant(Constant::Symbol(sym)) => {
            let text = sym.resolve();
            match text.strip_prefix('?') {
                Some(name) if !name.is_empty() => Term::Variable(Variable::user(name)),
                _ => term.clone(),
            }
        }
        Term::Constant(_) => term.clone(),
        Term::Variable(_) => term.clone(),
        Term::Pair(head, tail) => Term::cons(
            query_syntax_process(head),
            query_syntax_process(tail),
        ),
    }
}

/// The reverse of the atom-rewriting half of `query_syntax_process`: turns a
/// variable back into its printable surface symbol, `?name` for a
/// user-entered variable (generation 0) or `?name-N` for a rule-generated
/// one with generation `N`.
pub fn contract_question_mark(var: &Variable) -> Term {
    let text = if var.generation == 0 {
        format!("?{}", var.name)
    } else {
        format!("?{}-{}", var.name, var.generation)
    };
    Term::Constant(Constant::Symbol(Symbol::intern(&text)))
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(c) => write!(f, "{}", c),
            Term::Variable(var) => write!(f, "{}", contract_question_mark(var)),
            Term::Pair(_, _) => {
                write!(f, "(")?;
                let mut cursor = self;
                let mut first = true;
                loop {
                    match cursor {
                        Term::Pair(head, tail) => {
                            if !first {
                                write!(f, " ")?;
                            }
                            first = false;
                            write!(f, "{}", head)?;
                            cursor = tail;
                        }
                        Term::Constant(Constant::Nil) => break,
                        other => {
                            write!(f, " . {}", other)?;
                            break;
                        }
                    }
                }
                write!(f, ")")
            }
        }
    }
}
