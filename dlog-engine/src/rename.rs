use dlog_ir::Term;

/// Rewrites every variable in `term` to carry `generation`, giving one rule
/// application its own fresh variable identities. This is a pure structural
/// rewrite — it has nothing to do with any particular frame's bindings.
pub(crate) fn rename_term(term: &Term, generation: u64) -> Term {
    match term {
        Term::Constant(_) => term.clone(),
        Term::Variable(v) => Term::Variable(v.renamed(generation)),
        Term::Pair(head, tail) => Term::cons(rename_term(head, generation), rename_term(tail, generation)),
    }
}
