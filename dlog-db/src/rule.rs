use dlog_ir::Term;

/// `(rule CONCLUSION BODY)`, or `(rule CONCLUSION)` with `BODY` defaulting
/// to `(always-true)`.
#[derive(Clone, Debug)]
pub struct Rule {
    pub conclusion: Term,
    pub body: Term,
}

impl Rule {
    pub fn always_true_body() -> Term {
        Term::list(vec![Term::symbol("always-true")])
    }
}
