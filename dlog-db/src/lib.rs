//! Append-only assertion/rule database with a head-symbol index. Nothing
//! is ever removed: `assert_item` only ever grows
//! the two master registers and their index buckets.

mod rule;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dlog_ir::{Symbol, Term};
use rustc_hash::FxHashMap;
use tracing::debug;

pub use rule::Rule;

#[derive(thiserror::Error, Debug)]
pub enum DbError {
    #[error("rule has no conclusion: {0}")]
    MalformedRule(String),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum IndexKey {
    Symbol(Symbol),
    Wildcard,
}

/// The query database: two append-only registers (assertions and rules),
/// each with a head-symbol index alongside it so `qeval` rarely has to scan
/// every item in the database for every simple query.
pub struct Database {
    assertions: RefCell<Vec<Rc<Term>>>,
    rules: RefCell<Vec<Rc<Rule>>>,
    assertion_index: RefCell<FxHashMap<IndexKey, Vec<Rc<Term>>>>,
    rule_index: RefCell<FxHashMap<IndexKey, Vec<Rc<Rule>>>>,
    generation_counter: Cell<u64>,
}

impl Default for Database {
    fn default() -> Database {
        Database::new()
    }
}

impl Database {
    pub fn new() -> Database {
        Database {
            assertions: RefCell::new(Vec::new()),
            rules: RefCell::new(Vec::new()),
            assertion_index: RefCell::new(FxHashMap::default()),
            rule_index: RefCell::new(FxHashMap::default()),
            // Generation 0 is reserved for user-typed variables, so rule
            // applications start renaming at 1.
            generation_counter: Cell::new(1),
        }
    }

    /// Allocates a fresh generation id for one rule application's
    /// alpha-renaming pass.
    pub fn next_generation(&self) -> u64 {
        let next = self.generation_counter.get();
        self.generation_counter.set(next + 1);
        next
    }

    /// Adds one parsed top-level item to the database: a `(rule ...)` form
    /// becomes a rule, a variable-containing non-rule form becomes a rule
    /// with an `(always-true)` body, and anything else is a ground
    /// assertion.
    pub fn assert_item(&self, item: Term) -> Result<(), DbError> {
        if let Some(parsed) = try_parse_rule(&item)? {
            self.add_rule(parsed);
            return Ok(());
        }
        if contains_variable(&item) {
            debug!(item = %item, "non-ground assertion treated as an always-true rule");
            self.add_rule(Rule {
                conclusion: item,
                body: Rule::always_true_body(),
            });
            return Ok(());
        }
        self.add_assertion(item);
        Ok(())
    }

    fn add_assertion(&self, item: Term) {
        let item = Rc::new(item);
        let key = index_key_of(&item).unwrap_or(IndexKey::Wildcard);
        self.assertion_index
            .borrow_mut()
            .entry(key)
            .or_default()
            .push(item.clone());
        self.assertions.borrow_mut().push(item);
    }

    fn add_rule(&self, rule: Rule) {
        let rule = Rc::new(rule);
        let key = index_key_of(&rule.conclusion).unwrap_or(IndexKey::Wildcard);
        self.rule_index
            .borrow_mut()
            .entry(key)
            .or_default()
            .push(rule.clone());
        self.rules.borrow_mut().push(rule);
    }

    /// All stored assertions whose index bucket could possibly match
    /// `pattern`, most recently asserted first. When `pattern` is not
    /// indexable, falls back to every assertion ever made.
    pub fn assertions_matching(&self, pattern: &Term) -> dlog_stream::Stream<Rc<Term>> {
        if !use_index(pattern) {
            return reversed_stream(self.assertions.borrow().clone());
        }
        match index_key_of(pattern) {
            Some(IndexKey::Symbol(sym)) => {
                reversed_stream(self.bucket(&self.assertion_index, IndexKey::Symbol(sym)))
            }
            _ => reversed_stream(self.assertions.borrow().clone()),
        }
    }

    /// All stored rules whose conclusion could possibly match `pattern`:
    /// rules keyed to `pattern`'s head symbol, followed by wildcard-headed
    /// rules (those whose conclusion itself starts with a variable), most
    /// recently asserted first within each bucket.
    pub fn rules_matching(&self, pattern: &Term) -> dlog_stream::Stream<Rc<Rule>> {
        if !use_index(pattern) {
            return reversed_stream(self.rules.borrow().clone());
        }
        match index_key_of(pattern) {
            Some(IndexKey::Symbol(sym)) => {
                let keyed = reversed_stream(self.bucket(&self.rule_index, IndexKey::Symbol(sym)));
                let wildcard = self.bucket(&self.rule_index, IndexKey::Wildcard);
                dlog_stream::append_delayed(keyed, Rc::new(move || reversed_stream(wildcard.clone())))
            }
            _ => reversed_stream(self.rules.borrow().clone()),
        }
    }

    fn bucket<T: Clone>(
        &self,
        index: &RefCell<FxHashMap<IndexKey, Vec<T>>>,
        key: IndexKey,
    ) -> Vec<T> {
        index
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }
}

fn reversed_stream<T: Clone + 'static>(mut items: Vec<T>) -> dlog_stream::Stream<T> {
    items.reverse();
    dlog_stream::from_vec(Rc::new(items))
}

/// `true` if `pattern`'s head is a constant symbol, i.e. the index has a
/// precise bucket for it rather than needing the wildcard fallback.
pub fn use_index(pattern: &Term) -> bool {
    matches!(pattern.head(), Some(Term::Constant(dlog_ir::Constant::Symbol(_))))
}

/// `true` if `pattern`'s head is either a constant symbol (a precise index
/// key) or a variable (matches everything, so the wildcard bucket applies).
pub fn indexable(pattern: &Term) -> bool {
    match pattern.head() {
        None => false,
        Some(head) => matches!(head, Term::Constant(dlog_ir::Constant::Symbol(_)) | Term::Variable(_)),
    }
}

fn index_key_of(pattern: &Term) -> Option<IndexKey> {
    match pattern.head()? {
        Term::Constant(dlog_ir::Constant::Symbol(s)) => Some(IndexKey::Symbol(*s)),
        Term::Variable(_) => Some(IndexKey::Wildcard),
        _ => None,
    }
}

fn try_parse_rule(item: &Term) -> Result<Option<Rule>, DbError> {
    if item.head_symbol() != Some(Symbol::intern("rule")) {
        return Ok(None);
    }
    let mut parts = item.tail().map(|t| t.list_iter()).into_iter().flatten();
    let conclusion = parts
        .next()
        .cloned()
        .ok_or_else(|| DbError::MalformedRule("missing conclusion".to_string()))?;
    let body = parts.next().cloned().unwrap_or_else(Rule::always_true_body);
    Ok(Some(Rule { conclusion, body }))
}

fn contains_variable(term: &Term) -> bool {
    match term {
        Term::Variable(_) => true,
        Term::Constant(_) => false,
        Term::Pair(head, tail) => contains_variable(head) || contains_variable(tail),
    }
}
