use std::fmt;
use std::rc::Rc;

use lasso::{Spur, ThreadedRodeo};
use once_cell::sync::Lazy;

/// Global symbol interner shared by every term in the process. Symbols are
/// small `Copy` keys (`lasso::Spur`) so cloning a `Term` never touches the
/// interner.
static INTERNER: Lazy<ThreadedRodeo> = Lazy::new(ThreadedRodeo::new);

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(Spur);

impl Symbol {
    pub fn intern(text: &str) -> Symbol {
        Symbol(INTERNER.get_or_intern(text))
    }

    pub fn resolve(self) -> &'static str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve())
    }
}

/// A scalar leaf value. Symbols and numbers are the two forms that appear in
/// most knowledge bases; strings and booleans round out what a host
/// predicate might want to hand back.
#[derive(Clone, Debug, PartialEq)]
pub enum Constant {
    Symbol(Symbol),
    Number(i64),
    Str(Rc<str>),
    Bool(bool),
    /// The empty-list terminator that closes a right-nested `Pair` chain.
    Nil,
}

impl Constant {
    pub fn symbol(text: &str) -> Constant {
        Constant::Symbol(Symbol::intern(text))
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Symbol(s) => write!(f, "{}", s),
            Constant::Number(n) => write!(f, "{}", n),
            Constant::Str(s) => write!(f, "{:?}", s),
            Constant::Bool(b) => write!(f, "{}", b),
            Constant::Nil => write!(f, "()"),
        }
    }
}

/// A variable's identity is its user-visible name plus the generation id of
/// the rule application that (re)created it. User-typed variables carry
/// generation `0`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Variable {
    pub name: Symbol,
    pub generation: u64,
}

impl Variable {
    pub fn user(name: &str) -> Variable {
        Variable {
            name: Symbol::intern(name),
            generation: 0,
        }
    }

    pub fn renamed(self, generation: u64) -> Variable {
        Variable {
            name: self.name,
            generation,
        }
    }
}

/// The term model: constants, variables, and ordered pairs. Compound terms
/// are right-nested pairs terminated by `Constant::Nil`, i.e. ordinary lists.
///
/// `Variable` is a first-class tagged variant here rather than the
/// `(? name)`/`(? gen name)` pair that surface syntax uses: that pair shape
/// is the *surface* convention produced and consumed at the text boundary
/// (see `dlog-ir::surface` and the reader in `dlog-repl`), not the
/// in-memory representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    Constant(Constant),
    Variable(Variable),
    Pair(Rc<Term>, Rc<Term>),
}

impl Term {
    pub fn symbol(text: &str) -> Term {
        Term::Constant(Constant::symbol(text))
    }

    pub fn number(n: i64) -> Term {
        Term::Constant(Constant::Number(n))
    }

    pub fn nil() -> Term {
        Term::Constant(Constant::Nil)
    }

    pub fn var(name: &str) -> Term {
        Term::Variable(Variable::user(name))
    }

    pub fn cons(head: Term, tail: Term) -> Term {
        Term::Pair(Rc::new(head), Rc::new(tail))
    }

    /// Builds a proper list `(a b c)` from its elements.
    pub fn list(items: Vec<Term>) -> Term {
        items
            .into_iter()
            .rev()
            .fold(Term::nil(), |tail, head| Term::cons(head, tail))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Term::Constant(Constant::Nil))
    }

    pub fn as_pair(&self) -> Option<(&Term, &Term)> {
        match self {
            Term::Pair(a, b) => Some((a, b)),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.as_variable().is_some()
    }

    /// The head of a list-shaped term, e.g. the `job` in `(job ?who ...)`.
    pub fn head(&self) -> Option<&Term> {
        self.as_pair().map(|(h, _)| h)
    }

    pub fn tail(&self) -> Option<&Term> {
        self.as_pair().map(|(_, t)| t)
    }

    /// The head constant symbol, if this term is a pair whose head is a
    /// bare symbol constant. Used throughout the database index.
    pub fn head_symbol(&self) -> Option<Symbol> {
        match self.head()? {
            Term::Constant(Constant::Symbol(s)) => Some(*s),
            _ => None,
        }
    }

    /// Iterates the elements of a proper list, stopping at the first
    /// non-pair (which is typically `Nil`, but need not be).
    pub fn list_iter(&self) -> ListIter<'_> {
        ListIter { cursor: Some(self) }
    }
}

pub struct ListIter<'a> {
    cursor: Option<&'a Term>,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<&'a Term> {
        let (head, tail) = self.cursor?.as_pair()?;
        self.cursor = Some(tail);
        Some(head)
    }
}
