use std::rc::Rc;

use crate::term::{Term, Variable};

/// A single variable binding.
#[derive(Clone, Debug)]
pub struct Binding {
    pub var: Variable,
    pub value: Term,
}

enum FrameNode {
    Empty,
    Failed,
    Extended(Binding, Frame),
}

/// An ordered sequence of bindings, shared by reference so that extending a
/// frame is O(1) and branching (as every candidate match does) is a cheap
/// `Rc` clone rather than a copy of the whole chain.
///
/// `Frame::failed()` is the distinguished `FAILED` sentinel: every
/// operation defined on frames treats it as absorbing.
#[derive(Clone, Debug)]
pub struct Frame(Rc<FrameNode>);

impl Frame {
    pub fn empty() -> Frame {
        Frame(Rc::new(FrameNode::Empty))
    }

    pub fn failed() -> Frame {
        Frame(Rc::new(FrameNode::Failed))
    }

    pub fn is_failed(&self) -> bool {
        matches!(&*self.0, FrameNode::Failed)
    }

    /// Prepends a binding. The caller is responsible for having already
    /// established that the extension is consistent; `extend` itself
    /// performs no check.
    pub fn extend(&self, var: Variable, value: Term) -> Frame {
        if self.is_failed() {
            return self.clone();
        }
        Frame(Rc::new(FrameNode::Extended(
            Binding { var, value },
            self.clone(),
        )))
    }

    /// Linear scan for the first binding whose variable matches `var` by
    /// identity (i.e. by `Variable` equality: same name, same generation).
    pub fn lookup(&self, var: &Variable) -> Option<&Term> {
        let mut cursor = self;
        loop {
            match &*cursor.0 {
                FrameNode::Empty | FrameNode::Failed => return None,
                FrameNode::Extended(binding, rest) => {
                    if &binding.var == var {
                        return Some(&binding.value);
                    }
                    cursor = rest;
                }
            }
        }
    }

    /// Walks a chain of variable-to-variable bindings to the final bound
    /// value, or returns `None` if `var` is unbound. Does not look inside
    /// pairs: only follows binding chains.
    pub fn resolve(&self, var: &Variable) -> Option<&Term> {
        let mut current = self.lookup(var)?;
        loop {
            match current.as_variable() {
                Some(inner) => match self.lookup(inner) {
                    Some(next) => current = next,
                    None => return Some(current),
                },
                None => return Some(current),
            }
        }
    }
}
