//! Possibly-infinite lazy sequences with delayed tails.
//!
//! A `Stream<T>` is a persistent cons-list: `Rc`-shared, so cloning it is a
//! refcount bump regardless of how much of the spine has already been
//! forced. Each tail is a thunk that is forced *at most once* and then
//! memoized in place (`Thunk::Forced`): `or` and `flatmap` both need to
//! read the same input stream from more than one independent consumer, and
//! a shared, memoized cell is what makes that correct and affordable in a
//! language without implicit aliasing.

use std::cell::RefCell;
use std::rc::Rc;

enum Thunk<T> {
    Pending(Box<dyn FnOnce() -> Stream<T>>),
    Forced(Stream<T>),
    /// Placeholder installed only while a `Pending` thunk is being forced,
    /// so a thunk that (incorrectly) forces itself fails loudly instead of
    /// recursing forever.
    InProgress,
}

enum Node<T> {
    Empty,
    Cons(T, RefCell<Thunk<T>>),
}

/// A lazy, shared, memoized frame (or assertion, or rule) stream.
pub struct Stream<T>(Rc<Node<T>>);

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Stream(self.0.clone())
    }
}

/// A reusable "delayed" producer: `Rc<dyn Fn() -> Stream<T>>` rather than a
/// plain closure, since the compound-form handlers in `dlog-engine` (`or`
/// especially) need to hand the same delayed tail to more than one
/// recursive call.
pub type Delayed<T> = Rc<dyn Fn() -> Stream<T>>;

impl<T> Stream<T> {
    pub fn empty() -> Stream<T> {
        Stream(Rc::new(Node::Empty))
    }

    pub fn cons(head: T, tail: impl FnOnce() -> Stream<T> + 'static) -> Stream<T> {
        Stream(Rc::new(Node::Cons(
            head,
            RefCell::new(Thunk::Pending(Box::new(tail))),
        )))
    }

    pub fn singleton(head: T) -> Stream<T> {
        Stream::cons(head, Stream::empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(&*self.0, Node::Empty)
    }

    /// `car`: the first element, if any.
    pub fn head(&self) -> Option<&T> {
        match &*self.0 {
            Node::Empty => None,
            Node::Cons(h, _) => Some(h),
        }
    }

    /// `cdr`: forces (and memoizes) the tail, returning the resulting
    /// stream. Forcing an already-forced tail just clones the cached
    /// result.
    pub fn tail(&self) -> Stream<T> {
        match &*self.0 {
            Node::Empty => Stream::empty(),
            Node::Cons(_, thunk) => {
                {
                    let slot = thunk.borrow();
                    if let Thunk::Forced(s) = &*slot {
                        return s.clone();
                    }
                }
                let mut slot = thunk.borrow_mut();
                let pending = std::mem::replace(&mut *slot, Thunk::InProgress);
                let forced = match pending {
                    Thunk::Pending(f) => f(),
                    Thunk::InProgress => panic!("stream tail forced itself while forcing"),
                    Thunk::Forced(s) => s,
                };
                *slot = Thunk::Forced(forced.clone());
                forced
            }
        }
    }
}

impl<T: Clone + 'static> Stream<T> {
    /// Eagerly collects up to `limit` elements. Intended for tests and
    /// debugging only — forcing an infinite stream without a limit will not
    /// terminate, which is exactly the laziness this type exists to permit.
    pub fn take(&self, limit: usize) -> Vec<T> {
        let mut out = Vec::new();
        let mut cursor = self.clone();
        while out.len() < limit {
            match cursor.head() {
                Some(h) => {
                    out.push(h.clone());
                    cursor = cursor.tail();
                }
                None => break,
            }
        }
        out
    }
}

/// Lazy, element-wise transformation.
pub fn map<T, U>(s: Stream<T>, f: Rc<dyn Fn(T) -> U>) -> Stream<U>
where
    T: Clone + 'static,
    U: 'static,
{
    if s.is_empty() {
        return Stream::empty();
    }
    let head = s.head().unwrap().clone();
    let mapped_head = f(head);
    let rest = s.tail();
    let f2 = f.clone();
    Stream::cons(mapped_head, move || map(rest, f2))
}

/// Concatenation: when `s1` exhausts, forces `delayed_s2`. Not fair — later
/// alternatives in `delayed_s2` never run until `s1` (which may be
/// infinite) is fully drained. See `interleave_delayed` for the fair
/// variant `flatmap` requires.
pub fn append_delayed<T>(s1: Stream<T>, delayed_s2: Delayed<T>) -> Stream<T>
where
    T: Clone + 'static,
{
    if s1.is_empty() {
        return delayed_s2();
    }
    let head = s1.head().unwrap().clone();
    let rest = s1.tail();
    Stream::cons(head, move || append_delayed(rest, delayed_s2))
}

/// Fair merge: emits `s1`'s head, then swaps roles so `delayed_s2` and the
/// remainder of `s1` take turns. If `s1` is empty, forces `delayed_s2`
/// immediately (there is nothing to interleave with yet).
pub fn interleave_delayed<T>(s1: Stream<T>, delayed_s2: Delayed<T>) -> Stream<T>
where
    T: Clone + 'static,
{
    if s1.is_empty() {
        return delayed_s2();
    }
    let head = s1.head().unwrap().clone();
    let rest = s1.tail();
    Stream::cons(head, move || {
        let s2 = delayed_s2();
        let delayed_rest: Delayed<T> = Rc::new(move || rest.clone());
        interleave_delayed(s2, delayed_rest)
    })
}

/// Interleaves a stream of streams, matching `flatmap`'s requirement that
/// inner streams be merged fairly rather than concatenated.
pub fn flatten<T>(ss: Stream<Stream<T>>) -> Stream<T>
where
    T: Clone + 'static,
{
    if ss.is_empty() {
        return Stream::empty();
    }
    let first = ss.head().unwrap().clone();
    let rest = ss.tail();
    let delayed: Delayed<T> = Rc::new(move || flatten(rest.clone()));
    interleave_delayed(first, delayed)
}

/// `flatmap(f, s) = flatten(map(f, s))`, interleaved rather than appended.
pub fn flatmap<T, U>(s: Stream<T>, f: Rc<dyn Fn(T) -> Stream<U>>) -> Stream<U>
where
    T: Clone + 'static,
    U: Clone + 'static,
{
    flatten(map(s, f))
}

/// Builds a (finite) stream from a vector, lazily, without allocating all
/// the intermediate `Stream` nodes up front.
pub fn from_vec<T: Clone + 'static>(items: Rc<Vec<T>>) -> Stream<T> {
    from_vec_from(items, 0)
}

fn from_vec_from<T: Clone + 'static>(items: Rc<Vec<T>>, index: usize) -> Stream<T> {
    match items.get(index) {
        None => Stream::empty(),
        Some(item) => {
            let item = item.clone();
            Stream::cons(item, move || from_vec_from(items, index + 1))
        }
    }
}
