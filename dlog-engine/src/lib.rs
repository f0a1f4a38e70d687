//! The query evaluator: dispatch, the compound-form handlers, simple-query
//! evaluation, and rule application with alpha-renaming. Built on the lazy
//! streams of `dlog-stream`, the match/unify primitives of `dlog-unify`,
//! and the indexed store of `dlog-db`.

mod error;
mod eval;
mod forms;
mod predicate;
mod rename;
mod simple_query;
mod util;

pub use error::EvalError;
pub use eval::qeval;
pub use predicate::PredicateRegistry;

use dlog_ir::Frame;

/// One output element of a query evaluation: either a successfully extended
/// frame, or a fatal error that ends further exploration of whatever branch
/// produced it.
pub type FrameResult = Result<Frame, EvalError>;

/// A lazy, possibly-infinite sequence of `FrameResult`s — the currency every
/// form handler and `simple_query` passes around.
pub type FrameStream = dlog_stream::Stream<FrameResult>;

/// The frame stream every top-level query evaluation starts from: a single
/// empty frame entering the dispatcher.
pub fn initial_stream() -> FrameStream {
    FrameStream::singleton(Ok(Frame::empty()))
}
