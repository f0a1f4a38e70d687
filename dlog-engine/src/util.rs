use std::rc::Rc;

use dlog_ir::Frame;
use dlog_stream::Stream;

use crate::{FrameResult, FrameStream};

/// `flatmap` over a frame stream whose elements already carry a possible
/// fatal error: an `Err` frame is passed through as a singleton without
/// calling `f`, so a fatal error surfaced deep in one branch still reaches
/// the driver instead of being silently swallowed by further evaluation.
pub(crate) fn flat_eval(s: FrameStream, f: Rc<dyn Fn(Frame) -> FrameStream>) -> FrameStream {
    dlog_stream::flatmap(
        s,
        Rc::new(move |r: FrameResult| match r {
            Ok(frame) => f(frame),
            Err(e) => Stream::singleton(Err(e)),
        }),
    )
}
