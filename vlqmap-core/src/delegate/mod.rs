//! Result consumers for decode benchmarks.
//!
//! A delegate is an [`Emitter`] that can also be reset between passes and
//! checked against the fixture it was configured for. Two are provided:
//!
//! - [`CountDelegate`] counts lines and ignores segments, isolating decode
//!   throughput from result handling.
//! - [`MappingDelegate`] stores every segment, measuring the cost of
//!   materializing the full result.
//!
//! [`AnyDelegate`] selects one of them at runtime from a [`DelegateKind`].

mod count;
mod kind;
mod mapping;

pub use count::CountDelegate;
pub use kind::{AnyDelegate, DelegateKind};
pub use mapping::MappingDelegate;

use crate::emit::Emitter;
use crate::error::Result;

/// Line count of the reference `scala.js.map` benchmark fixture.
pub const SCALA_JS_LINE_COUNT: usize = 379_201;

/// An emitter with benchmark lifecycle hooks.
pub trait Delegate: Emitter {
    /// Forget everything seen so far.
    fn reset(&mut self);

    /// Check that the last decode produced the expected number of lines.
    ///
    /// This is a fixture assertion, not a property of the decoder.
    fn validate(&self) -> Result<()>;

    /// Number of lines seen since the last reset (at least 1).
    fn line_count(&self) -> usize;
}
