//! Convenient re-exports.

pub use crate::cursor::ByteCursor;
pub use crate::delegate::{
    AnyDelegate, CountDelegate, Delegate, DelegateKind, MappingDelegate, SCALA_JS_LINE_COUNT,
};
pub use crate::emit::Emitter;
pub use crate::error::{Result, VlqmapError};
pub use crate::segment::{RunningTotals, Segment, decode_mappings};
pub use crate::vlq::decode_vlq;
