//! vlqmap core library
//!
//! Decoding of the `mappings` field of a source map (revision 3) into a
//! stream of segment and line-break events.
//!
//! # Key Components
//!
//! - **VLQ**: Base64-VLQ scalar decoding over a byte cursor
//! - **Segment**: the state machine that turns scalars into segments and lines
//! - **Emitter**: the callback trait results are delivered through
//! - **Delegates**: counting and materializing consumers used by the bench
//!
//! Decoding trusts its input. Bytes outside the Base64 alphabet read as zero
//! and partial segments of two or three fields are dropped silently; neither
//! raises an error.
//!
//! # Example
//!
//! ```
//! use vlqmap_core::prelude::*;
//!
//! let mut delegate = MappingDelegate::new(2);
//! decode_mappings(b"AAAA,CAAA;AAAA", &mut delegate);
//!
//! assert_eq!(delegate.lines().len(), 2);
//! assert_eq!(delegate.lines()[0][1].column, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod delegate;
pub mod emit;
pub mod error;
pub mod prelude;
pub mod segment;
pub mod vlq;

pub use delegate::{AnyDelegate, CountDelegate, Delegate, DelegateKind, MappingDelegate};
pub use emit::Emitter;
pub use error::{Result, VlqmapError};
pub use segment::{Segment, decode_mappings};
