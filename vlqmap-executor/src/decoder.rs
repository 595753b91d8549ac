//! The decoder interface shared by both backends.

use vlqmap_core::Delegate;
use vlqmap_core::error::Result;

/// A decoder bound to a delegate.
///
/// Every call to [`decode`](Decoder::decode) reports the segments and line
/// breaks of one complete `mappings` string to the bound delegate. The
/// delegate is owned by the decoder and reachable between passes for
/// resetting and validation.
///
/// Decoders are reusable but not reentrant; `&mut self` serializes calls.
pub trait Decoder<D: Delegate> {
    /// Decode `mappings`, emitting into the bound delegate.
    ///
    /// Malformed input is never an error. Only the linear-memory backend can
    /// fail, and only for reasons outside the input: the arena limit or a
    /// trap inside the compiled unit.
    fn decode(&mut self, mappings: &str) -> Result<()>;

    /// The bound delegate.
    fn delegate(&self) -> &D;

    /// The bound delegate, mutably.
    fn delegate_mut(&mut self) -> &mut D;

    /// Short backend name used in logs and sample labels.
    fn backend(&self) -> &'static str;
}

impl<D: Delegate, T: Decoder<D> + ?Sized> Decoder<D> for Box<T> {
    fn decode(&mut self, mappings: &str) -> Result<()> {
        (**self).decode(mappings)
    }

    fn delegate(&self) -> &D {
        (**self).delegate()
    }

    fn delegate_mut(&mut self) -> &mut D {
        (**self).delegate_mut()
    }

    fn backend(&self) -> &'static str {
        (**self).backend()
    }
}
