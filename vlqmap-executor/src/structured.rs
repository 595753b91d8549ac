//! In-process decoder backend.

use crate::decoder::Decoder;
use vlqmap_core::error::Result;
use vlqmap_core::{Delegate, decode_mappings};

/// Runs the segment state machine directly over the input bytes and calls
/// the delegate as ordinary methods.
#[derive(Debug, Clone)]
pub struct StructuredDecoder<D> {
    delegate: D,
}

impl<D: Delegate> StructuredDecoder<D> {
    /// Bind a new decoder to `delegate`.
    pub fn new(delegate: D) -> Self {
        Self { delegate }
    }

    /// Unbind and return the delegate.
    pub fn into_delegate(self) -> D {
        self.delegate
    }
}

impl<D: Delegate> Decoder<D> for StructuredDecoder<D> {
    fn decode(&mut self, mappings: &str) -> Result<()> {
        decode_mappings(mappings.as_bytes(), &mut self.delegate);
        Ok(())
    }

    fn delegate(&self) -> &D {
        &self.delegate
    }

    fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    fn backend(&self) -> &'static str {
        "structured"
    }
}
