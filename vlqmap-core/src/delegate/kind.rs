//! Runtime delegate selection.

use super::{CountDelegate, Delegate, MappingDelegate};
use crate::emit::Emitter;
use crate::error::{Result, VlqmapError};
use std::fmt;
use std::str::FromStr;

/// Which delegate a benchmark run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegateKind {
    /// [`CountDelegate`].
    Count,
    /// [`MappingDelegate`].
    Mapping,
}

impl DelegateKind {
    /// The name used on the command line and in sample labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for DelegateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DelegateKind {
    type Err = VlqmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "count" => Ok(Self::Count),
            "mapping" => Ok(Self::Mapping),
            other => Err(VlqmapError::UnknownDelegateKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// One of the built-in delegates, chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyDelegate {
    /// Line counter.
    Count(CountDelegate),
    /// Segment recorder.
    Mapping(MappingDelegate),
}

impl AnyDelegate {
    /// Build the delegate for `kind`, expecting `expected_lines` lines.
    pub fn new(kind: DelegateKind, expected_lines: usize) -> Self {
        match kind {
            DelegateKind::Count => Self::Count(CountDelegate::new(expected_lines)),
            DelegateKind::Mapping => Self::Mapping(MappingDelegate::new(expected_lines)),
        }
    }

    /// The kind this delegate was built from.
    pub fn kind(&self) -> DelegateKind {
        match self {
            Self::Count(_) => DelegateKind::Count,
            Self::Mapping(_) => DelegateKind::Mapping,
        }
    }

    /// The recorded segments, if this is a [`MappingDelegate`].
    pub fn as_mapping(&self) -> Option<&MappingDelegate> {
        match self {
            Self::Mapping(delegate) => Some(delegate),
            Self::Count(_) => None,
        }
    }
}

impl Emitter for AnyDelegate {
    #[inline]
    fn emit_mapping1(&mut self, column: i32) {
        match self {
            Self::Count(d) => d.emit_mapping1(column),
            Self::Mapping(d) => d.emit_mapping1(column),
        }
    }

    #[inline]
    fn emit_mapping4(&mut self, column: i32, source: i32, source_line: i32, source_column: i32) {
        match self {
            Self::Count(d) => d.emit_mapping4(column, source, source_line, source_column),
            Self::Mapping(d) => d.emit_mapping4(column, source, source_line, source_column),
        }
    }

    #[inline]
    fn emit_mapping5(
        &mut self,
        column: i32,
        source: i32,
        source_line: i32,
        source_column: i32,
        name: i32,
    ) {
        match self {
            Self::Count(d) => d.emit_mapping5(column, source, source_line, source_column, name),
            Self::Mapping(d) => d.emit_mapping5(column, source, source_line, source_column, name),
        }
    }

    #[inline]
    fn emit_newline(&mut self) {
        match self {
            Self::Count(d) => d.emit_newline(),
            Self::Mapping(d) => d.emit_newline(),
        }
    }
}

impl Delegate for AnyDelegate {
    fn reset(&mut self) {
        match self {
            Self::Count(d) => d.reset(),
            Self::Mapping(d) => d.reset(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Self::Count(d) => d.validate(),
            Self::Mapping(d) => d.validate(),
        }
    }

    fn line_count(&self) -> usize {
        match self {
            Self::Count(d) => d.line_count(),
            Self::Mapping(d) => d.line_count(),
        }
    }
}
