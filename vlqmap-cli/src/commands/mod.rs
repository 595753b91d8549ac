//! CLI command implementations.

pub mod bench;
pub mod decode;
pub mod version;
