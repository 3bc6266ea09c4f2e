//! Shared plumbing for the command-line binaries.

#[cfg(feature = "tracing")]
pub mod tracing;
