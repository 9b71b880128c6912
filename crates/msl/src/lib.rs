//! High-level compiler driver for MSL.
//!
//! This crate ties the pipeline together for callers that work with files
//! and directories rather than token streams:
//! - `Compiler` - configuration facade over the translation pipeline
//! - `driver` - single-file and recursive directory compilation
//! - `manifest` - `msl.toml` project configuration
//! - `error` - driver-level error types

mod compiler;
pub mod driver;
pub mod error;
pub mod manifest;

pub use compiler::Compiler;
pub use error::{CompileError, ManifestError};
pub use manifest::Manifest;
