//! Error types for the compiler driver.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing an `msl.toml` manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required field '{field}' in {path}")]
    MissingField { path: PathBuf, field: &'static str },
}

/// Errors that can occur when compiling files or directories.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory {path}: {source}")]
    WalkDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("{path}:\n{rendered}")]
    Translate { path: PathBuf, rendered: String },

    #[error("{path} is not an .msl file or directory")]
    UnsupportedInput { path: PathBuf },
}
