//! Project manifest (msl.toml) parsing.

use crate::error::ManifestError;
use serde::Deserialize;
use std::path::Path;

/// Manifest file name looked up in directory inputs.
pub const MANIFEST_NAME: &str = "msl.toml";

/// A parsed project manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    /// Project metadata.
    pub project: ProjectSection,

    /// Build configuration.
    #[serde(default)]
    pub build: BuildSection,
}

/// The `[project]` section of the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Project name (required).
    pub name: String,

    /// Project version (optional).
    #[serde(default)]
    pub version: Option<String>,
}

/// The `[build]` section of the manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildSection {
    /// Directory with the .msl sources, relative to the manifest.
    #[serde(default = "default_source")]
    pub source: String,

    /// Output directory, relative to the manifest. Defaults to compiling
    /// alongside the sources.
    #[serde(default)]
    pub output: Option<String>,

    /// Pretty-print the generated SQF.
    #[serde(default)]
    pub pretty: bool,

    /// Path substrings to skip while walking the source tree.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_source() -> String {
    ".".to_string()
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: None,
            pretty: false,
            exclude: Vec::new(),
        }
    }
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.to_owned(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse a manifest from a string.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let manifest: Manifest = toml::from_str(content).map_err(|e| ManifestError::Parse {
            path: path.to_owned(),
            source: e,
        })?;

        manifest.validate(path)?;
        Ok(manifest)
    }

    /// Validate the manifest has all required fields.
    fn validate(&self, path: &Path) -> Result<(), ManifestError> {
        if self.project.name.is_empty() {
            return Err(ManifestError::MissingField {
                path: path.to_owned(),
                field: "project.name",
            });
        }
        Ok(())
    }
}
