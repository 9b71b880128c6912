//! File and directory compilation.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::Compiler;
use crate::error::CompileError;

/// File extension recognized as MSL source.
pub const SOURCE_EXTENSION: &str = "msl";

/// File extension of generated scripts.
pub const OUTPUT_EXTENSION: &str = "sqf";

/// Compile one `.msl` file.
///
/// The output lands at `output` if given, otherwise next to the input with
/// an `.sqf` extension. Returns the path written.
pub fn compile_file(
    compiler: &Compiler,
    input: &Path,
    output: Option<&Path>,
) -> Result<PathBuf, CompileError> {
    let source = fs::read_to_string(input).map_err(|e| CompileError::Read {
        path: input.to_owned(),
        source: e,
    })?;

    let compiled = compiler.compile_source(input, &source)?;

    let out_path = match output {
        Some(path) => path.to_owned(),
        None => input.with_extension(OUTPUT_EXTENSION),
    };

    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| CompileError::Write {
            path: out_path.clone(),
            source: e,
        })?;
    }

    fs::write(&out_path, compiled).map_err(|e| CompileError::Write {
        path: out_path.clone(),
        source: e,
    })?;

    Ok(out_path)
}

/// Recursively compile every `.msl` file under `input_dir`.
///
/// With an `output_dir`, the directory structure is mirrored there;
/// otherwise each output lands next to its source. Paths containing any of
/// the `exclude` substrings are skipped. Returns the paths written.
pub fn compile_dir(
    compiler: &Compiler,
    input_dir: &Path,
    output_dir: Option<&Path>,
    exclude: &[String],
) -> Result<Vec<PathBuf>, CompileError> {
    let mut written = Vec::new();

    for entry in WalkDir::new(input_dir) {
        let entry = entry.map_err(|e| CompileError::WalkDir {
            path: input_dir.to_owned(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }

        // Use forward slashes for exclude matching on all platforms
        let rel = entry
            .path()
            .strip_prefix(input_dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        if exclude.iter().any(|pattern| rel.contains(pattern.as_str())) {
            continue;
        }

        let out_path = output_dir.map(|dir| {
            dir.join(Path::new(&rel).with_extension(OUTPUT_EXTENSION))
        });

        written.push(compile_file(compiler, entry.path(), out_path.as_deref())?);
    }

    Ok(written)
}
