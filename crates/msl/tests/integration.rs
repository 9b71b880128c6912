//! Integration tests for file and directory compilation.

use std::fs;
use std::path::PathBuf;

use msl::{Compiler, CompileError, Manifest, driver};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Per-test scratch directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("msl_test_{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

#[test]
fn compile_single_file_to_explicit_output() {
    let out_dir = scratch_dir("single_file");
    let input = fixtures_dir().join("single/init.msl");
    let output = out_dir.join("init.sqf");

    let compiler = Compiler::new();
    let written = driver::compile_file(&compiler, &input, Some(&output)).expect("compile failed");
    assert_eq!(written, output);

    let compiled = fs::read_to_string(&output).expect("output should exist");
    let expected = concat!(
        "\n#include \"common.sqf\"\n",
        "wave = 0;",
        "spawnWave = {params [\"size\"];wave = wave+1;hint \"wave incoming\";};"
    );
    assert_eq!(compiled, expected);

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn compile_dir_mirrors_tree_and_honors_exclude() {
    let out_dir = scratch_dir("project_dir");
    let project_dir = fixtures_dir().join("project");

    let manifest = Manifest::from_file(&project_dir.join("msl.toml")).expect("manifest loads");
    assert_eq!(manifest.project.name, "patrol");

    let compiler = Compiler::new().with_pretty(manifest.build.pretty);
    let written = driver::compile_dir(
        &compiler,
        &project_dir.join(&manifest.build.source),
        Some(&out_dir),
        &manifest.build.exclude,
    )
    .expect("directory compile failed");

    assert_eq!(written.len(), 2, "drafts must be excluded: {:?}", written);
    assert!(out_dir.join("main.sqf").is_file());
    assert!(out_dir.join("ai/patrol.sqf").is_file());
    assert!(!out_dir.join("drafts/wip.sqf").exists());

    let patrol = fs::read_to_string(out_dir.join("ai/patrol.sqf")).unwrap();
    assert_eq!(
        patrol,
        "patrol = {params [\"unit\"];while {(alive unit)} do {sleep 5;};};"
    );

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn compile_dir_without_exclude_hits_broken_draft() {
    let out_dir = scratch_dir("project_dir_no_exclude");
    let scripts = fixtures_dir().join("project/scripts");

    let compiler = Compiler::new();
    let result = driver::compile_dir(&compiler, &scripts, Some(&out_dir), &[]);

    match result {
        Err(CompileError::Translate { path, .. }) => {
            assert!(path.to_string_lossy().contains("wip.msl"));
        }
        other => panic!("expected Translate error from the draft file, got {:?}", other),
    }

    let _ = fs::remove_dir_all(&out_dir);
}

#[test]
fn missing_input_reports_read_error() {
    let compiler = Compiler::new();
    let missing = fixtures_dir().join("does_not_exist.msl");
    let err = driver::compile_file(&compiler, &missing, None).unwrap_err();
    assert!(matches!(err, CompileError::Read { .. }));
}
