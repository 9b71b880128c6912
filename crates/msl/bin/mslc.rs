//! MSL command-line compiler.
//!
//! Usage:
//!   mslc script.msl              Compile one file to script.sqf
//!   mslc -r missions/ out/       Recursively compile a folder
//!   mslc missions/               Compile a folder with an msl.toml

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use msl::{Compiler, Manifest, driver, manifest::MANIFEST_NAME};

const USAGE: &str = "\
Usage: mslc [OPTIONS] <INPUT> [OUTPUT]

Arguments:
  <INPUT>   .msl file or directory to compile
  [OUTPUT]  output file or directory (default: alongside the input)

Options:
  -r            recursively compile all .msl files in a directory
  --pretty      insert line breaks in the generated SQF
  -v, --version print the compiler version
  -h, --help    print this help message

A directory containing an msl.toml is compiled according to its manifest.";

enum Action {
    Compile {
        input: PathBuf,
        output: Option<PathBuf>,
        recursive: bool,
        pretty: bool,
    },
    Version,
    Help,
}

fn parse_args() -> Result<Action, String> {
    let mut recursive = false;
    let mut pretty = false;
    let mut positional: Vec<PathBuf> = Vec::new();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "-r" => recursive = true,
            "--pretty" => pretty = true,
            "-v" | "--version" => return Ok(Action::Version),
            "-h" | "--help" => return Ok(Action::Help),
            other if other.starts_with('-') => {
                return Err(format!("unknown option '{}'\n\n{}", other, USAGE));
            }
            other => positional.push(PathBuf::from(other)),
        }
    }

    match positional.as_slice() {
        [input] => Ok(Action::Compile {
            input: input.clone(),
            output: None,
            recursive,
            pretty,
        }),
        [input, output] => Ok(Action::Compile {
            input: input.clone(),
            output: Some(output.clone()),
            recursive,
            pretty,
        }),
        _ => Err(USAGE.into()),
    }
}

fn compile(
    input: PathBuf,
    output: Option<PathBuf>,
    recursive: bool,
    pretty: bool,
) -> Result<(), String> {
    if input.is_dir() {
        let manifest_path = input.join(MANIFEST_NAME);

        let (compiler, source_dir, out_dir, exclude) = if manifest_path.is_file() {
            let manifest = Manifest::from_file(&manifest_path).map_err(|e| e.to_string())?;
            let source_dir = input.join(&manifest.build.source);
            let out_dir = output.or_else(|| {
                manifest
                    .build
                    .output
                    .as_ref()
                    .map(|out| input.join(out))
            });
            let compiler = Compiler::new().with_pretty(pretty || manifest.build.pretty);
            (compiler, source_dir, out_dir, manifest.build.exclude)
        } else if recursive {
            let compiler = Compiler::new().with_pretty(pretty);
            (compiler, input, output, Vec::new())
        } else {
            return Err(format!(
                "{} is a directory; pass -r or add an {}",
                input.display(),
                MANIFEST_NAME
            ));
        };

        let written = driver::compile_dir(&compiler, &source_dir, out_dir.as_deref(), &exclude)
            .map_err(|e| e.to_string())?;
        eprintln!("compiled {} file(s)", written.len());
        Ok(())
    } else if input.is_file() {
        let compiler = Compiler::new().with_pretty(pretty);
        driver::compile_file(&compiler, &input, output.as_deref()).map_err(|e| e.to_string())?;
        Ok(())
    } else {
        Err(format!("no such file or directory: {}", input.display()))
    }
}

fn main() -> ExitCode {
    match parse_args() {
        Ok(Action::Help) => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Action::Version) => {
            println!("mslc {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Ok(Action::Compile {
            input,
            output,
            recursive,
            pretty,
        }) => match compile(input, output, recursive, pretty) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
