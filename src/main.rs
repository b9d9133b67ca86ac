//! CLI tool to compile kyro scripts to POSIX shell, or run them.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "kyro")]
#[command(about = "Structured shell scripting language, compiled to POSIX sh")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Compile a script and print the generated shell
    Compile {
        /// Script to compile
        file: PathBuf,

        /// Write the shell script here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compile a script and execute it with a POSIX shell
    Run {
        /// Script to run
        file: PathBuf,

        /// Shell used to execute the generated script
        #[arg(long, env = "KYRO_SHELL", default_value = "sh")]
        shell: String,
    },
}

fn main() -> ExitCode {
    // stdout carries the generated script; logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match execute(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(mode: Mode) -> Result<ExitCode> {
    match mode {
        Mode::Compile { file, output } => {
            let Some(script) = compile_file(&file)? else {
                return Ok(ExitCode::FAILURE);
            };
            match output {
                Some(path) => fs::write(&path, format!("{script}\n"))
                    .with_context(|| format!("cannot write {}", path.display()))?,
                None => println!("{script}"),
            }
            Ok(ExitCode::SUCCESS)
        }
        Mode::Run { file, shell } => {
            let Some(script) = compile_file(&file)? else {
                return Ok(ExitCode::FAILURE);
            };
            tracing::debug!(shell = %shell, "running generated script");
            let status = Command::new(&shell)
                .arg("-c")
                .arg(&script)
                .status()
                .with_context(|| format!("cannot start {shell}"))?;
            tracing::debug!(%status, "shell exited");

            // killed by a signal: no code to forward
            let code = status
                .code()
                .and_then(|c| u8::try_from(c).ok())
                .unwrap_or(1);
            Ok(ExitCode::from(code))
        }
    }
}

/// Compile `path`, printing a positioned diagnostic on failure.
///
/// Returns `Ok(None)` when the source does not compile.
fn compile_file(path: &Path) -> Result<Option<String>> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    match kyro::compile(&source) {
        Ok(script) => Ok(Some(script)),
        Err(e) => {
            if e.position().is_some() {
                eprintln!("kyro error at {}", e.diagnostic());
            } else {
                eprintln!("kyro error: {}", e.diagnostic());
            }
            Ok(None)
        }
    }
}
