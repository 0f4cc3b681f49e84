//! `rjs` — Rotor JavaScript AST dumper.
//!
//! Parses a JavaScript file (or stdin) with `rotor_core` and prints the
//! AST as JSON on stdout.  Parse failures are reported as
//! `line:col: message` on stderr with exit code 1.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

/// Parse JavaScript and print the AST as JSON.
#[derive(Parser)]
#[command(name = "rjs", version, about)]
struct Args {
    /// Input file; reads stdin when omitted.
    file: Option<PathBuf>,

    /// Run the structural verification pass after parsing.
    #[arg(long)]
    verify: bool,
}

fn read_source(args: &Args) -> Result<String> {
    match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let source = read_source(&args)?;
    let mut parser = rotor_core::Parser::new(&source);
    match parser.parse(args.verify) {
        Ok(root) => {
            println!("{}", rotor_core::ast::json::to_json(parser.ast(), root));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}: {}", err.loc, err.msg);
            Ok(ExitCode::FAILURE)
        }
    }
}
