use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser as ClapParser;
use log::error;

use lpp::{evaluate, Environment, Lexer, Parser, Value};

/// LPP: a tree-walking interpreter for a small expression-oriented language
/// with Spanish-language keywords.
#[derive(ClapParser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Script to run. If omitted, starts an interactive REPL on stdin.
    file: Option<PathBuf>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .init()
        .expect("logger already initialized");

    let result = match &cli.file {
        Some(path) => run_file(path),
        None => run_repl(),
    };

    if let Err(err) = result {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run_file(path: &PathBuf) -> anyhow::Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("no se pudo leer el archivo: {}", path.display()))?;

    let (program, errors) = Parser::new(Lexer::new(&source)).parse_program();
    if !errors.is_empty() {
        print_parse_errors(&errors);
        std::process::exit(1);
    }

    let env = Environment::new();
    let result = evaluate(&program, &env);
    if !matches!(result, Value::Null) {
        println!("{}", result.inspect());
    }

    Ok(())
}

fn run_repl() -> anyhow::Result<()> {
    let env = Environment::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!(">> ");
    stdout.flush().ok();

    for line in stdin.lock().lines() {
        let line = line.context("error leyendo la entrada estandar")?;
        if !line.trim().is_empty() {
            let (program, errors) = Parser::new(Lexer::new(&line)).parse_program();
            if !errors.is_empty() {
                print_parse_errors(&errors);
            } else {
                let result = evaluate(&program, &env);
                if !matches!(result, Value::Null) {
                    println!("{}", result.inspect());
                }
            }
        }

        print!(">> ");
        stdout.flush().ok();
    }
    println!();

    Ok(())
}

fn print_parse_errors(errors: &[String]) {
    for error in errors {
        println!("--- Error ---");
        println!("{error}");
    }
}
