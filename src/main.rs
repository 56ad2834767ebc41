//! Ring Compiler front end
//!
//! Dumps the token stream or the AST of a `.ri` file, or just checks that it parses.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process;

use ring_lang::feedback::ErrorReport;
use ring_lang::frontend::{print_program, Lexer, Parser as RingParser};
use ring_lang::utils::{Error, Report};

/// Ring Compiler
#[derive(Parser, Debug)]
#[command(name = "ringc")]
#[command(author = "Z1529")]
#[command(version = "0.1.0")]
#[command(about = "Ring compiler front end - lexer, parser and diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input source file (.ri), parsed and dumped as an AST
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format for dumps and errors
    #[arg(long, value_enum, global = true, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one `line:col kind value` record per token
    Tokens {
        /// Input source file
        input: PathBuf,
    },
    /// Print the syntax tree
    Parse {
        /// Input source file
        input: PathBuf,
    },
    /// Check a source file for errors
    Check {
        /// Input source file
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        match err.downcast_ref::<Error>() {
            Some(error) => match cli.format {
                Format::Text => eprint!("{}", Report::from_disk(error)),
                Format::Json => eprintln!("{}", ErrorReport::from_error(error).to_json()),
            },
            None => eprintln!("error: {:#}", err),
        }
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Tokens { input }) => dump_tokens(input, cli.format),
        Some(Commands::Parse { input }) => dump_ast(input, cli.format),
        Some(Commands::Check { input }) => check_file(input),
        None => {
            // Default: parse the input file
            if let Some(ref input) = cli.input {
                dump_ast(input, cli.format)
            } else {
                eprintln!("Error: No input file specified");
                eprintln!("Usage: ringc <FILE> or ringc [tokens|parse|check] <FILE>");
                process::exit(1);
            }
        }
    }
}

/// Token mode
fn dump_tokens(input: &Path, format: Format) -> anyhow::Result<()> {
    info!("lexing {}", input.display());
    let tokens = Lexer::from_file(input)?.tokenize()?;
    debug!("{} tokens", tokens.len());

    match format {
        Format::Text => {
            for token in &tokens {
                println!("{}", token);
            }
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(&tokens).context("serializing tokens")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// AST mode
fn dump_ast(input: &Path, format: Format) -> anyhow::Result<()> {
    info!("parsing {}", input.display());
    let program = RingParser::new(Lexer::from_file(input)?)?.produce_ast()?;
    debug!("{} top-level declarations", program.top_level.len());

    match format {
        Format::Text => print!("{}", print_program(&program)),
        Format::Json => {
            let json = serde_json::to_string_pretty(&program).context("serializing AST")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Check a source file for errors without dumping anything
fn check_file(input: &Path) -> anyhow::Result<()> {
    info!("checking {}", input.display());
    RingParser::new(Lexer::from_file(input)?)?.produce_ast()?;
    println!("✅ No errors found");
    Ok(())
}
