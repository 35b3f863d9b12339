use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser as _, Subcommand};
use tracing_subscriber::EnvFilter;

use sintaxis::{Lexer, LexerConfig, Parser, Token};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Lexer and syntax checker for a small Python-like language
#[derive(Debug, clap::Parser)]
#[command(name = "sintaxis", author, version)]
struct Args {
    /// The subcommand to run
    #[command(subcommand)]
    command: Command,

    /// Also reserve the Spanish keyword spellings
    #[arg(long, global = true)]
    spanish: bool,

    /// Read the vocabulary from a JSON file
    #[arg(long, global = true, conflicts_with = "spanish")]
    vocab: Option<PathBuf>,

    /// Log every parser rule and consumed token to stderr
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token stream
    Tokens {
        /// Source file, or `-` for stdin
        file: PathBuf,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Check that a file is syntactically valid
    Check {
        /// Source file, or `-` for stdin
        file: PathBuf,
    },
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.trace);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or everything with `--trace`.
fn init_tracing(trace: bool) {
    let default = if trace { "trace" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    if let Err(e) = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_env_filter(filter)
        .try_init()
    {
        eprintln!("Unable to set up tracing: {e:?}");
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = match &args.vocab {
        Some(path) => LexerConfig::from_json(path)
            .with_context(|| format!("vocabulary '{}'", path.display()))?,
        None if args.spanish => LexerConfig::localized(),
        None => LexerConfig::default(),
    };
    tracing::debug!(keywords = ?config.keywords().collect::<Vec<_>>(), "vocabulary");

    match &args.command {
        Command::Tokens { file, json } => {
            let (name, source) = read_source(file)?;
            let lex_start = Instant::now();
            let tokens = Lexer::with_config(&source, config)
                .tokenize()
                .map_err(|e| anyhow::anyhow!("{}:{}", name, e))?;
            let lex_time = lex_start.elapsed();

            if *json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                print_tokens(&tokens);
            }
            eprintln!("  Lexer: {} tokens  ({:.2}ms)", tokens.len(), lex_time.as_secs_f64() * 1000.0);
        }
        Command::Check { file } => {
            let (name, source) = read_source(file)?;
            let lex_start = Instant::now();
            let tokens = Lexer::with_config(&source, config)
                .tokenize()
                .map_err(|e| anyhow::anyhow!("{}:{}", name, e))?;
            let lex_time = lex_start.elapsed();
            let token_count = tokens.len();

            let parse_start = Instant::now();
            let mut parser = Parser::new(tokens).with_trace(args.trace);
            parser.parse().map_err(|e| anyhow::anyhow!("{}:{}", name, e))?;
            let parse_time = parse_start.elapsed();

            println!("ok: {} ({} statements, {} tokens)", name, parser.statements(), token_count);
            tracing::info!(
                lex_ms = lex_time.as_secs_f64() * 1000.0,
                parse_ms = parse_time.as_secs_f64() * 1000.0,
                "checked {}",
                name
            );
        }
    }
    Ok(())
}

fn read_source(file: &Path) -> anyhow::Result<(String, String)> {
    if file == Path::new("-") {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).context("cannot read stdin")?;
        return Ok(("<stdin>".to_string(), source));
    }
    let source = fs::read_to_string(file).with_context(|| format!("cannot read '{}'", file.display()))?;
    Ok((file.display().to_string(), source))
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!("{token}");
    }
}
