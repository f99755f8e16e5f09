//! `docs-value` CLI: decode parenthesised property values from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Parse a property value (stdin → stdout) as pretty JSON
//! echo '(ItemClass=Desc_Wire_C,Amount=8)' | docs-value parse
//!
//! # Parse from file to file, compact output
//! docs-value parse -i cost.txt -o cost.json --compact
//!
//! # Dump the token stream
//! echo '(R=1,G=0.5,B=0,A=1)' | docs-value tokens
//!
//! # Debug logging to stderr
//! docs-value --verbose parse -i cost.txt
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docs-value",
    version,
    about = "Decode parenthesised property values into JSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a property value and print it as JSON
    Parse {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Emit compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
    /// Print the token stream, one token per line
    Tokens {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Parse {
            input,
            output,
            compact,
        } => {
            let text = read_input(input.as_deref())?;
            debug!(bytes = text.len(), "parsing property value");

            let value = docs_value_core::parse_value(&text)
                .context("Failed to parse property value")?;
            debug!(root = value.type_name(), "parsed");

            let json = value.to_json();
            let rendered = if compact {
                serde_json::to_string(&json)?
            } else {
                serde_json::to_string_pretty(&json)?
            };
            write_output(output.as_deref(), &format!("{rendered}\n"))?;
        }
        Commands::Tokens { input } => {
            let text = read_input(input.as_deref())?;
            let tokens =
                docs_value_core::tokenize(&text).context("Failed to tokenize property value")?;
            debug!(count = tokens.len(), "tokenized");

            let mut out = String::new();
            for token in &tokens {
                out.push_str(&format!(
                    "{}\t{:?}\t{}\n",
                    token.offset,
                    token.kind(),
                    token.text
                ));
            }
            print!("{}", out);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Read the property text. One trailing newline (as left by `echo`) is dropped.
fn read_input(path: Option<&str>) -> Result<String> {
    let mut text = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
