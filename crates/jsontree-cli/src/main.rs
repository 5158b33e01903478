//! `jsontree` CLI: navigate JSON documents by path and read coerced values.
//!
//! ## Usage
//!
//! ```sh
//! # Print a subtree as JSON (stdin → stdout)
//! echo '{"user":{"age":"20"}}' | jsontree get user
//!
//! # Read a leaf with coercion: "20" becomes 20
//! jsontree get user.age --as int -i data.json
//!
//! # Substitute zero values instead of failing on missing or null leaves
//! jsontree get user.email --as string --lenient -i data.json
//!
//! # List member names of an object
//! jsontree keys user -i data.json
//!
//! # Replace a value deep inside the document and print the result
//! jsontree set 'gadgets[0].name' '"bell"' -i data.json --pretty
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=debug` to see them.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jsontree_core::{codec, Node, NullStrategy, Path};
use std::io::{self, Read};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsontree",
    version,
    about = "Navigate JSON documents by path with lenient coercion"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a path
    Get {
        /// Dotted path such as `a.list[5].name`; `$` is the root
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Coerce the value to this kind before printing
        #[arg(long = "as", value_enum, default_value_t = Kind::Json)]
        kind: Kind,
        /// Print the zero value instead of failing on a missing, null or
        /// mistyped leaf
        #[arg(long)]
        lenient: bool,
        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the member names of the object at a path
    Keys {
        /// Dotted path; the root when omitted
        #[arg(default_value = "$")]
        path: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Write a JSON value at a path and print the whole document
    Set {
        /// Dotted path of the member or element to write
        path: String,
        /// The new value, as JSON text
        value: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Indent JSON output
        #[arg(long)]
        pretty: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    String,
    Int,
    Float,
    Bool,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Get {
            path,
            input,
            kind,
            lenient,
            pretty,
        } => {
            let doc = load(input.as_deref())?;
            let doc = if lenient {
                doc.with_null_strategy(NullStrategy::UseEmptyValue)
            } else {
                doc
            };
            let node = doc.navigate(&parse_path(&path)?);
            debug!(path = %node.path(), exists = node.exists(), "navigated");
            println!("{}", render(&node, kind, pretty)?);
        }
        Commands::Keys { path, input } => {
            let doc = load(input.as_deref())?;
            let node = doc.navigate(&parse_path(&path)?);
            if node.object().is_none() {
                bail!("no object at {}", node.path());
            }
            for key in node.keys() {
                println!("{key}");
            }
        }
        Commands::Set {
            path,
            value,
            input,
            pretty,
        } => {
            let mut doc = load(input.as_deref())?;
            let value = codec::parse(&value).context("Failed to parse the new value")?;
            doc.set_at(&parse_path(&path)?, value)
                .with_context(|| format!("Failed to write at {path}"))?;
            println!("{}", json(&doc, pretty));
        }
    }

    Ok(())
}

/// Format the node as the requested kind. JSON output of an absent node
/// fails unless `--lenient` was given, in which case it prints `null`.
fn render(node: &Node, kind: Kind, pretty: bool) -> Result<String> {
    let text = match kind {
        Kind::String => node.string_value()?,
        Kind::Int => node.i64_value()?.to_string(),
        Kind::Float => node.f64_value()?.to_string(),
        Kind::Bool => node.bool_value()?.to_string(),
        Kind::Json => {
            if !node.exists() && matches!(node.null_strategy(), NullStrategy::ForceUnwrap) {
                bail!("key not found at {}", node.path());
            }
            json(node, pretty)
        }
    };
    Ok(text)
}

fn json(node: &Node, pretty: bool) -> String {
    if pretty {
        codec::to_string_pretty(node.value())
    } else {
        codec::to_string(node.value())
    }
}

fn parse_path(raw: &str) -> Result<Path> {
    match Path::parse(raw) {
        Some(path) => Ok(path),
        None => bail!("Invalid path: '{raw}'. Expected a form like a.list[5].name"),
    }
}

fn load(path: Option<&str>) -> Result<Node> {
    let text = match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    Node::parse(&text).context("Failed to parse JSON input")
}
