//! wlru - interactive shell over a weighted LRU cache

mod handler;
mod reply;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::handler::{CommandHandler, StringCache};
use crate::reply::tokenize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity, in item weight units
    #[arg(short, long, default_value_t = 1024)]
    max_size: usize,

    /// Capacity cost of every entry
    #[arg(short = 'w', long, default_value_t = 1)]
    item_weight: usize,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so replies stay clean on stdout
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    info!("Starting wlru v{}", env!("CARGO_PKG_VERSION"));
    info!("Max size: {}", args.max_size);
    info!("Item weight: {}", args.item_weight);

    let cache = StringCache::new(args.max_size, args.item_weight)
        .context("invalid cache capacity")?;
    let handler = CommandHandler::new(Arc::new(cache));

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => {
            info!("Reading commands from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    run(&handler, input, io::stdout().lock())
}

fn run(handler: &CommandHandler, input: impl BufRead, mut out: impl Write) -> Result<()> {
    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let Some(words) = tokenize(&line) else {
            continue;
        };

        let reply = handler.handle(&words);
        if reply.is_error() {
            warn!("line {}: {}", lineno + 1, reply);
        }
        writeln!(out, "{}", reply)?;
    }

    out.flush()?;
    Ok(())
}
