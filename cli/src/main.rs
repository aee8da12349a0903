//! memquery shell - a line-oriented JSON front end for the memquery engine.
//!
//! Reads one command per line from stdin, executes it against a single
//! in-memory store and writes one reply per line to stdout. Logs go to stderr.

mod command;
mod config;
mod error;

use crate::config::Config;
use crate::error::Result;
use memquery::Store;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memquery=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!(
        max_query_depth = config.max_query_depth,
        pretty = config.pretty,
        "Starting memquery shell"
    );

    let store = Store::with_options(config.options());
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut handled = 0usize;
    let mut failed = 0usize;

    for line in stdin.lock().lines() {
        let line = line?;
        let Some(reply) = command::execute_line(&store, &line) else {
            continue;
        };
        handled += 1;
        if !reply.is_ok() {
            failed += 1;
        }

        let text = if config.pretty {
            serde_json::to_string_pretty(&reply)?
        } else {
            serde_json::to_string(&reply)?
        };
        writeln!(stdout, "{}", text)?;
        stdout.flush()?;
    }

    tracing::info!(
        commands = handled,
        failed,
        collections = store.len(),
        "Input closed, shutting down"
    );

    Ok(())
}
