//! Entry point for kite, a small tool-using AI agent for the terminal.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! and dispatches to batch or interactive mode.

mod agent;
mod chat;
mod cli;
mod config;
mod constants;
mod conversation;
mod format;
mod logging;
mod message;
mod output;
mod provider;
#[cfg(test)]
mod test_support;
mod tools;

use anyhow::Result;

/// Runs the kite CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and runs the chosen mode via
/// [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    cli::run(cli).await
}
