//! Command-line interface definition and dispatch for kite.
//!
//! Uses [`clap`] for argument parsing with derive macros. Exactly one of
//! `--prompt` (batch) or `--interactive` (REPL) selects the session mode.

use crate::{
    agent, chat, config::Config, conversation::Conversation, logging, message::Message, output,
    provider::ChatCompletionsClient, tools::ToolRegistry,
};
use anyhow::Result;
use clap::{ArgGroup, Parser};

/// Top-level CLI structure for kite.
#[derive(Parser, Debug)]
#[command(name = "kite", about = "A small tool-using AI agent for the terminal")]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["prompt", "interactive"]),
))]
pub struct Cli {
    /// Run a single prompt and print the answer
    #[arg(short, long, value_name = "TEXT")]
    pub prompt: Option<String>,
    /// Start an interactive chat session
    #[arg(short, long)]
    pub interactive: bool,
    /// Model to use (overrides config)
    #[arg(short, long)]
    pub model: Option<String>,
    /// Maximum completion rounds per turn (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_rounds: Option<u64>,
    /// Enable debug diagnostics on stderr
    #[arg(long)]
    pub debug: bool,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

impl Cli {
    /// Layers command-line overrides on top of the loaded configuration.
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(rounds) = self.max_rounds {
            config.max_rounds = rounds as usize;
        }
        if self.debug {
            config.debug = true;
        }
    }
}

/// Dispatches the parsed CLI to batch or interactive mode.
pub async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    cli.apply_overrides(&mut config);
    logging::init(config.debug);
    tracing::debug!(model = %config.model, base_url = %config.base_url, max_rounds = config.max_rounds, "configuration resolved");

    let client = ChatCompletionsClient::from_config(&config);
    let tools = ToolRegistry::with_builtins(std::env::current_dir()?);

    match cli.prompt {
        Some(prompt) => run_batch(&config, &client, &tools, &prompt).await,
        None => chat::run_chat(&config, &client, &tools).await,
    }
}

/// Runs one prompt to completion and prints the answer to stdout.
async fn run_batch(
    config: &Config,
    client: &ChatCompletionsClient,
    tools: &ToolRegistry,
    prompt: &str,
) -> Result<()> {
    let mut conversation = Conversation::new();
    conversation.push(Message::user(prompt));

    let mut renderer = output::TerminalRenderer::new();
    let outcome = agent::run_agent_loop(
        client,
        &mut conversation,
        tools,
        &mut renderer,
        config.max_rounds,
    )
    .await?;
    tracing::debug!(rounds = outcome.rounds, "batch run finished");

    println!("{}", outcome.answer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn base_config() -> Config {
        Config {
            api_key: "sk-test".into(),
            base_url: "https://example.invalid/v1".into(),
            model: "default/model".into(),
            max_rounds: 25,
            debug: false,
        }
    }

    #[test]
    fn test_neither_mode_is_rejected() {
        let err = Cli::try_parse_from(["kite"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_both_modes_are_rejected() {
        let err = Cli::try_parse_from(["kite", "-p", "hi", "-i"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_prompt_mode() {
        let cli = Cli::try_parse_from(["kite", "-p", "what is in x.txt?"]).unwrap();
        assert_eq!(cli.prompt.as_deref(), Some("what is in x.txt?"));
        assert!(!cli.interactive);
    }

    #[test]
    fn test_interactive_mode() {
        let cli = Cli::try_parse_from(["kite", "--interactive"]).unwrap();
        assert!(cli.interactive);
        assert!(cli.prompt.is_none());
    }

    #[test]
    fn test_zero_max_rounds_rejected() {
        assert!(Cli::try_parse_from(["kite", "-i", "--max-rounds", "0"]).is_err());
    }

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::try_parse_from([
            "kite",
            "-i",
            "--model",
            "other/model",
            "--max-rounds",
            "3",
            "--debug",
        ])
        .unwrap();
        let mut config = base_config();
        cli.apply_overrides(&mut config);
        assert_eq!(config.model, "other/model");
        assert_eq!(config.max_rounds, 3);
        assert!(config.debug);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli::try_parse_from(["kite", "-p", "hi"]).unwrap();
        let mut config = base_config();
        cli.apply_overrides(&mut config);
        assert_eq!(config, base_config());
    }
}
