//! Troupe - Multi-Agent Orchestration Toolkit
//!
//! Main entry point for the CLI application.

use clap::Parser;
use troupe::cli;
use troupe::Config;

/// Troupe - Multi-Agent Orchestration Toolkit
#[derive(Parser, Debug)]
#[command(name = "troupe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run one scenario directly (chat, research, dev, debate, github)
    #[arg(long, short = 's')]
    scenario: Option<String>,

    /// Override the completion model
    #[arg(long, short = 'm')]
    model: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,

    /// Disable browsing scenarios
    #[arg(long)]
    no_browser: bool,

    /// Run in headed browser mode (visible window)
    #[arg(long)]
    headed: bool,

    /// Single prompt mode (non-interactive, implies the chat scenario)
    #[arg(long, short = 'p')]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.provider.model = model.clone();
    }

    if args.debug {
        config.agent.debug = true;
    }

    if args.no_browser {
        config.browser.enabled = false;
    }

    if args.headed {
        config.browser.headed = true;
    }

    // Missing credentials are fatal before any scenario starts
    config.require_api_key()?;

    // Single prompt mode
    if let Some(ref prompt) = args.prompt {
        cli::run_scenario("chat", &config, Some(prompt)).await?;
        return Ok(());
    }

    // Direct scenario mode
    if let Some(ref scenario) = args.scenario {
        cli::run_scenario(scenario, &config, None).await?;
        return Ok(());
    }

    // Interactive menu
    cli::run_menu(&config).await?;

    Ok(())
}
