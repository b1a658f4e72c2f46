//! CLI module - interactive menu and demo scenarios
//!
//! The binary's user-facing surface: a numbered scenario menu, the chat
//! REPL, and the scenario implementations.

pub mod repl;
pub mod scenarios;

use std::io::{self, BufRead, Write};

use crate::core::{Config, Result, TroupeError};

pub use repl::{is_exit_token, Repl};

/// Menu entries in display order
const MENU: &[(&str, &str)] = &[
    ("1", "Chat with the assistant"),
    ("2", "Research team (web browsing)"),
    ("3", "Software development team"),
    ("4", "Debate"),
    ("5", "GitHub explorer (MCP bridge)"),
    ("0", "Exit"),
];

fn print_menu() {
    println!("\ntroupe - multi-agent orchestration demos");
    println!("----------------------------------------");
    for (key, label) in MENU {
        println!("  {}. {}", key, label);
    }
    println!();
}

/// Read one line from stdin, trimmed; `None` on EOF
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Prompt for a value, falling back to a default on empty input
fn prompt_or_default(prompt: &str, default: &str) -> io::Result<String> {
    let answer = read_line(&format!("{} [{}]: ", prompt, default))?;
    Ok(match answer {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    })
}

async fn run_choice(choice: &str, config: &Config) -> Result<()> {
    match choice {
        "1" => Repl::from_config(config)?.run().await,
        "2" => {
            let topic = prompt_or_default("Research topic", "Rust async runtimes")?;
            let url = prompt_or_default("URL to research", "https://tokio.rs")?;
            scenarios::run_research_team(config, &topic, &[url]).await
        }
        "3" => {
            let task = prompt_or_default(
                "Development task",
                "Create a simple calculator application with basic arithmetic operations",
            )?;
            scenarios::run_dev_team(config, &task).await
        }
        "4" => {
            let motion = prompt_or_default(
                "Debate motion",
                "Remote work is better than office work",
            )?;
            scenarios::run_debate(config, &motion).await
        }
        "5" => {
            let repository = prompt_or_default("Repository (owner/name)", "rust-lang/rust")?;
            scenarios::run_github_explorer(config, &repository).await
        }
        other => {
            println!("Unknown choice '{}'", other);
            Ok(())
        }
    }
}

/// Run the interactive scenario menu
///
/// Scenario failures are printed and the menu continues; only fatal
/// configuration errors end the loop with an error.
pub async fn run_menu(config: &Config) -> Result<()> {
    loop {
        print_menu();

        let choice = match read_line("Select: ")? {
            Some(c) => c,
            None => break,
        };

        if choice.is_empty() {
            continue;
        }

        if choice == "0" || is_exit_token(&choice) {
            println!("Goodbye!");
            break;
        }

        if let Err(e) = run_choice(&choice, config).await {
            if e.is_fatal() {
                return Err(e);
            }
            eprintln!("\nScenario failed: {}\n", e);
        }
    }

    Ok(())
}

/// Run one scenario by name, non-interactively
pub async fn run_scenario(name: &str, config: &Config, input: Option<&str>) -> Result<()> {
    match name {
        "chat" => match input {
            Some(prompt) => {
                let mut repl = Repl::from_config(config)?;
                let response = repl.process(prompt).await?;
                println!("{}", response);
                Ok(())
            }
            None => Repl::from_config(config)?.run().await,
        },
        "research" => {
            let url = input.unwrap_or("https://tokio.rs").to_string();
            scenarios::run_research_team(config, "the page content", &[url]).await
        }
        "dev" => {
            let task = input.unwrap_or(
                "Create a simple calculator application with basic arithmetic operations",
            );
            scenarios::run_dev_team(config, task).await
        }
        "debate" => {
            let motion = input.unwrap_or("Remote work is better than office work");
            scenarios::run_debate(config, motion).await
        }
        "github" => {
            let repository = input.unwrap_or("rust-lang/rust");
            scenarios::run_github_explorer(config, repository).await
        }
        other => Err(TroupeError::config(format!(
            "Unknown scenario '{}'; expected chat, research, dev, debate, or github",
            other
        ))),
    }
}
