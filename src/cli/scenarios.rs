//! Demo scenarios
//!
//! Wires agents, orchestrators, and the tool bridge into the workflows
//! exposed by the menu: a research team, a software development pipeline,
//! a debate, and GitHub exploration over the bridge.

use std::sync::Arc;

use crate::agent::{Agent, BrowserAgent, ChatAgent, HistoryMode, Pipeline, RoundRobin};
use crate::bridge::{is_valid_operation, ToolBridge};
use crate::core::{ChatTurn, Config, Result, ToolDefinition, TroupeError};
use crate::provider::{CompletionProvider, OpenAiClient};
use crate::tools::{BrowserSession, ToolRegistry};

/// Build the shared completion provider from configuration
fn provider(config: &Config) -> Result<Arc<dyn CompletionProvider>> {
    Ok(Arc::new(OpenAiClient::from_config(config)?))
}

/// Research team: browse each URL, analyze it, then summarize the findings
pub async fn run_research_team(config: &Config, topic: &str, urls: &[String]) -> Result<()> {
    println!("\nResearch Team");
    println!("=============");

    if !config.browser.enabled {
        return Err(TroupeError::browser(
            "Browsing is disabled; enable it to run the research team",
        ));
    }
    if !BrowserSession::is_available().await {
        return Err(TroupeError::AgentBrowserNotFound);
    }

    let provider = provider(config)?;

    let mut session = BrowserSession::new(&config.browser.session_name);
    session.set_headed(config.browser.headed);
    let browser = BrowserAgent::new(session);

    let researcher: Arc<dyn ChatAgent> = Arc::new(Agent::new(
        "Researcher",
        "You are a research analyst. Extract the key facts from the provided page \
         content and relate them to the research topic. Be concise and specific.",
        provider.clone(),
    ));
    let summarizer: Arc<dyn ChatAgent> = Arc::new(Agent::new(
        "Summarizer",
        "You are a summarizer. Condense research findings into a short, well \
         structured summary with the most important points first.",
        provider,
    ));

    let mut research = String::new();

    for url in urls {
        println!("Processing: {}", url);

        let content = browser.browse(url).await;
        let analysis = researcher
            .generate_reply(&[ChatTurn::user(format!(
                "Analyze the following page content for the topic '{}':\n\n{}",
                topic, content
            ))])
            .await?;

        research.push_str(&format!("Source: {}\nAnalysis: {}\n\n", url, analysis.text()));
    }

    if let Err(e) = browser.close().await {
        eprintln!("Warning: failed to close browser session: {}", e);
    }

    // One rotation over the team to discuss and condense the findings
    let group = RoundRobin::new(vec![researcher, summarizer]);
    let transcript = group
        .run(&format!(
            "Research findings on '{}':\n\n{}",
            topic, research
        ))
        .await?;

    println!("\n{}", transcript);
    Ok(())
}

/// Software development team: fixed four-stage pipeline with shared history
pub async fn run_dev_team(config: &Config, task: &str) -> Result<()> {
    println!("\nSoftware Development Team");
    println!("=========================");
    println!("Task: {}\n", task);

    let provider = provider(config)?;

    let stages: Vec<Arc<dyn ChatAgent>> = vec![
        Arc::new(Agent::new(
            "ProductOwner",
            "You are a Product Owner. Turn the task into clear, actionable user \
             stories with acceptance criteria. Focus on the what and why, not the how.",
            provider.clone(),
        )),
        Arc::new(Agent::new(
            "Developer",
            "You are a Senior Software Developer. Propose a clean implementation \
             for the given requirements and explain your reasoning briefly.",
            provider.clone(),
        )),
        Arc::new(Agent::new(
            "CodeReviewer",
            "You are a Senior Code Reviewer. Review the proposed implementation for \
             correctness, security, and maintainability, and suggest improvements.",
            provider.clone(),
        )),
        Arc::new(Agent::new(
            "Tester",
            "You are a QA Engineer. Derive concrete test cases from the requirements \
             and the implementation, including edge cases.",
            provider,
        )),
    ];

    let names: Vec<String> = stages.iter().map(|s| s.name().to_string()).collect();
    let pipeline = Pipeline::new(stages).with_mode(HistoryMode::Accumulate);

    let outputs = pipeline.run(task).await?;

    for (name, output) in names.iter().zip(outputs.iter()) {
        println!("--- {} ---\n{}\n", name, output);
    }

    Ok(())
}

/// Debate: bounded round-robin that stops on the moderator's verdict
pub async fn run_debate(config: &Config, motion: &str) -> Result<()> {
    println!("\nDebate");
    println!("======");
    println!("Motion: {}\n", motion);

    let provider = provider(config)?;

    let agents: Vec<Arc<dyn ChatAgent>> = vec![
        Arc::new(Agent::new(
            "Proponent",
            "You argue in favor of the motion under discussion. Respond to the \
             latest point with one short, focused argument.",
            provider.clone(),
        )),
        Arc::new(Agent::new(
            "Opponent",
            "You argue against the motion under discussion. Respond to the latest \
             point with one short, focused counter-argument.",
            provider.clone(),
        )),
        Arc::new(Agent::new(
            "Moderator",
            "You moderate a debate. Briefly weigh the latest arguments. After the \
             second time you speak, end your reply with 'FINAL VERDICT:' and your \
             decision.",
            provider,
        )),
    ];

    let rounds = 2;
    let group = RoundRobin::new(agents)
        .with_max_turns(3 * rounds)
        .until(Box::new(|turn| turn.text().contains("FINAL VERDICT:")));

    let transcript = group.run(motion).await?;
    println!("{}", transcript);
    Ok(())
}

/// Registry whose handlers forward to the tool bridge
///
/// Only known GitHub operations are registered; the bridge call's result
/// or failure text becomes the tool result.
pub fn bridge_backed_registry(bridge: Arc<ToolBridge>, operations: &[&str]) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    for op in operations {
        if !is_valid_operation(op) {
            continue;
        }

        let name = op.to_string();
        let bridge = bridge.clone();

        let definition = ToolDefinition::function(
            name.clone(),
            format!("GitHub operation '{}' executed on the MCP server", name),
            serde_json::json!({
                "type": "object",
                "properties": {
                    "repository": {
                        "type": "string",
                        "description": "Repository in owner/name form"
                    }
                },
                "required": ["repository"]
            }),
        );

        let handler_name = name.clone();
        registry.register(
            definition,
            Arc::new(move |args| {
                let bridge = bridge.clone();
                let op = handler_name.clone();
                Box::pin(async move { bridge.call_tool(&op, args).await })
            }),
        );
    }

    registry
}

/// GitHub exploration over the tool bridge
pub async fn run_github_explorer(config: &Config, repository: &str) -> Result<()> {
    println!("\nGitHub Explorer");
    println!("===============");

    let bridge = Arc::new(ToolBridge::new(&config.bridge.base_url));

    if bridge.initialize().await {
        println!("Bridge handshake accepted by {}", config.bridge.base_url);
    } else {
        println!(
            "Bridge handshake failed for {}; continuing anyway",
            config.bridge.base_url
        );
    }

    let tools = bridge.list_tools().await;
    if tools.is_empty() {
        println!("No tools advertised by the bridge.");
    } else {
        println!("Available bridge tools:");
        for tool in &tools {
            println!("  - {}: {}", tool.name, tool.description);
        }
    }

    let registry = bridge_backed_registry(
        bridge,
        &["get_repository", "list_issues", "list_commits"],
    );

    let provider = provider(config)?;
    let explorer = Agent::builder("GitHubExplorer")
        .system_prompt(
            "You are a GitHub repository explorer. Use the available tools to gather \
             information about repositories, then provide a concise analysis of \
             structure, activity, and notable areas for improvement.",
        )
        .provider(provider)
        .tools(Arc::new(registry))
        .temperature(0.3)
        .build()?;

    let reply = explorer
        .generate_reply(&[ChatTurn::user(format!(
            "Analyze the repository '{}' and report your findings.",
            repository
        ))])
        .await?;

    println!("\n{}", reply.text());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridge_registry_skips_unknown_operations() {
        let bridge = Arc::new(ToolBridge::new("http://localhost:3000"));
        let registry = bridge_backed_registry(
            bridge,
            &["get_repository", "not_a_real_operation", "list_issues"],
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("get_repository"));
        assert!(!registry.contains("not_a_real_operation"));
    }
}
