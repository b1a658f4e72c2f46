//! Browser session - wraps the agent-browser CLI
//!
//! Provides the navigate/extract contract used by the browsing agent. The
//! session is owned by a single agent and only ever used sequentially.

use std::process::Stdio;
use tokio::process::Command;

use crate::core::{Result, TroupeError};

/// Maximum body text kept from a navigated page
const MAX_CONTENT_LEN: usize = 2000;

/// A page extracted by the browser
#[derive(Debug, Clone)]
pub struct PageView {
    /// Page title
    pub title: String,
    /// The URL that was navigated to
    pub url: String,
    /// Body text, truncated to [`MAX_CONTENT_LEN`] characters
    pub content: String,
}

impl std::fmt::Display for PageView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Page Title: {}\nURL: {}\nContent: {}",
            self.title, self.url, self.content
        )
    }
}

/// Browser session over the agent-browser CLI
pub struct BrowserSession {
    /// Session name for isolation
    session_name: String,
    /// Whether to run in headed mode
    headed: bool,
}

impl BrowserSession {
    /// Create a new browser session handle
    ///
    /// The underlying browser is launched lazily by the CLI on the first
    /// navigation.
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
            headed: false,
        }
    }

    /// Set headed mode
    pub fn set_headed(&mut self, headed: bool) {
        self.headed = headed;
    }

    /// Check if agent-browser is installed
    pub async fn is_available() -> bool {
        Command::new("agent-browser")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Run an agent-browser command
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("agent-browser");
        cmd.args(["--session", &self.session_name]);

        if self.headed {
            cmd.arg("--headed");
        }

        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TroupeError::AgentBrowserNotFound
            } else {
                TroupeError::browser(format!("Failed to run agent-browser: {}", e))
            }
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(TroupeError::browser(format!(
                "agent-browser command failed: {}",
                stderr
            )))
        }
    }

    /// Navigate to a URL and extract title and body text
    pub async fn navigate(&self, url: &str) -> Result<PageView> {
        self.run_command(&["open", url]).await?;

        // Best effort wait for the page to settle
        let _ = self.run_command(&["wait", "--load", "networkidle"]).await;

        let title = self.run_command(&["get", "title"]).await?;
        let body = self.run_command(&["get", "text", "body"]).await?;

        Ok(PageView {
            title: title.trim().to_string(),
            url: url.to_string(),
            content: truncate_content(body.trim()),
        })
    }

    /// Close the browser session
    pub async fn close(&self) -> Result<()> {
        self.run_command(&["close"]).await?;
        Ok(())
    }
}

/// Truncate body text to the content limit, marking the cut with an ellipsis
fn truncate_content(content: &str) -> String {
    if content.chars().count() <= MAX_CONTENT_LEN {
        return content.to_string();
    }

    let truncated: String = content.chars().take(MAX_CONTENT_LEN).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = BrowserSession::new("test-session");
        assert_eq!(session.session_name, "test-session");
        assert!(!session.headed);
    }

    #[test]
    fn test_truncate_short_content_untouched() {
        assert_eq!(truncate_content("hello"), "hello");
    }

    #[test]
    fn test_truncate_long_content() {
        let long = "x".repeat(MAX_CONTENT_LEN + 50);
        let truncated = truncate_content(&long);
        assert_eq!(truncated.chars().count(), MAX_CONTENT_LEN + 3);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_page_view_format() {
        let page = PageView {
            title: "Example".to_string(),
            url: "https://example.com".to_string(),
            content: "Some text".to_string(),
        };
        assert_eq!(
            page.to_string(),
            "Page Title: Example\nURL: https://example.com\nContent: Some text"
        );
    }
}
