//! Web browsing agent
//!
//! Replies to a turn by extracting the first URL from it, navigating
//! there, and returning the extracted page text. Navigation problems are
//! reported in the reply itself, never as an error, so a bad link does
//! not end the orchestration run.

use async_trait::async_trait;
use url::Url;

use crate::agent::ChatAgent;
use crate::core::{ChatTurn, Result};
use crate::tools::BrowserSession;

/// Agent that browses URLs mentioned in the incoming message
pub struct BrowserAgent {
    name: String,
    session: BrowserSession,
}

impl BrowserAgent {
    /// Create a browsing agent over the given session
    pub fn new(session: BrowserSession) -> Self {
        Self {
            name: "WebBrowser".to_string(),
            session,
        }
    }

    /// Override the agent name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Navigate directly, formatting failures into the returned text
    pub async fn browse(&self, url: &str) -> String {
        match self.session.navigate(url).await {
            Ok(page) => page.to_string(),
            Err(e) => format!("Error navigating to {}: {}", url, e),
        }
    }

    /// Close the underlying browser session
    pub async fn close(&self) -> Result<()> {
        self.session.close().await
    }
}

/// First whitespace-separated token that parses as an http(s) URL
fn extract_url(message: &str) -> Option<String> {
    message
        .split_whitespace()
        .filter(|w| w.starts_with("http://") || w.starts_with("https://"))
        .find(|w| Url::parse(w).is_ok())
        .map(|w| w.to_string())
}

#[async_trait]
impl ChatAgent for BrowserAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_reply(&self, history: &[ChatTurn]) -> Result<ChatTurn> {
        let message = history.last().map(|t| t.text()).unwrap_or("");

        let reply = match extract_url(message) {
            Some(url) => self.browse(&url).await,
            None => "No valid URL found in message for web browsing.".to_string(),
        };

        Ok(ChatTurn::assistant(reply).from_agent(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_url_finds_first_link() {
        let url = extract_url("please summarize https://example.com/a and http://example.org/b");
        assert_eq!(url.as_deref(), Some("https://example.com/a"));
    }

    #[test]
    fn test_extract_url_ignores_plain_text() {
        assert!(extract_url("no links here").is_none());
        assert!(extract_url("httpx://not-a-scheme").is_none());
    }

    #[tokio::test]
    async fn test_reply_without_url() {
        let agent = BrowserAgent::new(BrowserSession::new("test"));
        let reply = agent
            .generate_reply(&[ChatTurn::user("just chatting")])
            .await
            .unwrap();
        assert_eq!(reply.text(), "No valid URL found in message for web browsing.");
        assert_eq!(reply.from.as_deref(), Some("WebBrowser"));
    }
}
