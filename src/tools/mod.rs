//! Tools module - local tool execution
//!
//! Contains the tool registry, built-in text tools, and the browser session.

pub mod browser;
pub mod registry;
pub mod text;

pub use browser::{BrowserSession, PageView};
pub use registry::{ToolHandler, ToolRegistry};
pub use text::register_text_tools;
