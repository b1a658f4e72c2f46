//! GitHub operation catalogue for the tool bridge
//!
//! The GitHub MCP server exposes a fixed set of named operations; the
//! scenario layer validates requested names against this list before
//! sending them over the bridge.

/// Operations exposed by the GitHub MCP server
pub const AVAILABLE_OPERATIONS: &[&str] = &[
    "list_repositories",
    "get_repository",
    "list_issues",
    "create_issue",
    "get_issue",
    "update_issue",
    "list_pull_requests",
    "get_pull_request",
    "create_pull_request",
    "get_file_contents",
    "create_file",
    "update_file",
    "delete_file",
    "list_branches",
    "create_branch",
    "get_commit",
    "list_commits",
];

/// Whether a name is a known GitHub bridge operation
pub fn is_valid_operation(operation: &str) -> bool {
    AVAILABLE_OPERATIONS.contains(&operation)
}
