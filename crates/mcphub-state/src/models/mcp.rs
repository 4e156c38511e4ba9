// MCP server data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// MCP transport kinds (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum McpType {
    /// Local process spoken to over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP endpoint
    Http,
    /// Server-sent events endpoint
    Sse,
}

impl std::fmt::Display for McpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            McpType::Stdio => write!(f, "stdio"),
            McpType::Http => write!(f, "http"),
            McpType::Sse => write!(f, "sse"),
        }
    }
}

/// A configured MCP server in the library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McpServer {
    /// Identifier assigned by the backend, unique within the library
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub mcp_type: McpType,
    /// Launch command (stdio servers)
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    /// Endpoint URL (http/sse servers)
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
}

/// Creation payload for a new MCP server (no backend-assigned fields yet)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct McpDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub mcp_type: McpType,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Per-type totals over the full (unfiltered) library
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct McpCounts {
    pub total: usize,
    pub stdio: usize,
    pub http: usize,
    pub sse: usize,
}
