// Project and global-assignment data models

use serde::{Deserialize, Serialize};

use super::mcp::McpType;

/// An MCP assignment within a project config
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMcp {
    pub mcp_id: i64,
    pub name: String,
    pub enabled: bool,
}

/// A project whose MCP config is managed by the app
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier assigned by the backend, unique within the collection
    pub id: i64,
    pub name: String,
    /// Absolute path to the project root
    pub path: String,
    #[serde(default)]
    pub mcps: Vec<ProjectMcp>,
}

/// An MCP enabled (or not) in the user's global configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMcp {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub mcp_type: McpType,
    pub enabled: bool,
}
