// Data models shared across stores and the backend boundary

pub mod mcp;
pub mod project;
pub mod release;

pub use mcp::{McpCounts, McpDraft, McpServer, McpType};
pub use project::{GlobalMcp, Project, ProjectMcp};
pub use release::{GithubRelease, ReleaseInfo};
