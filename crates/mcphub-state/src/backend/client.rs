// Typed wrappers over the backend command catalog
// One method per command; argument bags and response shapes are part of the
// wire contract with the host application.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::{commands, BackendResult, DebugStatus, Invoker};
use crate::models::{GlobalMcp, McpDraft, McpServer, Project};

/// Typed client over an [`Invoker`]
#[derive(Clone)]
pub struct BackendClient {
    invoker: Arc<dyn Invoker>,
}

impl BackendClient {
    pub fn new(invoker: Arc<dyn Invoker>) -> Self {
        Self { invoker }
    }

    async fn call<T: DeserializeOwned>(&self, command: &str, args: Value) -> BackendResult<T> {
        let value = self.invoker.invoke(command, args).await?;
        serde_json::from_value(value).map_err(|e| super::BackendError::InvalidResponse {
            command: command.to_string(),
            message: e.to_string(),
        })
    }

    // ========================================================================
    // MCP library
    // ========================================================================

    pub async fn get_all_mcps(&self) -> BackendResult<Vec<McpServer>> {
        self.call(commands::GET_ALL_MCPS, json!({})).await
    }

    pub async fn create_mcp(&self, draft: &McpDraft) -> BackendResult<McpServer> {
        self.call(commands::CREATE_MCP, json!({ "mcp": draft })).await
    }

    pub async fn update_mcp(&self, mcp: &McpServer) -> BackendResult<McpServer> {
        self.call(commands::UPDATE_MCP, json!({ "mcp": mcp })).await
    }

    pub async fn delete_mcp(&self, id: i64) -> BackendResult<()> {
        self.call(commands::DELETE_MCP, json!({ "id": id })).await
    }

    pub async fn duplicate_mcp(&self, id: i64) -> BackendResult<McpServer> {
        self.call(commands::DUPLICATE_MCP, json!({ "id": id })).await
    }

    pub async fn set_mcp_favorite(&self, id: i64, favorite: bool) -> BackendResult<McpServer> {
        self.call(
            commands::SET_MCP_FAVORITE,
            json!({ "id": id, "favorite": favorite }),
        )
        .await
    }

    // ========================================================================
    // Global MCPs
    // ========================================================================

    pub async fn get_global_mcps(&self) -> BackendResult<Vec<GlobalMcp>> {
        self.call(commands::GET_GLOBAL_MCPS, json!({})).await
    }

    pub async fn set_global_mcp_enabled(&self, id: i64, enabled: bool) -> BackendResult<GlobalMcp> {
        self.call(
            commands::SET_GLOBAL_MCP_ENABLED,
            json!({ "id": id, "enabled": enabled }),
        )
        .await
    }

    // ========================================================================
    // Projects
    // ========================================================================

    pub async fn get_projects(&self) -> BackendResult<Vec<Project>> {
        self.call(commands::GET_PROJECTS, json!({})).await
    }

    pub async fn assign_mcp_to_project(&self, project_id: i64, mcp_id: i64) -> BackendResult<()> {
        self.call(
            commands::ASSIGN_MCP_TO_PROJECT,
            json!({ "projectId": project_id, "mcpId": mcp_id }),
        )
        .await
    }

    pub async fn remove_mcp_from_project(&self, project_id: i64, mcp_id: i64) -> BackendResult<()> {
        self.call(
            commands::REMOVE_MCP_FROM_PROJECT,
            json!({ "projectId": project_id, "mcpId": mcp_id }),
        )
        .await
    }

    pub async fn set_project_mcp_enabled(
        &self,
        project_id: i64,
        mcp_id: i64,
        enabled: bool,
    ) -> BackendResult<Project> {
        self.call(
            commands::SET_PROJECT_MCP_ENABLED,
            json!({ "projectId": project_id, "mcpId": mcp_id, "enabled": enabled }),
        )
        .await
    }

    pub async fn sync_project_config(&self, project_id: i64) -> BackendResult<()> {
        self.call(
            commands::SYNC_PROJECT_CONFIG,
            json!({ "projectId": project_id }),
        )
        .await
    }

    // ========================================================================
    // Debug mode
    // ========================================================================

    pub async fn get_debug_status(&self) -> BackendResult<DebugStatus> {
        self.call(commands::GET_DEBUG_STATUS, json!({})).await
    }

    /// Returns the active log file path when enabling, `None` when disabling
    pub async fn set_debug_mode(&self, enabled: bool) -> BackendResult<Option<String>> {
        self.call(commands::SET_DEBUG_MODE, json!({ "enabled": enabled }))
            .await
    }

    pub async fn open_logs_folder(&self) -> BackendResult<()> {
        self.call(commands::OPEN_LOGS_FOLDER, json!({})).await
    }

    // ========================================================================
    // Frontend log writers
    // ========================================================================

    pub async fn write_frontend_log(
        &self,
        level: &str,
        message: &str,
        context: Option<Value>,
    ) -> BackendResult<()> {
        self.call(
            commands::WRITE_FRONTEND_LOG,
            json!({ "level": level, "message": message, "context": context }),
        )
        .await
    }

    pub async fn write_invoke_log(
        &self,
        command: &str,
        duration_ms: u64,
        success: bool,
        args: Option<Value>,
        error: Option<String>,
    ) -> BackendResult<()> {
        self.call(
            commands::WRITE_INVOKE_LOG,
            json!({
                "command": command,
                "durationMs": duration_ms,
                "success": success,
                "args": args,
                "error": error,
            }),
        )
        .await
    }
}
