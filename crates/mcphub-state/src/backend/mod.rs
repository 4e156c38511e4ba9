// Backend command boundary
// The state layer never talks to storage or the MCP gateway directly; every
// operation goes through a named command with a JSON argument bag. The host
// application supplies the Invoker implementation.

pub mod client;
pub mod timing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::BackendClient;
pub use timing::TimedInvoker;

/// Backend boundary error
#[derive(Error, Debug, Clone)]
pub enum BackendError {
    /// The remote command handler reported a failure
    #[error("command '{command}' failed: {message}")]
    Command { command: String, message: String },

    /// The command succeeded but its payload did not match the expected shape
    #[error("invalid response from '{command}': {message}")]
    InvalidResponse { command: String, message: String },
}

impl BackendError {
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        BackendError::Command {
            command: command.into(),
            message: message.into(),
        }
    }
}

impl From<BackendError> for String {
    fn from(err: BackendError) -> Self {
        err.to_string()
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Opaque command-invocation boundary to the host application.
///
/// Command names and argument shapes are part of the wire contract and must
/// stay compatible with the backend handlers (see [`commands`]).
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, command: &str, args: serde_json::Value)
        -> BackendResult<serde_json::Value>;
}

/// Debug-mode status as reported by the backend
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DebugStatus {
    pub enabled: bool,
    pub log_path: Option<String>,
}

/// Fixed catalog of backend command names
pub mod commands {
    // MCP library
    pub const GET_ALL_MCPS: &str = "get_all_mcps";
    pub const CREATE_MCP: &str = "create_mcp";
    pub const UPDATE_MCP: &str = "update_mcp";
    pub const DELETE_MCP: &str = "delete_mcp";
    pub const DUPLICATE_MCP: &str = "duplicate_mcp";
    pub const SET_MCP_FAVORITE: &str = "set_mcp_favorite";

    // Global MCPs
    pub const GET_GLOBAL_MCPS: &str = "get_global_mcps";
    pub const SET_GLOBAL_MCP_ENABLED: &str = "set_global_mcp_enabled";

    // Projects
    pub const GET_PROJECTS: &str = "get_projects";
    pub const ASSIGN_MCP_TO_PROJECT: &str = "assign_mcp_to_project";
    pub const REMOVE_MCP_FROM_PROJECT: &str = "remove_mcp_from_project";
    pub const SET_PROJECT_MCP_ENABLED: &str = "set_project_mcp_enabled";
    pub const SYNC_PROJECT_CONFIG: &str = "sync_project_config";

    // Debug mode control
    pub const GET_DEBUG_STATUS: &str = "get_debug_status";
    pub const SET_DEBUG_MODE: &str = "set_debug_mode";
    pub const OPEN_LOGS_FOLDER: &str = "open_logs_folder";

    // Frontend log writers
    pub const WRITE_FRONTEND_LOG: &str = "write_frontend_log";
    pub const WRITE_INVOKE_LOG: &str = "write_invoke_log";
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted invoker for store tests

    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use super::{BackendError, BackendResult, Invoker};

    /// Invoker that replays queued responses per command and records calls
    #[derive(Default)]
    pub struct ScriptedInvoker {
        responses: Mutex<HashMap<String, VecDeque<BackendResult<Value>>>>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl ScriptedInvoker {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful response for `command`
        pub fn respond(&self, command: &str, value: Value) {
            self.responses
                .lock()
                .unwrap()
                .entry(command.to_string())
                .or_default()
                .push_back(Ok(value));
        }

        /// Queue a failure for `command`
        pub fn fail(&self, command: &str, message: &str) {
            self.responses
                .lock()
                .unwrap()
                .entry(command.to_string())
                .or_default()
                .push_back(Err(BackendError::command(command, message)));
        }

        /// All recorded invocations, in order
        pub fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of invocations of a single command
        pub fn call_count(&self, command: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(name, _)| name == command)
                .count()
        }
    }

    #[async_trait]
    impl Invoker for ScriptedInvoker {
        async fn invoke(&self, command: &str, args: Value) -> BackendResult<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((command.to_string(), args));

            self.responses
                .lock()
                .unwrap()
                .get_mut(command)
                .and_then(|queue| queue.pop_front())
                .unwrap_or_else(|| {
                    Err(BackendError::command(
                        command,
                        "no scripted response".to_string(),
                    ))
                })
        }
    }
}
