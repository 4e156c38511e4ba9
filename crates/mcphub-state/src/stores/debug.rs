// Debug log relay
// Toggles backend debug mode and forwards structured frontend log lines to
// the backend log file. Write paths are fire-and-forget: a failure to record
// a log entry never surfaces to the caller.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::backend::{BackendClient, BackendResult};

/// Process-wide debug-mode state
#[derive(Debug, Clone, Default)]
pub struct DebugState {
    pub enabled: bool,
    /// Last known log file path; kept after disabling for user reference
    pub log_path: Option<String>,
    /// True while an enable/disable round trip is in flight
    pub loading: bool,
}

/// Store for debug-mode control and frontend log forwarding
#[derive(Clone)]
pub struct DebugStore {
    backend: BackendClient,
    state: Arc<RwLock<DebugState>>,
}

impl DebugStore {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(DebugState::default())),
        }
    }

    pub async fn state(&self) -> DebugState {
        self.state.read().await.clone()
    }

    pub async fn is_enabled(&self) -> bool {
        self.state.read().await.enabled
    }

    /// Load persisted debug status from the backend. Failures are recorded
    /// in the application log only; startup continues regardless.
    pub async fn load(&self) {
        match self.backend.get_debug_status().await {
            Ok(status) => {
                let mut state = self.state.write().await;
                state.enabled = status.enabled;
                state.log_path = status.log_path;
            }
            Err(e) => {
                log::warn!("[debug] failed to load debug status: {}", e);
            }
        }
    }

    pub async fn enable(&self) -> BackendResult<()> {
        self.set_enabled(true).await
    }

    pub async fn disable(&self) -> BackendResult<()> {
        self.set_enabled(false).await
    }

    pub async fn toggle(&self) -> BackendResult<()> {
        let enabled = self.is_enabled().await;
        self.set_enabled(!enabled).await
    }

    async fn set_enabled(&self, enabled: bool) -> BackendResult<()> {
        self.state.write().await.loading = true;

        let result = self.backend.set_debug_mode(enabled).await;

        // Loading clears on every exit path
        let mut state = self.state.write().await;
        state.loading = false;

        match result {
            Ok(log_path) => {
                state.enabled = enabled;
                if enabled {
                    state.log_path = log_path;
                }
                log::info!(
                    "[debug] debug mode {}",
                    if enabled { "enabled" } else { "disabled" }
                );
                Ok(())
            }
            Err(e) => {
                log::error!("[debug] failed to set debug mode: {}", e);
                Err(e)
            }
        }
    }

    /// Open the backend log directory in the system file browser
    pub async fn open_logs_folder(&self) -> BackendResult<()> {
        self.backend.open_logs_folder().await
    }

    // ========================================================================
    // Log writers (no-ops while debug mode is off)
    // ========================================================================

    pub async fn log(&self, message: &str, context: Option<Value>) {
        self.write_log("info", message, context).await;
    }

    pub async fn warn(&self, message: &str, context: Option<Value>) {
        self.write_log("warn", message, context).await;
    }

    pub async fn error(&self, message: &str, context: Option<Value>) {
        self.write_log("error", message, context).await;
    }

    async fn write_log(&self, level: &str, message: &str, context: Option<Value>) {
        if !self.is_enabled().await {
            return;
        }
        if let Err(e) = self.backend.write_frontend_log(level, message, context).await {
            log::debug!("[debug] dropped frontend log entry: {}", e);
        }
    }

    /// Record one timed backend invocation
    pub async fn log_invoke(
        &self,
        command: &str,
        duration_ms: u64,
        success: bool,
        args: Option<Value>,
        error: Option<String>,
    ) {
        if !self.is_enabled().await {
            return;
        }
        if let Err(e) = self
            .backend
            .write_invoke_log(command, duration_ms, success, args, error)
            .await
        {
            log::debug!("[debug] dropped invoke log entry: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::commands;
    use crate::backend::testing::ScriptedInvoker;

    fn store(invoker: Arc<ScriptedInvoker>) -> DebugStore {
        DebugStore::new(BackendClient::new(invoker))
    }

    #[tokio::test]
    async fn test_load_applies_backend_status() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(
            commands::GET_DEBUG_STATUS,
            serde_json::json!({ "enabled": true, "logPath": "/tmp/mcphub.log" }),
        );

        let store = store(invoker);
        store.load().await;

        let state = store.state().await;
        assert!(state.enabled);
        assert_eq!(state.log_path.as_deref(), Some("/tmp/mcphub.log"));
    }

    #[tokio::test]
    async fn test_load_failure_is_swallowed() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.fail(commands::GET_DEBUG_STATUS, "store unavailable");

        let store = store(invoker);
        store.load().await;

        assert!(!store.is_enabled().await);
    }

    #[tokio::test]
    async fn test_enable_records_log_path() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(
            commands::SET_DEBUG_MODE,
            serde_json::json!("/tmp/mcphub-debug.log"),
        );

        let store = store(invoker);
        store.enable().await.unwrap();

        let state = store.state().await;
        assert!(state.enabled);
        assert!(!state.loading);
        assert_eq!(state.log_path.as_deref(), Some("/tmp/mcphub-debug.log"));
    }

    #[tokio::test]
    async fn test_disable_keeps_last_log_path() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(commands::SET_DEBUG_MODE, serde_json::json!("/tmp/d.log"));
        invoker.respond(commands::SET_DEBUG_MODE, serde_json::Value::Null);

        let store = store(invoker);
        store.enable().await.unwrap();
        store.disable().await.unwrap();

        let state = store.state().await;
        assert!(!state.enabled);
        assert_eq!(state.log_path.as_deref(), Some("/tmp/d.log"));
    }

    #[tokio::test]
    async fn test_enable_failure_propagates_and_clears_loading() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.fail(commands::SET_DEBUG_MODE, "no log dir");

        let store = store(invoker);
        assert!(store.enable().await.is_err());

        let state = store.state().await;
        assert!(!state.enabled);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_log_writers_noop_while_disabled() {
        let invoker = Arc::new(ScriptedInvoker::new());
        let store = store(invoker.clone());

        store.log("hello", None).await;
        store.log_invoke("get_all_mcps", 12, true, None, None).await;

        // No backend call was attempted
        assert_eq!(invoker.call_count(commands::WRITE_FRONTEND_LOG), 0);
        assert_eq!(invoker.call_count(commands::WRITE_INVOKE_LOG), 0);
    }

    #[tokio::test]
    async fn test_log_write_failure_never_surfaces() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(commands::SET_DEBUG_MODE, serde_json::json!("/tmp/d.log"));
        invoker.fail(commands::WRITE_FRONTEND_LOG, "disk full");

        let store = store(invoker.clone());
        store.enable().await.unwrap();

        // Returns normally even though the backend write failed
        store.error("boom", Some(serde_json::json!({ "code": 5 }))).await;
        assert_eq!(invoker.call_count(commands::WRITE_FRONTEND_LOG), 1);
    }
}
