// Global MCP store
// MCPs enabled in the user's global (cross-project) configuration.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend::{BackendClient, BackendResult};
use crate::models::GlobalMcp;

#[derive(Default)]
struct GlobalState {
    mcps: Vec<GlobalMcp>,
    is_loading: bool,
    error: Option<String>,
}

#[derive(Clone)]
pub struct GlobalMcpStore {
    backend: BackendClient,
    state: Arc<RwLock<GlobalState>>,
}

impl GlobalMcpStore {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(GlobalState::default())),
        }
    }

    pub async fn load(&self) {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }

        let result = self.backend.get_global_mcps().await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        match result {
            Ok(mcps) => state.mcps = mcps,
            Err(e) => {
                log::warn!("[global-mcps] failed to load global MCPs: {}", e);
                state.error = Some(e.to_string());
            }
        }
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn mcps(&self) -> Vec<GlobalMcp> {
        self.state.read().await.mcps.clone()
    }

    pub async fn get_by_id(&self, id: i64) -> Option<GlobalMcp> {
        self.state.read().await.mcps.iter().find(|m| m.id == id).cloned()
    }

    /// Enable or disable one global MCP; only the targeted entry is replaced
    pub async fn toggle(&self, id: i64, enabled: bool) -> BackendResult<GlobalMcp> {
        let updated = self.backend.set_global_mcp_enabled(id, enabled).await?;

        let mut state = self.state.write().await;
        if let Some(slot) = state.mcps.iter_mut().find(|m| m.id == updated.id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }
}
