// Project store
// Projects and their per-project MCP assignments. Assignment add/remove is
// cross-entity, so the collection is refetched after those calls instead of
// patched locally; the backend stays authoritative.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend::{BackendClient, BackendResult};
use crate::models::Project;

#[derive(Default)]
struct ProjectsState {
    projects: Vec<Project>,
    is_loading: bool,
    error: Option<String>,
}

#[derive(Clone)]
pub struct ProjectStore {
    backend: BackendClient,
    state: Arc<RwLock<ProjectsState>>,
}

impl ProjectStore {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(ProjectsState::default())),
        }
    }

    pub async fn load(&self) {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }

        let result = self.backend.get_projects().await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        match result {
            Ok(projects) => state.projects = projects,
            Err(e) => {
                log::warn!("[projects] failed to load projects: {}", e);
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

    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    pub async fn get_by_id(&self, id: i64) -> Option<Project> {
        self.state
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Assign an MCP to a project, then refetch the collection
    pub async fn assign_mcp(&self, project_id: i64, mcp_id: i64) -> BackendResult<()> {
        self.backend.assign_mcp_to_project(project_id, mcp_id).await?;
        self.load().await;
        Ok(())
    }

    /// Remove an MCP from a project, then refetch the collection
    pub async fn remove_mcp(&self, project_id: i64, mcp_id: i64) -> BackendResult<()> {
        self.backend
            .remove_mcp_from_project(project_id, mcp_id)
            .await?;
        self.load().await;
        Ok(())
    }

    /// Toggle one assignment; the backend returns the updated project which
    /// replaces the cached entry
    pub async fn toggle_mcp(
        &self,
        project_id: i64,
        mcp_id: i64,
        enabled: bool,
    ) -> BackendResult<Project> {
        let updated = self
            .backend
            .set_project_mcp_enabled(project_id, mcp_id, enabled)
            .await?;

        let mut state = self.state.write().await;
        if let Some(slot) = state.projects.iter_mut().find(|p| p.id == updated.id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Rewrite the project's MCP config file from backend state
    pub async fn sync_config(&self, project_id: i64) -> BackendResult<()> {
        self.backend.sync_project_config(project_id).await
    }
}
