// MCP library store
// In-memory cache of the MCP library with derived filtered/sorted views.
// load() swallows failures into `error`; mutations propagate so the UI can
// react, and the cache is only touched after the backend call succeeds.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::backend::{BackendClient, BackendResult};
use crate::models::{McpCounts, McpDraft, McpServer, McpType};

#[derive(Default)]
struct LibraryState {
    mcps: Vec<McpServer>,
    is_loading: bool,
    error: Option<String>,
    search: String,
    type_filter: Option<McpType>,
}

#[derive(Clone)]
pub struct McpLibraryStore {
    backend: BackendClient,
    state: Arc<RwLock<LibraryState>>,
}

impl McpLibraryStore {
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            state: Arc::new(RwLock::new(LibraryState::default())),
        }
    }

    /// Full refetch, replacing the local cache
    pub async fn load(&self) {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }

        let result = self.backend.get_all_mcps().await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        match result {
            Ok(mcps) => state.mcps = mcps,
            Err(e) => {
                log::warn!("[mcps] failed to load MCP library: {}", e);
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

    pub async fn mcps(&self) -> Vec<McpServer> {
        self.state.read().await.mcps.clone()
    }

    pub async fn get_by_id(&self, id: i64) -> Option<McpServer> {
        self.state.read().await.mcps.iter().find(|m| m.id == id).cloned()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub async fn create(&self, draft: McpDraft) -> BackendResult<McpServer> {
        let created = self.backend.create_mcp(&draft).await?;
        self.state.write().await.mcps.push(created.clone());
        Ok(created)
    }

    pub async fn update(&self, mcp: McpServer) -> BackendResult<McpServer> {
        let updated = self.backend.update_mcp(&mcp).await?;
        self.replace(&updated).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> BackendResult<()> {
        self.backend.delete_mcp(id).await?;
        self.state.write().await.mcps.retain(|m| m.id != id);
        Ok(())
    }

    /// The copy's fields (name suffix, fresh id) are backend-authoritative,
    /// so the whole collection is refetched instead of patched locally.
    pub async fn duplicate(&self, id: i64) -> BackendResult<McpServer> {
        let copy = self.backend.duplicate_mcp(id).await?;
        self.load().await;
        Ok(copy)
    }

    pub async fn set_favorite(&self, id: i64, favorite: bool) -> BackendResult<McpServer> {
        let updated = self.backend.set_mcp_favorite(id, favorite).await?;
        self.replace(&updated).await;
        Ok(updated)
    }

    async fn replace(&self, updated: &McpServer) {
        let mut state = self.state.write().await;
        if let Some(slot) = state.mcps.iter_mut().find(|m| m.id == updated.id) {
            *slot = updated.clone();
        }
    }

    // ========================================================================
    // Derived views
    // ========================================================================

    pub async fn set_search(&self, query: impl Into<String>) {
        self.state.write().await.search = query.into();
    }

    pub async fn set_type_filter(&self, filter: Option<McpType>) {
        self.state.write().await.type_filter = filter;
    }

    /// Library view filtered by the current query and type filter, sorted
    /// favorites-first then case-insensitively by name.
    pub async fn filtered_mcps(&self) -> Vec<McpServer> {
        let state = self.state.read().await;
        let query = state.search.trim().to_lowercase();

        let mut visible: Vec<McpServer> = state
            .mcps
            .iter()
            .filter(|mcp| {
                if let Some(kind) = state.type_filter {
                    if mcp.mcp_type != kind {
                        return false;
                    }
                }
                if query.is_empty() {
                    return true;
                }
                mcp.name.to_lowercase().contains(&query)
                    || mcp
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
                    || mcp.tags.iter().any(|t| t.to_lowercase().contains(&query))
            })
            .cloned()
            .collect();

        visible.sort_by(|a, b| {
            b.favorite
                .cmp(&a.favorite)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        visible
    }

    /// Total and per-type counts over the unfiltered cache
    pub async fn counts(&self) -> McpCounts {
        let state = self.state.read().await;
        let mut counts = McpCounts {
            total: state.mcps.len(),
            ..McpCounts::default()
        };
        for mcp in &state.mcps {
            match mcp.mcp_type {
                McpType::Stdio => counts.stdio += 1,
                McpType::Http => counts.http += 1,
                McpType::Sse => counts.sse += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::commands;
    use crate::backend::testing::ScriptedInvoker;

    fn mcp_json(id: i64, name: &str, kind: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "type": kind,
            "createdAt": "2026-01-01T00:00:00Z"
        })
    }

    fn store(invoker: Arc<ScriptedInvoker>) -> McpLibraryStore {
        McpLibraryStore::new(BackendClient::new(invoker))
    }

    #[tokio::test]
    async fn test_load_replaces_cache() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([mcp_json(1, "a", "stdio"), mcp_json(2, "b", "http")]),
        );

        let store = store(invoker);
        store.load().await;

        assert_eq!(store.mcps().await.len(), 2);
        assert!(!store.is_loading().await);
        assert!(store.error().await.is_none());
    }

    #[tokio::test]
    async fn test_repeated_loads_never_grow_cache() {
        let invoker = Arc::new(ScriptedInvoker::new());
        let payload = serde_json::json!([mcp_json(1, "a", "stdio"), mcp_json(2, "b", "http")]);
        invoker.respond(commands::GET_ALL_MCPS, payload.clone());
        invoker.respond(commands::GET_ALL_MCPS, payload.clone());
        invoker.respond(commands::GET_ALL_MCPS, payload);

        let store = store(invoker);
        store.load().await;
        store.load().await;
        store.load().await;

        assert_eq!(store.mcps().await.len(), 2);
    }

    #[tokio::test]
    async fn test_load_failure_recorded_not_thrown() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.fail(commands::GET_ALL_MCPS, "database locked");

        let store = store(invoker);
        store.load().await;

        assert!(store.error().await.unwrap().contains("database locked"));
        assert!(!store.is_loading().await);
        assert!(store.mcps().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_clears_previous_error() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.fail(commands::GET_ALL_MCPS, "boom");
        invoker.respond(commands::GET_ALL_MCPS, serde_json::json!([]));

        let store = store(invoker);
        store.load().await;
        assert!(store.error().await.is_some());
        store.load().await;
        assert!(store.error().await.is_none());
    }

    #[tokio::test]
    async fn test_create_appends_returned_record() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(commands::CREATE_MCP, mcp_json(9, "new-mcp", "sse"));

        let store = store(invoker);
        let created = store
            .create(McpDraft {
                name: "new-mcp".to_string(),
                mcp_type: McpType::Sse,
                ..McpDraft::default()
            })
            .await
            .unwrap();

        assert_eq!(created.id, 9);
        assert_eq!(store.mcps().await.len(), 1);
    }

    #[tokio::test]
    async fn test_mutation_failure_leaves_cache_untouched() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(commands::GET_ALL_MCPS, serde_json::json!([mcp_json(1, "a", "stdio")]));
        invoker.fail(commands::DELETE_MCP, "in use by a project");

        let store = store(invoker);
        store.load().await;

        assert!(store.delete(1).await.is_err());
        assert_eq!(store.mcps().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_filters_by_id() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([mcp_json(1, "a", "stdio"), mcp_json(2, "b", "http")]),
        );
        invoker.respond(commands::DELETE_MCP, serde_json::Value::Null);

        let store = store(invoker);
        store.load().await;
        store.delete(1).await.unwrap();

        let mcps = store.mcps().await;
        assert_eq!(mcps.len(), 1);
        assert_eq!(mcps[0].id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_triggers_full_reload() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(commands::GET_ALL_MCPS, serde_json::json!([mcp_json(1, "a", "stdio")]));
        invoker.respond(commands::DUPLICATE_MCP, mcp_json(2, "a (copy)", "stdio"));
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([mcp_json(1, "a", "stdio"), mcp_json(2, "a (copy)", "stdio")]),
        );

        let store = store(invoker.clone());
        store.load().await;
        store.duplicate(1).await.unwrap();

        assert_eq!(invoker.call_count(commands::GET_ALL_MCPS), 2);
        assert_eq!(store.mcps().await.len(), 2);
    }

    #[tokio::test]
    async fn test_counts_per_type() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([
                mcp_json(1, "a", "stdio"),
                mcp_json(2, "b", "http"),
                mcp_json(3, "c", "sse"),
                mcp_json(4, "d", "stdio"),
            ]),
        );

        let store = store(invoker);
        store.load().await;

        assert_eq!(
            store.counts().await,
            McpCounts { total: 4, stdio: 2, http: 1, sse: 1 }
        );
    }

    #[tokio::test]
    async fn test_search_matches_name_description_tags() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([
                mcp_json(1, "test-mcp-1", "stdio"),
                mcp_json(2, "test-mcp-2", "stdio"),
                mcp_json(3, "other-mcp", "stdio"),
            ]),
        );

        let store = store(invoker);
        store.load().await;
        store.set_search("test").await;

        let filtered = store.filtered_mcps().await;
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|m| m.name.starts_with("test-mcp")));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_tags() {
        let invoker = Arc::new(ScriptedInvoker::new());
        let mut tagged = mcp_json(1, "files", "stdio");
        tagged["tags"] = serde_json::json!(["FileSystem", "local"]);
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([tagged, mcp_json(2, "web", "http")]),
        );

        let store = store(invoker);
        store.load().await;
        store.set_search("filesys").await;

        let filtered = store.filtered_mcps().await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[tokio::test]
    async fn test_filter_favorites_first_then_name() {
        let invoker = Arc::new(ScriptedInvoker::new());
        let mut fav = mcp_json(3, "zeta", "stdio");
        fav["favorite"] = serde_json::json!(true);
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([mcp_json(1, "Beta", "stdio"), mcp_json(2, "alpha", "stdio"), fav]),
        );

        let store = store(invoker);
        store.load().await;

        let names: Vec<String> = store
            .filtered_mcps()
            .await
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["zeta", "alpha", "Beta"]);
    }

    #[tokio::test]
    async fn test_type_filter_restricts_view() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([
                mcp_json(1, "a", "stdio"),
                mcp_json(2, "b", "http"),
                mcp_json(3, "c", "sse"),
            ]),
        );

        let store = store(invoker);
        store.load().await;
        store.set_type_filter(Some(McpType::Http)).await;

        let filtered = store.filtered_mcps().await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].mcp_type, McpType::Http);

        // Counts stay aggregated over the unfiltered cache
        assert_eq!(store.counts().await.total, 3);
    }

    #[tokio::test]
    async fn test_set_favorite_updates_single_entry() {
        let invoker = Arc::new(ScriptedInvoker::new());
        invoker.respond(
            commands::GET_ALL_MCPS,
            serde_json::json!([mcp_json(1, "a", "stdio"), mcp_json(2, "b", "stdio")]),
        );
        let mut updated = mcp_json(2, "b", "stdio");
        updated["favorite"] = serde_json::json!(true);
        invoker.respond(commands::SET_MCP_FAVORITE, updated);

        let store = store(invoker);
        store.load().await;
        store.set_favorite(2, true).await.unwrap();

        assert!(!store.get_by_id(1).await.unwrap().favorite);
        assert!(store.get_by_id(2).await.unwrap().favorite);
    }
}
