//! MCPHub state layer
//!
//! In-memory UI state for the MCPHub desktop application: entity stores
//! backed by the host's command boundary, toast notifications, debug log
//! relay, console interception and the what's-new release flow.

pub mod backend;
pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod stores;

use std::sync::Arc;

pub use backend::{BackendClient, BackendError, Invoker, TimedInvoker};
pub use config::AppConfig;
pub use repositories::SettingsRepository;

use stores::{
    DebugStore, GlobalMcpStore, McpLibraryStore, NotificationCenter, ProjectStore, WhatsNewStore,
};

/// Typed application context holding the single shared instance of every
/// store. Constructed once at startup and handed to the UI layer.
pub struct AppContext {
    pub config: AppConfig,
    pub notifications: NotificationCenter,
    pub debug: DebugStore,
    pub mcps: McpLibraryStore,
    pub projects: ProjectStore,
    pub global_mcps: GlobalMcpStore,
    pub whats_new: WhatsNewStore,
}

impl AppContext {
    pub fn new(
        invoker: Arc<dyn Invoker>,
        config: AppConfig,
        settings: SettingsRepository,
    ) -> Self {
        // The debug relay talks to the raw invoker: its own log writes must
        // not pass through the timing decorator and log themselves.
        let debug = DebugStore::new(BackendClient::new(invoker.clone()));
        let timed: Arc<dyn Invoker> = Arc::new(TimedInvoker::new(invoker, debug.clone()));
        let backend = BackendClient::new(timed);

        Self {
            notifications: NotificationCenter::new(),
            debug,
            mcps: McpLibraryStore::new(backend.clone()),
            projects: ProjectStore::new(backend.clone()),
            global_mcps: GlobalMcpStore::new(backend),
            whats_new: WhatsNewStore::new(config.clone(), settings),
            config,
        }
    }

    /// Kick off the passive startup loads. Each swallows its own failures,
    /// so startup order does not matter.
    pub async fn load_all(&self) {
        self.debug.load().await;
        self.mcps.load().await;
        self.projects.load().await;
        self.global_mcps.load().await;
        self.whats_new.check_for_whats_new().await;
    }
}
