// What's-new store
// Detects version changes against the persisted last-seen marker and shows
// release notes fetched from the releases endpoint. The UI always gets a
// release record to render, even when the fetch fails.

use std::sync::Arc;

use reqwest::Client;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::models::ReleaseInfo;
use crate::repositories::SettingsRepository;
use crate::services::release_api::{self, ReleaseError};

#[derive(Debug, Clone, Default)]
pub struct WhatsNewState {
    pub is_open: bool,
    pub is_loading: bool,
    pub release: Option<ReleaseInfo>,
    /// Diagnostic from a failed fetch, shown alongside the fallback record
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct WhatsNewStore {
    http: Client,
    settings: SettingsRepository,
    config: AppConfig,
    state: Arc<RwLock<WhatsNewState>>,
}

impl WhatsNewStore {
    pub fn new(config: AppConfig, settings: SettingsRepository) -> Self {
        Self {
            http: Client::new(),
            settings,
            config,
            state: Arc::new(RwLock::new(WhatsNewState::default())),
        }
    }

    pub async fn state(&self) -> WhatsNewState {
        self.state.read().await.clone()
    }

    /// Startup check: open the notification when the app version changed
    /// since the last dismissal. The very first run only records a baseline.
    pub async fn check_for_whats_new(&self) {
        // An unreadable marker is treated as a first run: record a baseline
        // and stay closed rather than re-showing notes on every launch
        let last_seen = match self.settings.last_seen_version() {
            Ok(marker) => marker,
            Err(e) => {
                log::warn!("[whats-new] failed to read last-seen version: {}", e);
                None
            }
        };

        let current = self.config.app_version.clone();
        match last_seen {
            None => {
                // First run: establish the baseline, show nothing
                if let Err(e) = self.settings.set_last_seen_version(&current) {
                    log::warn!("[whats-new] failed to persist baseline version: {}", e);
                }
            }
            Some(seen) if seen == current => {}
            Some(_) => {
                self.fetch_release_notes(&current).await;
                self.state.write().await.is_open = true;
            }
        }
    }

    /// Fetch release notes for a version: tagged form first, untagged form
    /// as the single retry, synthesized fallback when both fail.
    pub async fn fetch_release_notes(&self, version: &str) {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }

        let tagged = format!("v{}", version);
        let result = match release_api::fetch_by_tag(&self.http, &self.config.releases_api_base, &tagged).await
        {
            Err(ReleaseError::NotFound(_)) => {
                release_api::fetch_by_tag(&self.http, &self.config.releases_api_base, version).await
            }
            other => other,
        };

        let mut state = self.state.write().await;
        state.is_loading = false;
        match result {
            Ok(release) => state.release = Some(release),
            Err(e) => {
                log::warn!("[whats-new] failed to fetch release notes: {}", e);
                state.release = Some(ReleaseInfo::fallback(
                    version,
                    &self.config.releases_page_url,
                ));
                state.error = Some(e.to_string());
            }
        }
    }

    /// Close the notification and advance the marker to the version that was
    /// actually displayed, which may differ from the running version when an
    /// old fetch was on screen.
    pub async fn dismiss(&self) {
        // The lock is released before touching the settings file
        let displayed = {
            let mut state = self.state.write().await;
            state.is_open = false;
            state.release.as_ref().map(|r| r.version.clone())
        };

        if let Some(version) = displayed {
            if let Err(e) = self.settings.set_last_seen_version(&version) {
                log::warn!("[whats-new] failed to persist last-seen version: {}", e);
            }
        }
    }

    /// Open release notes for the running version on demand; the marker is
    /// only advanced by a later dismiss.
    pub async fn show_current_release_notes(&self) {
        let version = self.config.app_version.clone();
        self.fetch_release_notes(&version).await;
        self.state.write().await.is_open = true;
    }
}
