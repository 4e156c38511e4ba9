// Release metadata models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw payload of the GitHub releases-by-tag endpoint (only the fields we use)
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    pub name: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub html_url: String,
}

/// Release metadata as shown by the what's-new notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseInfo {
    /// Version without a `v` prefix
    pub version: String,
    /// Display name, falls back to the tag when the release has none
    pub name: String,
    /// Raw markdown body
    pub body: String,
    pub published_at: DateTime<Utc>,
    pub html_url: String,
}

impl From<GithubRelease> for ReleaseInfo {
    fn from(release: GithubRelease) -> Self {
        let version = release
            .tag_name
            .strip_prefix('v')
            .unwrap_or(&release.tag_name)
            .to_string();

        Self {
            version,
            name: release.name.unwrap_or_else(|| release.tag_name.clone()),
            body: release.body.unwrap_or_default(),
            published_at: release.published_at.unwrap_or_else(Utc::now),
            html_url: release.html_url,
        }
    }
}

impl ReleaseInfo {
    /// Synthesized record shown when release notes could not be fetched;
    /// the UI always has something to render.
    pub fn fallback(version: &str, releases_page_url: &str) -> Self {
        Self {
            version: version.to_string(),
            name: format!("MCPHub {}", version),
            body: "Release notes are not available right now. \
                   See the releases page for details."
                .to_string(),
            published_at: Utc::now(),
            html_url: releases_page_url.to_string(),
        }
    }
}
