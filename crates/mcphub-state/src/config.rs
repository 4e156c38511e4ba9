// Application configuration
// Carries the values the state layer needs from the host application

/// App identifier (must match the host application's bundle identifier)
#[cfg(target_os = "macos")]
pub const APP_IDENTIFIER: &str = "com.mcphub.MCPHub-macOS";

#[cfg(not(target_os = "macos"))]
pub const APP_IDENTIFIER: &str = "com.mcphub.MCPHub";

/// Releases-by-tag API base for the MCPHub repository
pub const DEFAULT_RELEASES_API_BASE: &str =
    "https://api.github.com/repos/mcphub/mcphub/releases";

/// Human-facing releases page, used as the fallback link when a fetch fails
pub const DEFAULT_RELEASES_PAGE_URL: &str = "https://github.com/mcphub/mcphub/releases";

/// Configuration injected by the host application at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Running application version, without a `v` prefix (e.g. "1.4.0")
    pub app_version: String,
    /// Base URL of the releases-by-tag endpoint (`{base}/tags/{tag}`)
    pub releases_api_base: String,
    /// Link shown when release notes could not be fetched
    pub releases_page_url: String,
}

impl AppConfig {
    pub fn new(app_version: impl Into<String>) -> Self {
        Self {
            app_version: app_version.into(),
            releases_api_base: DEFAULT_RELEASES_API_BASE.to_string(),
            releases_page_url: DEFAULT_RELEASES_PAGE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_releases_endpoint() {
        let config = AppConfig::new("1.0.0");
        assert_eq!(config.app_version, "1.0.0");
        assert!(config.releases_api_base.ends_with("/releases"));
    }
}
