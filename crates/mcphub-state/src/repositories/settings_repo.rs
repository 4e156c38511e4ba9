// Settings repository
// Small client-side settings persisted as a JSON document in the app data
// directory. Currently holds the last-seen application version used by the
// what's-new flow.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::APP_IDENTIFIER;

const SETTINGS_FILENAME: &str = "mcphub.json";
const KEY_LAST_SEEN_VERSION: &str = "lastSeenVersion";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not determine application data directory")]
    NoDataDir,
}

/// JSON-document settings store
#[derive(Clone)]
pub struct SettingsRepository {
    path: PathBuf,
}

impl SettingsRepository {
    /// Repository rooted at the platform app data directory
    pub fn new() -> Result<Self, SettingsError> {
        let dir = dirs::data_dir()
            .ok_or(SettingsError::NoDataDir)?
            .join(APP_IDENTIFIER);
        Ok(Self::with_dir(&dir))
    }

    /// Repository rooted at an explicit directory (tests, portable installs)
    pub fn with_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(SETTINGS_FILENAME),
        }
    }

    pub fn last_seen_version(&self) -> Result<Option<String>, SettingsError> {
        let document = self.read_document()?;
        Ok(document
            .get(KEY_LAST_SEEN_VERSION)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }

    pub fn set_last_seen_version(&self, version: &str) -> Result<(), SettingsError> {
        let mut document = self.read_document()?;
        document.insert(
            KEY_LAST_SEEN_VERSION.to_string(),
            Value::String(version.to_string()),
        );
        self.write_document(&document)
    }

    fn read_document(&self) -> Result<Map<String, Value>, SettingsError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        // A corrupt document is unrecoverable; start fresh rather than
        // wedging every consumer of the store
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Ok(value.as_object().cloned().unwrap_or_default()),
            Err(e) => {
                log::warn!("[settings] unreadable settings document, starting fresh: {}", e);
                Ok(Map::new())
            }
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&Value::Object(document.clone()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
