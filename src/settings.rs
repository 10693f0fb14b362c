//! Settings management for rfclient
//!
//! Handles persistent configuration including:
//! - API host and scheme
//! - Where training manifests are uploaded
//! - Batch queue used for prep jobs
//!
//! Credentials are never stored here; pass them on the command line or
//! through `RF_REFRESH_TOKEN` / `RF_API_TOKEN`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::core::Endpoint;
use crate::training::BatchJobConfig;

pub const DEFAULT_HOST: &str = "app.rasterfoundry.com";
pub const DEFAULT_SCHEME: &str = "https";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API host, e.g. `app.rasterfoundry.com`
    pub host: String,

    /// URL scheme used for API and tile requests
    pub scheme: String,

    /// Root under which training manifests are uploaded
    pub project_config_dir_uri: String,

    /// Per-request timeout in seconds (unset = no timeout)
    pub request_timeout_secs: Option<u64>,

    /// Batch queue settings for prep jobs
    pub batch: BatchJobConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            scheme: DEFAULT_SCHEME.to_string(),
            project_config_dir_uri: Self::default_project_config_dir(),
            request_timeout_secs: None,
            batch: BatchJobConfig::default(),
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("RasterFoundry").join("settings.json"))
    }

    fn default_project_config_dir() -> String {
        let dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("RasterFoundry")
            .join("project-configs");
        dir_uri(&dir)
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable settings at {}: {}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::settings_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine settings path"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;

        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, host: Option<String>, scheme: Option<String>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(scheme) = scheme {
            self.scheme = scheme;
        }
        self
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.scheme.clone(), self.host.clone())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// `file://` URI for a local directory, so the root can sit in a job command
/// even when the path has spaces or backslashes
fn dir_uri(dir: &Path) -> String {
    match Url::from_directory_path(dir) {
        Ok(url) => url.to_string(),
        Err(()) => dir.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::check_argument;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.host, "app.rasterfoundry.com");
        assert_eq!(settings.scheme, "https");
        assert_eq!(settings.endpoint().tile_host, "tiles.rasterfoundry.com");
        assert!(settings.request_timeout().is_none());
        assert_eq!(settings.batch.attempts, 1);
    }

    #[test]
    fn test_default_config_root_fits_job_command() {
        let root = Settings::default().project_config_dir_uri;
        assert!(root.starts_with("file://"));
        assert!(check_argument("project_config_dir_uri", &root).is_ok());
    }

    #[test]
    fn test_dir_uri_encodes_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let uri = dir_uri(&dir.path().join("Application Support"));
        assert!(uri.starts_with("file://"));
        assert!(uri.ends_with("/Application%20Support/"));
        assert!(check_argument("project_config_dir_uri", &uri).is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"host": "rf.example.org", "batch": {"attempts": 3}}"#).unwrap();
        assert_eq!(settings.host, "rf.example.org");
        assert_eq!(settings.scheme, "https");
        assert_eq!(settings.batch.attempts, 3);
        assert_eq!(settings.batch.branch_name, "develop");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default().with_overrides(Some("localhost:9000".to_string()), Some("http".to_string()));
        let endpoint = settings.endpoint();
        assert_eq!(endpoint.api_base(), "http://localhost:9000/api/");
        assert_eq!(endpoint.tile_host, "localhost:9000");
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = Settings::default();
        settings.request_timeout_secs = Some(30);

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();

        assert_eq!(loaded, settings);
        assert_eq!(loaded.request_timeout(), Some(Duration::from_secs(30)));
    }
}
