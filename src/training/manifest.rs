//! Storage for uploaded training manifests

use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;
use uuid::Uuid;

use super::ProjectConfig;
use crate::core::{ClientError, Result};

/// Somewhere a manifest can be uploaded and later read by the batch job
#[async_trait]
pub trait ManifestStore: Send + Sync {
    /// Upload `configs` under `root_uri` and return the URI of the new manifest
    async fn upload(&self, configs: &[ProjectConfig], root_uri: &str) -> Result<String>;
}

/// Fresh, time-ordered manifest file name
pub fn manifest_name() -> String {
    format!("{}.json", Uuid::now_v7())
}

/// Join a manifest file name onto its root URI
pub fn manifest_uri(root_uri: &str, name: &str) -> String {
    format!("{}/{}", root_uri.trim_end_matches('/'), name)
}

/// Writes manifests to the local filesystem.
///
/// Roots may be plain paths or `file://` URIs; the returned URI keeps the
/// form of the root it was given.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalManifestStore;

impl LocalManifestStore {
    pub fn new() -> Self {
        Self
    }

    fn local_dir(root_uri: &str) -> Result<PathBuf> {
        if !root_uri.contains("://") {
            return Ok(PathBuf::from(root_uri));
        }

        let url = Url::parse(root_uri)?;
        if url.scheme() != "file" {
            return Err(ClientError::Manifest(format!(
                "local store cannot write to {}:// locations",
                url.scheme()
            )));
        }
        url.to_file_path()
            .map_err(|_| ClientError::Manifest(format!("{} is not a local path", root_uri)))
    }
}

#[async_trait]
impl ManifestStore for LocalManifestStore {
    async fn upload(&self, configs: &[ProjectConfig], root_uri: &str) -> Result<String> {
        let dir = Self::local_dir(root_uri)?;
        tokio::fs::create_dir_all(&dir).await?;

        let name = manifest_name();
        let body = serde_json::to_vec(configs)?;
        tokio::fs::write(dir.join(&name), body).await?;

        let uri = manifest_uri(root_uri, &name);
        tracing::info!("Uploaded manifest with {} project(s) to {}", configs.len(), uri);
        Ok(uri)
    }
}
