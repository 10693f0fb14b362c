//! Raster Foundry REST API surface
//!
//! Every remote operation the client uses is one method on [`RasterFoundryApi`].
//! [`HttpApi`] is the reqwest-backed implementation; tests substitute their own.

mod http;
mod records;

use async_trait::async_trait;
use serde_json::Value;

use crate::core::{Page, Result};

pub use http::HttpApi;
pub use records::*;

/// Ordered query string parameters passed through to list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a parameter, replacing any earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Operations exposed by the Raster Foundry API
#[async_trait]
pub trait RasterFoundryApi: Send + Sync {
    /// Attach the bearer credential used for every later call
    fn authorize(&mut self, api_token: &str);

    /// Exchange a refresh token; returns the raw response body
    async fn post_tokens(&self, refresh_token: &str) -> Result<String>;

    async fn get_projects(&self, page: u32) -> Result<Page<ProjectRecord>>;

    async fn get_project(&self, id: &str) -> Result<ProjectRecord>;

    async fn get_project_scenes(&self, id: &str, page: u32) -> Result<Page<SceneRecord>>;

    /// List map tokens, optionally only those for one project
    async fn get_map_tokens(&self, project_id: Option<&str>, page: u32) -> Result<Page<MapTokenRecord>>;

    async fn get_scenes(&self, params: &QueryParams) -> Result<Value>;

    async fn get_datasources(&self, params: &QueryParams) -> Result<Value>;

    async fn post_exports(&self, export: &ExportCreate) -> Result<ExportRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_replace_keeps_order() {
        let mut params = QueryParams::new().with("datasource", "landsat").with("bbox", "0,0,1,1");
        params.insert("datasource", "sentinel");
        assert_eq!(
            params.as_pairs(),
            &[
                ("datasource".to_string(), "sentinel".to_string()),
                ("bbox".to_string(), "0,0,1,1".to_string()),
            ]
        );
        assert_eq!(params.get("bbox"), Some("0,0,1,1"));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn test_query_params_from_iter() {
        let params: QueryParams = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.get("a"), Some("1"));
        assert!(!params.is_empty());
    }
}
