//! reqwest-backed implementation of the Raster Foundry API

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use super::{
    ExportCreate, ExportRecord, MapTokenRecord, ProjectRecord, QueryParams, RasterFoundryApi,
    SceneRecord,
};
use crate::core::{ClientError, Endpoint, Page, Result};

/// HTTP client for one API endpoint.
///
/// Not meant to be shared between concurrent callers; give each task its own
/// session instead.
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
    bearer: Option<String>,
}

impl HttpApi {
    /// Client with no request timeout
    pub fn new(endpoint: &Endpoint) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    pub fn with_timeout(endpoint: &Endpoint, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(endpoint, builder.build()?)
    }

    pub fn with_client(endpoint: &Endpoint, client: reqwest::Client) -> Result<Self> {
        Ok(Self {
            client,
            base: Url::parse(&endpoint.api_base())?,
            bearer: None,
        })
    }

    pub fn is_authorized(&self) -> bool {
        self.bearer.is_some()
    }

    /// Build `{base}/{segments..}/`, percent-encoding each segment
    fn resource_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Endpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, target: (&'static str, &str)) -> Result<Response> {
        let request = match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let (resource, id) = target;
        if status == StatusCode::NOT_FOUND && !id.is_empty() {
            return Err(ClientError::NotFound {
                resource,
                id: id.to_string(),
            });
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("{} request failed with {}", resource, status);
        Err(ClientError::Status {
            status: status.as_u16(),
            url,
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let url = response.url().to_string();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(format!("{}: {}", url, e)))
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        target: (&'static str, &str),
    ) -> Result<Page<T>> {
        let url = self.resource_url(segments)?;
        tracing::debug!("GET {} {:?}", url.path(), query);
        let response = self.send(self.client.get(url).query(query), target).await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl RasterFoundryApi for HttpApi {
    fn authorize(&mut self, api_token: &str) {
        self.bearer = Some(api_token.to_string());
    }

    async fn post_tokens(&self, refresh_token: &str) -> Result<String> {
        let url = self.resource_url(&["tokens"])?;
        tracing::debug!("Exchanging refresh token");
        let request = self
            .client
            .post(url)
            .json(&json!({ "refresh_token": refresh_token }));
        let response = self.send(request, ("token", "")).await?;
        Ok(response.text().await?)
    }

    async fn get_projects(&self, page: u32) -> Result<Page<ProjectRecord>> {
        self.get_page(&["projects"], &[("page", page.to_string())], ("projects", ""))
            .await
    }

    async fn get_project(&self, id: &str) -> Result<ProjectRecord> {
        let url = self.resource_url(&["projects", id])?;
        tracing::debug!("GET {}", url.path());
        let response = self.send(self.client.get(url), ("project", id)).await?;
        Self::decode(response).await
    }

    async fn get_project_scenes(&self, id: &str, page: u32) -> Result<Page<SceneRecord>> {
        self.get_page(
            &["projects", id, "scenes"],
            &[("page", page.to_string())],
            ("project", id),
        )
        .await
    }

    async fn get_map_tokens(&self, project_id: Option<&str>, page: u32) -> Result<Page<MapTokenRecord>> {
        let mut query = vec![("page", page.to_string())];
        if let Some(project_id) = project_id {
            query.push(("project", project_id.to_string()));
        }
        self.get_page(&["map-tokens"], &query, ("map tokens", "")).await
    }

    async fn get_scenes(&self, params: &QueryParams) -> Result<Value> {
        let url = self.resource_url(&["scenes"])?;
        tracing::debug!("GET {} {:?}", url.path(), params);
        let request = self.client.get(url).query(params.as_pairs());
        let response = self.send(request, ("scenes", "")).await?;
        Self::decode(response).await
    }

    async fn get_datasources(&self, params: &QueryParams) -> Result<Value> {
        let url = self.resource_url(&["datasources"])?;
        tracing::debug!("GET {} {:?}", url.path(), params);
        let request = self.client.get(url).query(params.as_pairs());
        let response = self.send(request, ("datasources", "")).await?;
        Self::decode(response).await
    }

    async fn post_exports(&self, export: &ExportCreate) -> Result<ExportRecord> {
        let url = self.resource_url(&["exports"])?;
        tracing::debug!("POST {}", url.path());
        let response = self.send(self.client.post(url).json(export), ("exports", "")).await?;
        Self::decode(response).await
    }
}
