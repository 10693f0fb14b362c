//! Authenticated session against the Raster Foundry API
//!
//! A session resolves its API token once, either as given or by exchanging a
//! refresh token, and attaches it to every call for its whole lifetime. There
//! is no refresh on expiry: build a new session when the token runs out.

use serde_json::Value;
use std::time::Duration;

use crate::api::{HttpApi, QueryParams, RasterFoundryApi, TokenResponse};
use crate::core::{fetch_all_pages, Bbox, ClientError, Endpoint, Result};
use crate::models::{MapToken, Project};
use crate::training::{self, ManifestStore, BatchSubmitter, PrepTrainDataRequest, ProjectConfig};

/// Credential a session is built from
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Long-lived token exchanged for an API token at connect time
    RefreshToken(String),
    /// Ready-to-use bearer token
    ApiToken(String),
}

impl Credentials {
    /// Pick the credential to use from optional inputs.
    ///
    /// An API token wins when both are given. Empty strings count as missing.
    pub fn resolve(refresh_token: Option<String>, api_token: Option<String>) -> Result<Self> {
        let present = |token: Option<String>| token.filter(|t| !t.trim().is_empty());
        match (present(refresh_token), present(api_token)) {
            (_, Some(api_token)) => Ok(Credentials::ApiToken(api_token)),
            (Some(refresh_token), None) => Ok(Credentials::RefreshToken(refresh_token)),
            (None, None) => Err(ClientError::CredentialConfiguration),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::RefreshToken(_) => f.write_str("RefreshToken(<redacted>)"),
            Credentials::ApiToken(_) => f.write_str("ApiToken(<redacted>)"),
        }
    }
}

/// Exchange a refresh token for an API token
pub async fn exchange<A: RasterFoundryApi + ?Sized>(api: &A, refresh_token: &str) -> Result<String> {
    let body = api.post_tokens(refresh_token).await?;
    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| ClientError::CredentialExchange(e.to_string()))?;
    tracing::debug!("Refresh token exchanged for API token");
    Ok(token.id_token)
}

/// Filters for the scenes listing
#[derive(Debug, Clone, Default)]
pub struct SceneQuery {
    pub bbox: Option<Bbox>,
    pub params: QueryParams,
}

impl SceneQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bbox(mut self, bbox: impl Into<Bbox>) -> Self {
        self.bbox = Some(bbox.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Query parameters with the bbox resolved to its comma-joined form
    pub fn to_params(&self) -> QueryParams {
        let mut params = self.params.clone();
        if let Some(bbox) = &self.bbox {
            params.insert("bbox", bbox.to_query_value());
        }
        params
    }
}

/// An authenticated connection to the API
pub struct Session<A = HttpApi> {
    api: A,
    api_token: String,
    endpoint: Endpoint,
}

impl Session<HttpApi> {
    /// Connect over HTTP, exchanging the refresh token if that is what we got
    pub async fn connect(endpoint: Endpoint, credentials: Credentials) -> Result<Self> {
        Self::connect_with_timeout(endpoint, credentials, None).await
    }

    pub async fn connect_with_timeout(
        endpoint: Endpoint,
        credentials: Credentials,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api = HttpApi::with_timeout(&endpoint, timeout)?;
        Session::with_api(api, endpoint, credentials).await
    }
}

impl<A: RasterFoundryApi> Session<A> {
    /// Build a session over any API implementation
    pub async fn with_api(mut api: A, endpoint: Endpoint, credentials: Credentials) -> Result<Self> {
        let api_token = match credentials {
            Credentials::ApiToken(token) => token,
            Credentials::RefreshToken(refresh_token) => exchange(&api, &refresh_token).await?,
        };
        api.authorize(&api_token);
        tracing::debug!("Session ready for {}", endpoint.host);

        Ok(Self {
            api,
            api_token,
            endpoint,
        })
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Every project the user can see, in server order
    pub async fn projects(&self) -> Result<Vec<Project>> {
        let api = &self.api;
        fetch_all_pages(|page| async move { api.get_projects(page).await.map(|p| p.map(Project::new)) })
            .await
    }

    /// Every map token the user can see, in server order
    pub async fn map_tokens(&self) -> Result<Vec<MapToken>> {
        let api = &self.api;
        fetch_all_pages(|page| async move {
            api.get_map_tokens(None, page)
                .await
                .map(|p| p.map(MapToken::new))
        })
        .await
    }

    pub async fn project(&self, id: &str) -> Result<Project> {
        Ok(Project::new(self.api.get_project(id).await?))
    }

    /// Raw scenes response for the given filters
    pub async fn scenes(&self, query: &SceneQuery) -> Result<Value> {
        self.api.get_scenes(&query.to_params()).await
    }

    /// Raw datasources response for the given filters
    pub async fn datasources(&self, params: &QueryParams) -> Result<Value> {
        self.api.get_datasources(params).await
    }

    /// Training manifest entries for paired projects and annotations
    pub async fn project_configs(
        &self,
        project_ids: &[String],
        annotation_uris: &[String],
    ) -> Result<Vec<ProjectConfig>> {
        training::assemble_project_configs(&self.api, project_ids, annotation_uris).await
    }

    /// Upload a training manifest and start the prep job; returns the job id
    pub async fn start_prep_train_data_job<S, B>(
        &self,
        store: &S,
        submitter: &B,
        request: &PrepTrainDataRequest,
    ) -> Result<String>
    where
        S: ManifestStore + ?Sized,
        B: BatchSubmitter + ?Sized,
    {
        training::start_prep_train_data_job(&self.api, store, submitter, request).await
    }
}
