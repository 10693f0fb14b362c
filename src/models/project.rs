//! A project: a collection of zero or more scenes
//!
//! Follow-up lookups take the API as an argument instead of holding on to the
//! session, so a project never keeps its session alive.

use crate::api::{ProjectRecord, RasterFoundryApi, SceneRecord};
use crate::core::{fetch_all_pages, ClientError, Endpoint, Result};

use super::MapToken;

/// TMS path for a project's tiles; `{z}/{x}/{y}` are left for the map client
const TILE_PATH_TEMPLATE: &str = "/tiles/{id}/{z}/{x}/{y}/";

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    record: ProjectRecord,
}

impl Project {
    pub fn new(record: ProjectRecord) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn record(&self) -> &ProjectRecord {
        &self.record
    }

    pub fn into_record(self) -> ProjectRecord {
        self.record
    }

    fn resolution_error(&self, field: &'static str, reason: impl Into<String>) -> ClientError {
        ClientError::ResourceResolution {
            resource: "project",
            id: self.record.id.clone(),
            field,
            reason: reason.into(),
        }
    }

    /// All scenes in the project, in server order
    pub async fn scenes<A: RasterFoundryApi + ?Sized>(&self, api: &A) -> Result<Vec<SceneRecord>> {
        let id = self.id();
        fetch_all_pages(|page| api.get_project_scenes(id, page)).await
    }

    /// Source URIs of every image in the project, scene by scene.
    ///
    /// Fails rather than returning an empty list when any scene or image
    /// lacks a source, or when the project has no images at all.
    pub async fn image_source_uris<A: RasterFoundryApi + ?Sized>(&self, api: &A) -> Result<Vec<String>> {
        let scenes = self.scenes(api).await?;

        let mut uris = Vec::new();
        for scene in &scenes {
            let images = scene
                .images
                .as_ref()
                .ok_or_else(|| self.resolution_error("image sources", format!("scene {} has no images", scene.id)))?;
            for image in images {
                let uri = image.source_uri.as_ref().ok_or_else(|| {
                    self.resolution_error(
                        "image sources",
                        format!("an image in scene {} has no sourceUri", scene.id),
                    )
                })?;
                uris.push(uri.clone());
            }
        }

        if uris.is_empty() {
            return Err(self.resolution_error(
                "image sources",
                format!("none found across {} scene(s)", scenes.len()),
            ));
        }

        tracing::debug!("Project {} has {} image source(s)", self.id(), uris.len());
        Ok(uris)
    }

    /// First map token issued for this project, if any
    pub async fn map_token<A: RasterFoundryApi + ?Sized>(&self, api: &A) -> Result<Option<MapToken>> {
        let page = api.get_map_tokens(Some(self.id()), 0).await?;
        Ok(page.results.into_iter().next().map(MapToken::new))
    }

    /// Center of the project's extent as `(lat, lon)`.
    ///
    /// Longitudes are shifted into 0..360 before averaging so extents that
    /// straddle the antimeridian get a sensible center.
    pub fn center(&self) -> Result<(f64, f64)> {
        let ring = self
            .record
            .extent
            .as_ref()
            .and_then(|extent| extent.coordinates.first())
            .filter(|ring| ring.iter().all(|coord| coord.len() >= 2) && !ring.is_empty())
            .ok_or_else(|| self.resolution_error("center", "project must have coordinates to calculate a center"))?;

        let shifted = |x: f64| if x < 0.0 { x + 360.0 } else { x };
        let x_min = ring.iter().map(|c| shifted(c[0])).fold(f64::INFINITY, f64::min);
        let x_max = ring.iter().map(|c| shifted(c[0])).fold(f64::NEG_INFINITY, f64::max);
        let y_min = ring.iter().map(|c| c[1]).fold(f64::INFINITY, f64::min);
        let y_max = ring.iter().map(|c| c[1]).fold(f64::NEG_INFINITY, f64::max);

        let lat = (y_min + y_max) / 2.0;
        let mut lon = (x_min + x_max) / 2.0;
        if lon > 180.0 {
            lon -= 360.0;
        }
        Ok((lat, lon))
    }

    /// TMS URL template for this project's tiles
    pub fn tms(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}{}",
            endpoint.tile_base(),
            TILE_PATH_TEMPLATE.replace("{id}", self.id())
        )
    }
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Project - {}>", self.name())
    }
}
