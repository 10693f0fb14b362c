//! Exports pull geospatial data for a project or analysis out of the platform

use serde_json::{json, Value};

use crate::api::{ExportCreate, ExportOptions, ExportRecord, RasterFoundryApi};
use crate::core::{Bbox, Result};

/// Status every new export starts in
const INITIAL_STATUS: &str = "TOBEEXPORTED";

/// What an export reads from. Exactly one target per export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    Project { id: String, organization_id: String },
    Analysis { id: String, organization_id: String },
}

/// Where the exported files go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportType {
    S3,
    #[default]
    Local,
    Dropbox,
}

impl ExportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportType::S3 => "S3",
            ExportType::Local => "LOCAL",
            ExportType::Dropbox => "DROPBOX",
        }
    }
}

impl std::str::FromStr for ExportType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "S3" => Ok(ExportType::S3),
            "LOCAL" => Ok(ExportType::Local),
            "DROPBOX" => Ok(ExportType::Dropbox),
            _ => Err(format!("Invalid export type: {}. Use S3, LOCAL or DROPBOX", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Organization,
    #[default]
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Organization => "ORGANIZATION",
            Visibility::Private => "PRIVATE",
        }
    }
}

/// Parameters of a new export
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub target: ExportTarget,
    /// Region to export
    pub bbox: Bbox,
    /// Zoom level the export is rendered at
    pub zoom: u32,
    pub visibility: Visibility,
    /// Destination for the exported files
    pub source: Option<String>,
    pub export_type: ExportType,
}

impl ExportRequest {
    pub fn new(target: ExportTarget, bbox: impl Into<Bbox>, zoom: u32) -> Self {
        Self {
            target,
            bbox: bbox.into(),
            zoom,
            visibility: Visibility::default(),
            source: None,
            export_type: ExportType::default(),
        }
    }

    /// Request body for the exports endpoint
    pub fn to_create(&self) -> Result<ExportCreate> {
        let (project_id, tool_run_id, organization_id) = match &self.target {
            ExportTarget::Project { id, organization_id } => (Some(id.clone()), None, organization_id.clone()),
            ExportTarget::Analysis { id, organization_id } => (None, Some(id.clone()), organization_id.clone()),
        };

        Ok(ExportCreate {
            export_options: ExportOptions {
                mask: box_mask(self.bbox.to_bounds()?),
                resolution: self.zoom,
            },
            project_id,
            tool_run_id,
            organization_id: Some(organization_id),
            export_status: INITIAL_STATUS.to_string(),
            export_type: self.export_type.as_str().to_string(),
            source: self.source.clone(),
            visibility: self.visibility.as_str().to_string(),
        })
    }
}

/// GeoJSON MultiPolygon holding one box, ring counter-clockwise from the
/// lower-right corner
fn box_mask([min_x, min_y, max_x, max_y]: [f64; 4]) -> Value {
    json!({
        "type": "MultiPolygon",
        "coordinates": [[[
            [max_x, min_y],
            [max_x, max_y],
            [min_x, max_y],
            [min_x, min_y],
            [max_x, min_y],
        ]]],
    })
}

/// A submitted export job
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    record: ExportRecord,
}

impl Export {
    /// Start an asynchronous export job
    pub async fn create<A: RasterFoundryApi + ?Sized>(api: &A, request: &ExportRequest) -> Result<Self> {
        let body = request.to_create()?;
        let record = api.post_exports(&body).await?;
        tracing::info!("Created export {}", record.id);
        Ok(Self { record })
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn status(&self) -> Option<&str> {
        self.record.export_status.as_deref()
    }

    pub fn record(&self) -> &ExportRecord {
        &self.record
    }
}

impl std::fmt::Display for Export {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Export - {}>", self.id())
    }
}
