//! Wire records returned and accepted by the Raster Foundry API
//!
//! Only the fields this crate reads are typed; everything else is kept in
//! `extra` so callers still see the full record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response body of the token exchange endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub id_token: String,
}

/// GeoJSON polygon describing a project's footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub extent: Option<Extent>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTokenRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Project the token grants access to
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Absent when the server omits image details for the scene
    #[serde(default)]
    pub images: Option<Vec<ImageRecord>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source_uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of an export creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportCreate {
    pub export_options: ExportOptions,
    pub project_id: Option<String>,
    pub tool_run_id: Option<String>,
    pub organization_id: Option<String>,
    pub export_status: String,
    pub export_type: String,
    pub source: Option<String>,
    pub visibility: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportOptions {
    /// GeoJSON MultiPolygon limiting the exported area
    pub mask: Value,
    pub resolution: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub id: String,
    #[serde(default)]
    pub export_status: Option<String>,
    #[serde(default)]
    pub export_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_record_keeps_unknown_fields() {
        let record: ProjectRecord = serde_json::from_str(
            r#"{"id": "p1", "name": "Harbor", "organizationId": "org", "tileVisibility": "PUBLIC"}"#,
        )
        .unwrap();
        assert_eq!(record.organization_id.as_deref(), Some("org"));
        assert!(record.extent.is_none());
        assert_eq!(record.extra.get("tileVisibility"), Some(&Value::from("PUBLIC")));
    }

    #[test]
    fn test_scene_without_images() {
        let scene: SceneRecord = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        assert!(scene.images.is_none());
    }

    #[test]
    fn test_export_create_serializes_nulls() {
        let body = ExportCreate {
            export_options: ExportOptions {
                mask: Value::Null,
                resolution: 12,
            },
            project_id: Some("p1".to_string()),
            tool_run_id: None,
            organization_id: Some("org".to_string()),
            export_status: "TOBEEXPORTED".to_string(),
            export_type: "LOCAL".to_string(),
            source: None,
            visibility: "PRIVATE".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["projectId"], "p1");
        assert!(json["toolRunId"].is_null());
        assert_eq!(json["exportOptions"]["resolution"], 12);
    }
}
