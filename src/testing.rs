//! In-memory API double for unit tests

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::{
    ExportCreate, ExportRecord, ImageRecord, MapTokenRecord, ProjectRecord, QueryParams,
    RasterFoundryApi, SceneRecord,
};
use crate::core::{ClientError, Page, Result};

/// Serves canned records; scenes come back one per page so callers
/// exercise pagination.
#[derive(Default)]
pub struct FakeApi {
    projects: Vec<ProjectRecord>,
    scenes: HashMap<String, Vec<SceneRecord>>,
    map_tokens: Vec<MapTokenRecord>,
    bearer: Option<String>,
    calls: Mutex<Vec<String>>,
    exports: Mutex<Vec<ExportCreate>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_record(id: &str, name: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            name: name.to_string(),
            organization_id: Some("org-1".to_string()),
            extent: None,
            created_at: None,
            visibility: None,
            extra: Map::new(),
        }
    }

    /// Add a project whose scenes hold the given image source URIs
    pub fn with_project(mut self, id: &str, scenes: &[&[&str]]) -> Self {
        self.projects.push(Self::project_record(id, &format!("Project {}", id)));
        let records = scenes
            .iter()
            .enumerate()
            .map(|(i, uris)| SceneRecord {
                id: format!("{}-scene-{}", id, i),
                name: None,
                images: Some(
                    uris.iter()
                        .map(|uri| ImageRecord {
                            id: None,
                            source_uri: Some(uri.to_string()),
                            extra: Map::new(),
                        })
                        .collect(),
                ),
                extra: Map::new(),
            })
            .collect();
        self.scenes.insert(id.to_string(), records);
        self
    }

    pub fn with_scene_without_images(mut self, project_id: &str, scene_id: &str) -> Self {
        self.projects.push(Self::project_record(project_id, "No images"));
        self.scenes.insert(
            project_id.to_string(),
            vec![SceneRecord {
                id: scene_id.to_string(),
                name: None,
                images: None,
                extra: Map::new(),
            }],
        );
        self
    }

    pub fn with_map_token(mut self, id: &str, project_id: &str) -> Self {
        self.map_tokens.push(MapTokenRecord {
            id: id.to_string(),
            name: None,
            project: Some(project_id.to_string()),
            created_at: None,
            extra: Map::new(),
        });
        self
    }

    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    /// Names of the operations called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn exports(&self) -> Vec<ExportCreate> {
        self.exports.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn paginate<T: Clone>(items: &[T], page: u32, size: usize) -> Page<T> {
    let start = page as usize * size;
    let results: Vec<T> = items.iter().skip(start).take(size).cloned().collect();
    Page {
        count: Some(items.len() as u64),
        has_next: start + size < items.len(),
        has_previous: page > 0,
        page,
        page_size: Some(size as u32),
        results,
    }
}

#[async_trait]
impl RasterFoundryApi for FakeApi {
    fn authorize(&mut self, api_token: &str) {
        self.bearer = Some(api_token.to_string());
    }

    async fn post_tokens(&self, refresh_token: &str) -> Result<String> {
        self.record(format!("post_tokens:{}", refresh_token));
        Ok(json!({ "id_token": format!("api-for-{}", refresh_token) }).to_string())
    }

    async fn get_projects(&self, page: u32) -> Result<Page<ProjectRecord>> {
        self.record(format!("get_projects:{}", page));
        Ok(paginate(&self.projects, page, 2))
    }

    async fn get_project(&self, id: &str) -> Result<ProjectRecord> {
        self.record(format!("get_project:{}", id));
        self.projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound {
                resource: "project",
                id: id.to_string(),
            })
    }

    async fn get_project_scenes(&self, id: &str, page: u32) -> Result<Page<SceneRecord>> {
        self.record(format!("get_project_scenes:{}:{}", id, page));
        let scenes = self.scenes.get(id).ok_or_else(|| ClientError::NotFound {
            resource: "project",
            id: id.to_string(),
        })?;
        Ok(paginate(scenes, page, 1))
    }

    async fn get_map_tokens(&self, project_id: Option<&str>, page: u32) -> Result<Page<MapTokenRecord>> {
        self.record(format!("get_map_tokens:{}", page));
        let tokens: Vec<MapTokenRecord> = self
            .map_tokens
            .iter()
            .filter(|t| project_id.is_none() || t.project.as_deref() == project_id)
            .cloned()
            .collect();
        Ok(paginate(&tokens, page, 10))
    }

    async fn get_scenes(&self, params: &QueryParams) -> Result<Value> {
        self.record("get_scenes".to_string());
        Ok(json!({ "params": params.as_pairs() }))
    }

    async fn get_datasources(&self, params: &QueryParams) -> Result<Value> {
        self.record("get_datasources".to_string());
        Ok(json!({ "params": params.as_pairs() }))
    }

    async fn post_exports(&self, export: &ExportCreate) -> Result<ExportRecord> {
        self.record("post_exports".to_string());
        self.exports.lock().unwrap().push(export.clone());
        Ok(ExportRecord {
            id: "export-1".to_string(),
            export_status: Some(export.export_status.clone()),
            export_type: Some(export.export_type.clone()),
            extra: Map::new(),
        })
    }
}
