//! Map tokens grant anonymous tile access to a single project

use crate::api::MapTokenRecord;
use crate::core::Endpoint;

use super::Project;

#[derive(Debug, Clone, PartialEq)]
pub struct MapToken {
    record: MapTokenRecord,
}

impl MapToken {
    pub fn new(record: MapTokenRecord) -> Self {
        Self { record }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn name(&self) -> Option<&str> {
        self.record.name.as_deref()
    }

    /// Id of the project this token unlocks
    pub fn project_id(&self) -> Option<&str> {
        self.record.project.as_deref()
    }

    pub fn record(&self) -> &MapTokenRecord {
        &self.record
    }

    /// Tile URL template for `project` that carries this token
    pub fn tile_url(&self, project: &Project, endpoint: &Endpoint) -> String {
        format!("{}?mapToken={}", project.tms(endpoint), self.id())
    }
}

impl std::fmt::Display for MapToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<MapToken - {}>", self.name().unwrap_or(self.id()))
    }
}
