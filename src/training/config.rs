//! Per-project entries of a training data manifest

use serde::{Deserialize, Serialize};

use crate::api::RasterFoundryApi;
use crate::core::{ClientError, Result};
use crate::models::Project;

/// Images and annotations for one project.
///
/// The remote job reads these positionally, so manifest order is the order
/// the projects were requested in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub images: Vec<String>,
    pub annotations: String,
}

/// Build one [`ProjectConfig`] per `(project id, annotation URI)` pair.
///
/// The two lists must be the same length; a mismatch is rejected before any
/// request is made.
pub async fn assemble_project_configs<A: RasterFoundryApi + ?Sized>(
    api: &A,
    project_ids: &[String],
    annotation_uris: &[String],
) -> Result<Vec<ProjectConfig>> {
    if project_ids.len() != annotation_uris.len() {
        return Err(ClientError::PairingMismatch {
            projects: project_ids.len(),
            annotations: annotation_uris.len(),
        });
    }

    let mut configs = Vec::with_capacity(project_ids.len());
    for (project_id, annotation_uri) in project_ids.iter().zip(annotation_uris) {
        let project = Project::new(api.get_project(project_id).await?);
        let images = project.image_source_uris(api).await?;
        tracing::debug!("Project {} contributes {} image(s)", project.id(), images.len());
        configs.push(ProjectConfig {
            images,
            annotations: annotation_uri.clone(),
        });
    }

    Ok(configs)
}
