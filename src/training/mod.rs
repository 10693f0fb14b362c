//! Training data preparation jobs
//!
//! Turns a list of projects and their annotations into a manifest, uploads
//! it, and starts the remote job that cuts training chips from it.

mod batch;
mod config;
mod job;
mod manifest;

pub use batch::*;
pub use config::*;
pub use job::*;
pub(crate) use job::check_argument;
pub use manifest::*;

use crate::api::RasterFoundryApi;
use crate::core::Result;

/// Everything needed to start one prep job
#[derive(Debug, Clone, PartialEq)]
pub struct PrepTrainDataRequest {
    pub project_ids: Vec<String>,
    /// One annotation URI per project, in the same order
    pub annotation_uris: Vec<String>,
    pub output_zip_uri: String,
    pub label_map_uri: String,
    /// Root under which the manifest is uploaded
    pub project_config_dir_uri: String,
    pub options: PrepTrainDataOptions,
}

/// Assemble and upload the manifest, then submit the prep job.
///
/// Command arguments are validated before any request goes out, so a bad
/// argument never leaves an orphaned manifest behind. Submission errors are
/// returned unchanged.
pub async fn start_prep_train_data_job<A, S, B>(
    api: &A,
    store: &S,
    submitter: &B,
    request: &PrepTrainDataRequest,
) -> Result<String>
where
    A: RasterFoundryApi + ?Sized,
    S: ManifestStore + ?Sized,
    B: BatchSubmitter + ?Sized,
{
    let command = PrepTrainDataCommand::new(
        request.output_zip_uri.clone(),
        request.label_map_uri.clone(),
        request.options.clone(),
    )?;
    check_argument("project_config_dir_uri", &request.project_config_dir_uri)?;

    let configs = assemble_project_configs(api, &request.project_ids, &request.annotation_uris).await?;
    let config_uri = store.upload(&configs, &request.project_config_dir_uri).await?;

    let job = BatchJob::new(command.render(&config_uri)?);
    tracing::info!("Submitting {}", job.name);
    tracing::debug!("Job command: {}", job.command);

    let job_id = submitter.submit(&job).await?;
    tracing::info!("Started job {} ({})", job.name, job_id);
    Ok(job_id)
}
