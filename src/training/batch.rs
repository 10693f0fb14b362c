//! Batch execution collaborators

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use super::BatchJob;
use crate::core::Result;

/// Script inside the job container that checks out a branch and runs the command
pub const RUN_SCRIPT: &str = "run_script.sh";

/// Starts named jobs on a batch executor
#[async_trait]
pub trait BatchSubmitter: Send + Sync {
    /// Start `job`; returns the executor's job id
    async fn submit(&self, job: &BatchJob) -> Result<String>;
}

/// Where and how prep jobs run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchJobConfig {
    pub job_queue: String,
    pub job_definition: String,
    /// Branch of the training pipeline repository checked out in the container
    pub branch_name: String,
    pub attempts: u32,
}

impl Default for BatchJobConfig {
    fn default() -> Self {
        Self {
            job_queue: "raster-vision-gpu".to_string(),
            job_definition: "raster-vision-gpu".to_string(),
            branch_name: "develop".to_string(),
            attempts: 1,
        }
    }
}

/// Job submission in the shape batch executors take
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerJobRequest {
    pub job_name: String,
    pub job_queue: String,
    pub job_definition: String,
    pub container_overrides: ContainerOverrides,
    pub retry_strategy: RetryStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerOverrides {
    pub command: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetryStrategy {
    pub attempts: u32,
}

impl ContainerJobRequest {
    pub fn new(config: &BatchJobConfig, job: &BatchJob) -> Self {
        Self {
            job_name: job.name.clone(),
            job_queue: config.job_queue.clone(),
            job_definition: config.job_definition.clone(),
            container_overrides: ContainerOverrides {
                command: vec![
                    RUN_SCRIPT.to_string(),
                    config.branch_name.clone(),
                    job.command.clone(),
                ],
            },
            retry_strategy: RetryStrategy {
                attempts: config.attempts,
            },
        }
    }
}

/// Records submissions without starting anything
#[derive(Debug, Default)]
pub struct DryRunSubmitter {
    config: BatchJobConfig,
    submitted: Mutex<Vec<ContainerJobRequest>>,
}

impl DryRunSubmitter {
    pub fn new(config: BatchJobConfig) -> Self {
        Self {
            config,
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Requests submitted so far
    pub fn submitted(&self) -> Vec<ContainerJobRequest> {
        self.submitted
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BatchSubmitter for DryRunSubmitter {
    async fn submit(&self, job: &BatchJob) -> Result<String> {
        let request = ContainerJobRequest::new(&self.config, job);
        tracing::info!("Dry run: would submit {} to {}", request.job_name, request.job_queue);
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(request);
        }
        Ok(format!("dry-run-{}", job.name))
    }
}
