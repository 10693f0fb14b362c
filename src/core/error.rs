//! Error taxonomy for the Raster Foundry client

use thiserror::Error;

/// Errors surfaced by the client library.
///
/// Remote failures are passed through as-is. Nothing in this crate retries,
/// backs off or swallows an error.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Must provide either a refresh token or API token")]
    CredentialConfiguration,

    #[error("Error using refresh token, please verify it is valid: {0}")]
    CredentialExchange(String),

    #[error("Could not resolve {field} for {resource} {id}: {reason}")]
    ResourceResolution {
        resource: &'static str,
        id: String,
        field: &'static str,
        reason: String,
    },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Invalid API endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{url} returned {status}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Got {projects} project ids but {annotations} annotation URIs")]
    PairingMismatch { projects: usize, annotations: usize },

    #[error("Channel order needs exactly 3 channel indices, got {0}")]
    InvalidChannelOrder(usize),

    #[error("Refusing to place {name} value {value:?} in a job command")]
    UnsafeJobArgument { name: &'static str, value: String },

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    #[error("Manifest upload failed: {0}")]
    Manifest(String),

    #[error("Batch submission failed: {0}")]
    Submission(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the error came from bad or missing credentials
    pub fn is_auth(&self) -> bool {
        match self {
            ClientError::CredentialConfiguration | ClientError::CredentialExchange(_) => true,
            ClientError::Status { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Whether the error is caller input that failed validation
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::PairingMismatch { .. }
                | ClientError::InvalidChannelOrder(_)
                | ClientError::UnsafeJobArgument { .. }
                | ClientError::InvalidBbox(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
