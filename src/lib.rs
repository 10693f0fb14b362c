//! rfclient - client library for the Raster Foundry imagery API
//!
//! - Authenticated sessions from an API token or a refresh token
//! - Paginated listing of projects and map tokens, filtered scene and
//!   datasource queries
//! - Training data preparation jobs built from project imagery and annotations

pub mod api;
pub mod core;
pub mod logging;
pub mod models;
pub mod session;
pub mod settings;
pub mod training;

#[cfg(test)]
mod testing;

pub use crate::core::{Bbox, ClientError, Endpoint, HasBounds, Page, Result};
pub use crate::models::{Export, MapToken, Project};
pub use crate::session::{Credentials, SceneQuery, Session};
