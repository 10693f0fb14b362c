//! Views over single API records

mod export;
mod map_token;
mod project;

pub use export::{Export, ExportRequest, ExportTarget, ExportType, Visibility};
pub use map_token::MapToken;
pub use project::Project;
