//! Core data models shared by the API, resource and training layers

mod bbox;
mod endpoint;
mod error;
mod page;

pub use bbox::*;
pub use endpoint::*;
pub use error::*;
pub use page::*;
