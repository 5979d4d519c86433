#![deny(missing_docs)]
#![doc = "Core data model and error types for the corner-case scene generator."]

pub mod errors;
pub mod orientation;
pub mod scene;

pub use errors::{CcgError, ErrorInfo};
pub use orientation::Orientation;
pub use scene::{AttributeValue, AttributeValues, EntityInstance, EntityKind, Scene};
