//! Common types shared by the geodash OGC client crates.

pub mod bbox;
pub mod error;
pub mod layer;

pub use bbox::BoundingBox;
pub use error::{OgcError, OgcResult};
pub use layer::LayerId;
