pub mod metrics;
pub mod resource;

pub use metrics::{FontRole, TextMeasurer};
pub use resource::{InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData};
