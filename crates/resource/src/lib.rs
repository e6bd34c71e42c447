//! Resource providers backed by the local filesystem.
//!
//! The in-memory provider lives in `tocsmith-traits` and is re-exported here so
//! callers can pick either from one place.

mod filesystem;

pub use filesystem::FilesystemResourceProvider;

pub use tocsmith_traits::InMemoryResourceProvider;
