//! Filesystem-based resource provider.
//!
//! Paths are resolved relative to a base directory and may not escape it.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tocsmith_traits::{ResourceError, ResourceProvider, SharedResourceData};

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    /// Splits a user-supplied file path into a provider rooted at its parent
    /// directory and the key to load it by.
    pub fn for_file<P: AsRef<Path>>(path: P) -> Option<(Self, String)> {
        let path = path.as_ref();
        let file_name = path.file_name()?.to_str()?.to_string();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Some((Self::new(parent), file_name))
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` when `path` is absolute or would leave the base directory.
    fn resolve_path_safe(&self, path: &str) -> Option<PathBuf> {
        if Path::new(path).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(path);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        if Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self
            .resolve_path_safe(path)
            .ok_or_else(|| ResourceError::NotFound(format!("{} (outside {})", path, self.base_path.display())))?;

        log::debug!("Loading resource from {}", full_path.display());
        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve_path_safe(path).is_some_and(|p| p.exists())
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
