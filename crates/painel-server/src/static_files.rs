use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::ServerError;

/// Build the on-disk path for `requested` below `root`.
///
/// Only plain path components are accepted; `..`, absolute paths and
/// drive prefixes are rejected outright.
fn join_within(root: &Path, requested: &str) -> Result<PathBuf, ServerError> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(requested).components() {
        match component {
            Component::Normal(c) => resolved.push(c),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                warn!(path = %requested, "Path traversal detected");
                return Err(ServerError::NotFound);
            }
        }
    }
    Ok(resolved)
}

/// Content type for a static asset, keyed on its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("html") => "text/html; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Read-only view of the static assets directory.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    root: PathBuf,
}

impl StaticAssets {
    pub fn new(root: PathBuf) -> Self {
        if !root.is_dir() {
            warn!(path = %root.display(), "Static asset directory does not exist");
        } else {
            info!(path = %root.display(), "Serving static assets");
        }
        Self { root }
    }

    /// Read an asset, returning its content type and bytes.
    ///
    /// Anything that cannot be opened as a regular file inside the root,
    /// including symlinks that point outside it, is [`ServerError::NotFound`].
    pub async fn read(&self, requested: &str) -> Result<(&'static str, Vec<u8>), ServerError> {
        let path = join_within(&self.root, requested)?;

        let canonical_root = fs::canonicalize(&self.root)
            .await
            .map_err(|_| ServerError::NotFound)?;
        let canonical = fs::canonicalize(&path)
            .await
            .map_err(|_| ServerError::NotFound)?;
        if !canonical.starts_with(&canonical_root) {
            warn!(path = %requested, "Static asset resolves outside the root");
            return Err(ServerError::NotFound);
        }

        let metadata = fs::metadata(&canonical)
            .await
            .map_err(|_| ServerError::NotFound)?;
        if !metadata.is_file() {
            return Err(ServerError::NotFound);
        }

        let data = fs::read(&canonical).await.map_err(|e| {
            debug!(path = %requested, error = %e, "Failed to read static asset");
            ServerError::NotFound
        })?;

        debug!(path = %requested, size = data.len(), "Serving static asset");
        Ok((content_type_for(&path), data))
    }
}

/// Read the landing document.
pub async fn read_page(path: &Path) -> Result<String, ServerError> {
    fs::read_to_string(path).await.map_err(|e| {
        ServerError::Internal(format!(
            "Failed to read landing page '{}': {}",
            path.display(),
            e
        ))
    })
}
