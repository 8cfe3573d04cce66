use std::path::Path;

use crate::error::BenchError;

/// Removes the tool's cache so the next command starts cold.
///
/// A cache that does not exist is already clean.
pub async fn clear_cache(path: &Path) -> Result<(), BenchError> {
    let cache_err = |source: std::io::Error| BenchError::CacheClear {
        path: path.to_path_buf(),
        source,
    };

    let meta = match tokio::fs::symlink_metadata(path).await {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(cache_err(e)),
    };

    if meta.is_dir() {
        tokio::fs::remove_dir_all(path).await.map_err(cache_err)?;
    } else {
        tokio::fs::remove_file(path).await.map_err(cache_err)?;
    }
    tracing::debug!(target: "cmdbench.engine", path = %path.display(), "cache cleared");
    Ok(())
}
