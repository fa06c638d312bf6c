//! Score cache location.
//!
//! The cache lives in the platform cache directory unless a path is given
//! on the command line.

use omaha_data::{DataError, SqliteCache};
use std::path::{Path, PathBuf};

/// Get the default cache directory path.
///
/// Uses platform-specific cache directories:
/// - Linux: `~/.cache/omaha/`
/// - macOS: `~/Library/Caches/omaha/`
/// - Windows: `%LOCALAPPDATA%\omaha\`
pub(crate) fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("omaha")
}

/// Get the default cache database path.
pub(crate) fn default_cache_path() -> PathBuf {
    default_cache_dir().join("omaha.db")
}

/// The override if one was given, otherwise the default path.
pub(crate) fn resolve_cache_path(path: Option<&Path>) -> PathBuf {
    path.map_or_else(default_cache_path, Path::to_path_buf)
}

/// Open the cache, creating the directory if needed.
pub(crate) fn open_cache(path: Option<&Path>) -> Result<SqliteCache, DataError> {
    let cache_path = resolve_cache_path(path);

    if let Some(parent) = cache_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    SqliteCache::new(&cache_path)
}
