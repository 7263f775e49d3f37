//! Platform-specific directory utilities
//!
//! Provides consistent directory paths across different operating systems,
//! following platform conventions for cache directories.

use std::path::PathBuf;

/// Get the platform-specific log directory for the expedition client
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/expedition/logs`
/// - Linux: `~/.cache/expedition/logs` (or `$XDG_CACHE_HOME/expedition/logs`)
/// - Windows: `%LOCALAPPDATA%\expedition\logs`
/// - Fallback: `/tmp/expedition/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "expedition")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/expedition"))
        .join("logs")
}

/// Content shipped with the game-content crate.
pub fn bundled_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
}
