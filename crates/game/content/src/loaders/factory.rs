//! Content factory for loading expedition content from a data directory.

use std::path::{Path, PathBuf};

use game_core::ExpeditionConfig;

use crate::loaders::{ConfigLoader, LoadResult, Roster, RosterLoader};

/// Content factory that loads all expedition content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── rosters/
///     ├── forest_road.ron
///     └── goblin_warren.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load expedition configuration from `config.toml`.
    ///
    /// A missing file is not an error; the defaults are used instead.
    pub fn load_config(&self) -> LoadResult<ExpeditionConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ExpeditionConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a roster from `rosters/{roster_name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `roster_name` - Name of the roster file (without `.ron` extension)
    /// * `config` - Supplies defaults for values the roster leaves out
    pub fn load_roster(&self, roster_name: &str, config: &ExpeditionConfig) -> LoadResult<Roster> {
        let path = self.rosters_dir().join(format!("{}.ron", roster_name));
        RosterLoader::load(&path, config)
    }

    /// Names of the rosters available under `rosters/`, sorted.
    pub fn roster_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.rosters_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn rosters_dir(&self) -> PathBuf {
        self.data_dir.join("rosters")
    }
}
