//! Expedition configuration loader.

use std::path::Path;

use game_core::ExpeditionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for expedition configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`ExpeditionConfig::default`]. The parsed
    /// config is validated before it is returned.
    pub fn load(path: &Path) -> LoadResult<ExpeditionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate config from TOML text.
    pub fn parse(content: &str) -> LoadResult<ExpeditionConfig> {
        let config: ExpeditionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;

        tracing::debug!(
            step_seconds = config.step_seconds,
            retreat_threshold = config.default_retreat_threshold,
            "loaded expedition config"
        );
        Ok(config)
    }
}
