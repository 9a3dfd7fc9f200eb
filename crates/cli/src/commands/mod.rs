//! Subcommand implementations.

pub mod chat;
pub mod compare;
pub mod doctor;
pub mod guide;
pub mod quiz;
pub mod recommend;
pub mod serve;

use lappybot_catalog::Catalog;
use lappybot_config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Load the config and apply the `--catalog` override.
pub fn load_config(catalog: Option<PathBuf>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(path) = catalog {
        debug!(path = %path.display(), "Catalog path overridden");
        config.catalog.path = path;
    }
    Ok(config)
}

/// The configured catalog. Unlike the gateway, commands fail fast when it
/// cannot be read.
pub fn load_catalog(config: &AppConfig) -> Result<Arc<Catalog>, Box<dyn std::error::Error>> {
    let catalog = Catalog::load(&config.catalog.path)?;
    Ok(Arc::new(catalog))
}
