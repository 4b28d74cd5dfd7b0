//! Destination settings file, one table per migration id

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::DestinationSettings;

/// Destination settings for several migrations
///
/// ```toml
/// [destinations.orders]
/// url_property = "endpoint"
/// format = "json"
///
/// [destinations.orders.ids]
/// order_id = { type = "string" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DestinationFile {
    #[serde(default)]
    pub destinations: BTreeMap<String, DestinationSettings>,
}

impl DestinationFile {
    /// Read and parse a TOML settings file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read destination settings: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse destination settings: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: DestinationFile = toml::from_str(content)?;
        log::debug!(
            "Loaded destination settings for {} migration(s)",
            file.destinations.len()
        );
        Ok(file)
    }

    /// Settings declared for one migration
    pub fn settings(&self, migration_id: &str) -> Option<&DestinationSettings> {
        self.destinations.get(migration_id)
    }

    pub fn migration_ids(&self) -> impl Iterator<Item = &str> {
        self.destinations.keys().map(|k| k.as_str())
    }
}
