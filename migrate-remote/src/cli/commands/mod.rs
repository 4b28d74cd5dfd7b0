//! Command handlers

mod check;
mod import;

pub use check::handle_check_command;
pub use import::{ImportSummary, handle_import_command, read_records};

use anyhow::{Context, Result};

use super::DestinationArgs;
use crate::config::{DestinationFile, DestinationSettings};

/// Load the settings file and select one migration's destination settings
fn load_settings(args: &DestinationArgs) -> Result<DestinationSettings> {
    let file = DestinationFile::load(&args.config)?;
    let settings = file.settings(&args.migration).with_context(|| {
        let known: Vec<&str> = file.migration_ids().collect();
        format!(
            "No destination settings for migration '{}' in {} (known: {})",
            args.migration,
            args.config.display(),
            if known.is_empty() { "none".to_string() } else { known.join(", ") }
        )
    })?;
    Ok(settings.clone())
}
