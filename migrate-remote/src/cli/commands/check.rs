//! `check` command: pre-flight validation of destination settings

use anyhow::{Context, Result};
use colored::*;

use super::load_settings;
use crate::cli::DestinationArgs;

pub fn handle_check_command(args: DestinationArgs) -> Result<()> {
    let settings = load_settings(&args)?;
    let config = settings
        .check_requirements()
        .with_context(|| format!("Destination for '{}' is misconfigured", args.migration))?;

    println!(
        "{} destination for {}",
        "OK".bright_green().bold(),
        args.migration.cyan()
    );
    println!("  url property: {}", config.url_property());
    println!("  format:       {}", config.format());

    let tracked = if config.expected_ids().is_some() {
        "from response"
    } else {
        "not tracked"
    };
    println!("  identifiers ({}):", tracked.dimmed());
    for (name, descriptor) in config.identifier_schema().iter() {
        println!("    {} {}", name, descriptor.id_type.to_string().dimmed());
    }

    if config.field_schema().is_empty() {
        println!("  fields:       {}", "(none declared)".dimmed());
    } else {
        println!("  fields:");
        for (name, description) in config.field_schema() {
            match description.as_str() {
                Some(text) => println!("    {} {}", name, text.dimmed()),
                None => println!("    {}", name),
            }
        }
    }

    Ok(())
}
