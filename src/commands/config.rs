use std::path::Path;

use anyhow::Result;
use calview_core::config::CalendarConfig;
use owo_colors::OwoColorize;

pub fn run(override_path: Option<&Path>) -> Result<()> {
    let (config_path, config) = match override_path {
        Some(path) => (path.to_path_buf(), CalendarConfig::load_from(path)?),
        None => (CalendarConfig::config_path()?, CalendarConfig::load()?),
    };

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    for (key, value) in settings(&config)? {
        println!("  {:<24} {}", key, value.dimmed());
    }

    Ok(())
}

/// Effective settings as `(key, value)` pairs, sorted by key.
fn settings(config: &CalendarConfig) -> Result<Vec<(String, String)>> {
    let serde_json::Value::Object(map) = serde_json::to_value(config)? else {
        anyhow::bail!("Config did not serialize to a table");
    };

    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}
