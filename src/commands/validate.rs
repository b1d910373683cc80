use anyhow::{Context, Result};
use std::path::Path;

use friendlang::config::AppConfig;
use friendlang::scheduler::partition_sizes;
use friendlang::storage::load_ids;

pub async fn validate(config_path: &Path, input: Option<&Path>) -> Result<()> {
    let config = AppConfig::from_file(config_path)
        .with_context(|| format!("Failed to load config file: {}", config_path.display()))?;
    config.validate().context("Invalid configuration")?;

    println!("{}", config.display());

    if let Some(input) = input {
        let ids = load_ids(input)
            .await
            .with_context(|| format!("Failed to load steam ids from {}", input.display()))?;

        let sizes = partition_sizes(ids.len(), config.partition_count());
        println!("Input: {} accounts", ids.len());
        for (worker, size) in sizes.iter().enumerate() {
            println!("  [{worker}] {size} accounts");
        }
    }

    println!("Configuration OK");
    Ok(())
}
