use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "company_check";
const ENV_PREFIX: &str = "COMPANY_CHECK";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path or http(s) URL of the newline-delimited company list.
    pub companies: String,
    /// Quiet period after a navigation before the page is checked.
    pub settle_delay_ms: u64,
    /// Extra checks after landing on a job listing, for late-rendered content.
    pub listing_recheck_ms: Vec<u64>,
}

impl Settings {
    /// Defaults, then `company_check.toml` if present, then `COMPANY_CHECK_*` env vars.
    pub fn load() -> Result<Self> {
        let builder = defaults()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("listing_recheck_ms"),
            );
        finish(builder)
    }

    #[cfg(test)]
    fn from_file(path: &std::path::Path) -> Result<Self> {
        finish(defaults()?.add_source(File::from(path).format(config::FileFormat::Toml)))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn listing_rechecks(&self) -> Vec<Duration> {
        self.listing_recheck_ms
            .iter()
            .map(|ms| Duration::from_millis(*ms))
            .collect()
    }
}

fn defaults() -> Result<ConfigBuilder<config::builder::DefaultState>> {
    Ok(Config::builder()
        .set_default("companies", "companies.txt")?
        .set_default("settle_delay_ms", 1000)?
        .set_default("listing_recheck_ms", vec![3000, 5000])?)
}

fn finish(builder: ConfigBuilder<config::builder::DefaultState>) -> Result<Settings> {
    builder
        .build()
        .context("Failed to read settings")?
        .try_deserialize()
        .context("Invalid settings")
}
