//! `review show` - print the whole resolved configuration.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::ValueEnum;
use review_config::Configuration;

use crate::GlobalArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

pub fn execute(global: &GlobalArgs, format: OutputFormat) -> Result<ExitCode> {
    let config = super::resolve(global)?;
    print!("{}", render(&config, format)?);
    Ok(ExitCode::SUCCESS)
}

fn render(config: &Configuration, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(config).context("Failed to render YAML"),
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(config).context("Failed to render JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}
