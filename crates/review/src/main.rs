//! Re:VIEW configuration CLI - Main entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod overrides;

#[derive(Parser)]
#[command(name = "review")]
#[command(version = review_config::toolchain_version())]
#[command(about = "Inspect resolved Re:VIEW build configuration", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Inputs shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Settings file (defaults to ./config.yml when present)
    #[arg(short = 'c', long = "config", global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output target whose settings shadow the top level (e.g. pdfmaker)
    #[arg(short = 'm', long, global = true)]
    pub maker: Option<String>,

    /// Override a setting (KEY=VALUE, dotted keys for nested settings)
    #[arg(short = 's', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one resolved setting
    Get {
        /// Setting name
        key: String,

        /// Print the display name (sequences joined, `name` of mappings)
        #[arg(long, conflicts_with = "names")]
        name: bool,

        /// Print each name on its own line
        #[arg(long)]
        names: bool,
    },

    /// Print the whole resolved configuration
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = commands::show::OutputFormat::Yaml)]
        format: commands::show::OutputFormat,
    },

    /// Check review_version against a toolchain version
    CheckVersion {
        /// Required version (defaults to this toolchain's version)
        required: Option<String>,

        /// Report through the exit status only
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review=info,review_config=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Get { key, name, names } => {
            let mode = if names {
                commands::get::Mode::Names
            } else if name {
                commands::get::Mode::Name
            } else {
                commands::get::Mode::Value
            };
            commands::get::execute(&cli.global, &key, mode)
        }
        Commands::Show { format } => commands::show::execute(&cli.global, format),
        Commands::CheckVersion { required, quiet } => {
            commands::check_version::execute(&cli.global, required.as_deref(), quiet)
        }
    }
}
