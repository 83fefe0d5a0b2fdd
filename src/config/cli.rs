use crate::config::toml_config::TomlConfig;
use crate::domain::model::Serial;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "salvage-line")]
#[command(about = "Builds a new line of units from parts harvested off an old line")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the donor population size
    #[arg(long)]
    pub donors: Option<usize>,

    /// Override the recipient population size
    #[arg(long)]
    pub recipients: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print reports as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Count units per category tag
    Summary,
    /// Show a recipient and the donor behind each of its parts
    Unit { serial: Serial },
    /// Show a donor and where each of its parts went
    Donor { serial: Serial },
    /// List every unit carrying a category tag
    Model { tag: String },
}

impl CliArgs {
    /// Loads the TOML file (or the defaults) and applies command-line overrides.
    pub fn load_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        // 應用命令列覆蓋設定
        if let Some(donors) = self.donors {
            config.generation.donors = donors;
        }
        if let Some(recipients) = self.recipients {
            config.generation.recipients = recipients;
        }
        if self.seed.is_some() {
            config.generation.seed = self.seed;
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
        if self.verbose {
            config.logging.verbose = true;
        }

        Ok(config)
    }

    /// Describes where the config came from and which values the command line
    /// overrode. Logged by the caller once a subscriber is installed.
    pub fn describe_overrides(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match &self.config {
            Some(path) => lines.push(format!("Loaded configuration from: {}", path.display())),
            None => lines.push("Using built-in default configuration".to_string()),
        }
        if let Some(donors) = self.donors {
            lines.push(format!("Donor count overridden to: {}", donors));
        }
        if let Some(recipients) = self.recipients {
            lines.push(format!("Recipient count overridden to: {}", recipients));
        }
        if let Some(seed) = self.seed {
            lines.push(format!("Seed overridden to: {}", seed));
        }
        lines
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Summary)
    }
}
