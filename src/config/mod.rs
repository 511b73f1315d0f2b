pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::PlaytimeUnit;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOOKUP_ENDPOINT: &str =
    "https://api.minecraftservices.com/minecraft/profile/lookup";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "mc-stats-etl")]
#[command(about = "Aggregate per-player Minecraft stats into a JSON report")]
pub struct CliConfig {
    /// Output file for the report; prints to stdout when omitted
    pub output: Option<String>,

    #[arg(long, default_value = "raw")]
    pub stats_dir: String,

    #[arg(long, default_value = DEFAULT_LOOKUP_ENDPOINT)]
    pub lookup_endpoint: String,

    #[arg(long, value_enum, default_value = "hours")]
    pub playtime_unit: PlaytimeUnit,

    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn lookup_endpoint(&self) -> &str {
        &self.lookup_endpoint
    }

    fn stats_dir(&self) -> &str {
        &self.stats_dir
    }

    fn output_file(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn playtime_unit(&self) -> PlaytimeUnit {
        self.playtime_unit
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("lookup_endpoint", &self.lookup_endpoint)?;
        validation::validate_path("stats_dir", &self.stats_dir)?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        Ok(())
    }
}
