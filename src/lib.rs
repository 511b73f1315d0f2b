pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{etl::EtlEngine, pipeline::StatsPipeline};
pub use domain::model::{PlayerReport, Playtime, PlaytimeUnit};
pub use utils::error::{Result, StatsError};
