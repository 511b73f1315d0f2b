use crate::core::ConfigProvider;
use crate::domain::model::PlaytimeUnit;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

/// File-based alternative to the CLI flags, selected with `--config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_lookup_endpoint")]
    pub lookup_endpoint: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            lookup_endpoint: default_lookup_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub stats_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub playtime_unit: PlaytimeUnit,
}

fn default_lookup_endpoint() -> String {
    super::DEFAULT_LOOKUP_ENDPOINT.to_string()
}

impl TomlConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TomlConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

impl ConfigProvider for TomlConfig {
    fn lookup_endpoint(&self) -> &str {
        &self.source.lookup_endpoint
    }

    fn stats_dir(&self) -> &str {
        &self.input.stats_dir
    }

    fn output_file(&self) -> Option<&str> {
        self.report.output.as_deref()
    }

    fn playtime_unit(&self) -> PlaytimeUnit {
        self.report.playtime_unit
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.lookup_endpoint", &self.source.lookup_endpoint)?;
        validation::validate_path("input.stats_dir", &self.input.stats_dir)?;
        if let Some(output) = &self.report.output {
            validation::validate_path("report.output", output)?;
        }
        Ok(())
    }
}
