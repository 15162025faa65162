use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const DEFAULT_PATTERN: &str = "{list1}_{prefix}{counter}_v{version}";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum VersionStrategy {
    #[default]
    Fixed,
    Incremental,
    Random,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CaseOption {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Title,
}

impl fmt::Display for VersionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fixed => "fixed",
            Self::Incremental => "incremental",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenameConfig {
    pub pattern: String,
    pub start_counter: u64,
    pub version_start: String,
    pub version_increment: f64,
    pub version_strategy: VersionStrategy,
    pub include_files: bool,
    pub include_folders: bool,
    pub recursive: bool,
    pub file_filter: String,
    pub case_option: CaseOption,
    pub custom_list1: Vec<String>,
    pub custom_list2: Vec<String>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            start_counter: 1,
            version_start: "1.0".to_string(),
            version_increment: 0.1,
            version_strategy: VersionStrategy::Fixed,
            include_files: true,
            include_folders: true,
            recursive: false,
            file_filter: "*".to_string(),
            case_option: CaseOption::None,
            custom_list1: Vec::new(),
            custom_list2: Vec::new(),
        }
    }
}

impl RenameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.start_counter < 1 {
            bail!("start counter must be at least 1 (got {})", self.start_counter);
        }
        if !self.version_increment.is_finite() {
            bail!("version increment must be a finite number");
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize configuration")
    }
}

pub fn load_config(path: &Path) -> Result<RenameConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file: {}", path.display()))?;
    let config = toml::from_str::<RenameConfig>(&raw)
        .with_context(|| format!("failed to parse configuration file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
