use crate::config::toml_config::SiteConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "carpark")]
#[command(about = "Parking slot registry for a single site")]
pub struct CliConfig {
    /// Path to a TOML site file (defaults to slots A001 and B001)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Extra slot to open at start-up, may be repeated
    #[arg(long = "slot", value_name = "ID")]
    pub slots: Vec<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON on stderr")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn load_site(&self) -> Result<SiteConfig> {
        match &self.config {
            Some(path) => SiteConfig::from_file(path),
            None => Ok(SiteConfig::default()),
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validate_non_empty_string("--config", path)?;
        }
        for slot in &self.slots {
            validate_non_empty_string("--slot", slot)?;
        }
        Ok(())
    }
}
