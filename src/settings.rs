use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

pub const DEFAULT_SITE_TOKEN: &str = "TouchDesigner 088";

/// Runtime settings: built-in defaults overlaid by `TDDOCS_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Site/version token in the `" - <token> Wiki"` title suffix.
    pub site_token: String,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            site_token: DEFAULT_SITE_TOKEN.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::with_prefix("TDDOCS"))
    }

    fn from_source(env: Environment) -> Result<Self> {
        let defaults = Settings::default();
        let settings = Config::builder()
            .set_default("site_token", defaults.site_token)?
            .set_default("log_level", defaults.log_level)?
            .add_source(env)
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
