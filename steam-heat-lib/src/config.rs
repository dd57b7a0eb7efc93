use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

/// File looked up in the working directory when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "steam-heat.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Endpoint of the paginated bulk listing
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Endpoint of the per-game achievement percentages
    #[serde(default = "default_achievements_url")]
    pub achievements_url: String,

    /// Number of entities in the final catalog
    #[serde(default = "default_target_count")]
    pub target_count: usize,

    /// First listing page to request
    #[serde(default)]
    pub start_page: u32,

    /// Pause between listing pages
    #[serde(default = "default_page_delay", with = "humantime_serde")]
    pub page_delay: Duration,

    /// Pause after each achievements request
    #[serde(default = "default_item_delay", with = "humantime_serde")]
    pub item_delay: Duration,

    /// Timeout for a single listing request
    #[serde(default = "default_listing_timeout", with = "humantime_serde")]
    pub listing_timeout: Duration,

    /// Timeout for a single achievements request
    #[serde(default = "default_achievements_timeout", with = "humantime_serde")]
    pub achievements_timeout: Duration,
}

fn default_listing_url() -> String {
    crate::catalog::STEAMSPY_API_URL.to_string()
}

fn default_achievements_url() -> String {
    crate::catalog::ACHIEVEMENTS_API_URL.to_string()
}

const fn default_target_count() -> usize {
    1500
}

const fn default_page_delay() -> Duration {
    Duration::from_secs(65)
}

const fn default_item_delay() -> Duration {
    Duration::from_millis(200)
}

const fn default_listing_timeout() -> Duration {
    crate::catalog::DEFAULT_LISTING_TIMEOUT
}

const fn default_achievements_timeout() -> Duration {
    crate::catalog::DEFAULT_ACHIEVEMENTS_TIMEOUT
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `steam-heat.toml` in `base_dir` is used if it exists.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading steam-heat configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading steam-heat configuration file '{path}'")),
            }
        };

        Self::parse(&text).map_err(|e| e.enrich_with(|| format!("loading configuration file '{final_path}'")))
    }

    /// Parse and validate configuration text
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).into_app_err("parsing configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.target_count == 0 {
            return Err(app_err!("target_count must be greater than 0"));
        }

        for (key, value) in [("listing_url", &self.listing_url), ("achievements_url", &self.achievements_url)] {
            let _ = Url::parse(value).into_app_err_with(|| format!("{key} is not a valid URL: '{value}'"))?;
        }

        if self.listing_timeout.is_zero() {
            return Err(app_err!("listing_timeout must be greater than 0"));
        }

        if self.achievements_timeout.is_zero() {
            return Err(app_err!("achievements_timeout must be greater than 0"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
