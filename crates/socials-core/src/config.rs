use crate::client::{first_page_url, DEFAULT_API_URL};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "IntercomSocials.xlsx";

/// Largest `per_page` the users listing honours.
pub const MAX_PER_PAGE: u32 = 60;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Optional YAML config file. Every key may be omitted; command-line flags
/// and environment variables override what is set here. The API token is
/// never read from or written to this file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub include_empty: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            output: default_output(),
            per_page: None,
            include_empty: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load `path`, or the defaults when no path is given. An explicit path
    /// that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = std::fs::read_to_string(path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if let Err(e) = first_page_url(&self.api_url, self.per_page) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: e.to_string(),
            });
        }

        match self.per_page {
            Some(0) => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "per_page must be at least 1".to_string(),
            }),
            Some(n) if n > MAX_PER_PAGE => warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "per_page={n} exceeds the API maximum of {MAX_PER_PAGE}; the server will cap it"
                ),
            }),
            _ => {}
        }

        if self.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "timeout_secs must be at least 1".to_string(),
            });
        }

        let is_xlsx = self
            .output
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        if !is_xlsx {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "output '{}' does not end in .xlsx; spreadsheet apps may not open it",
                    self.output.display()
                ),
            });
        }

        warnings
    }

    pub fn has_errors(warnings: &[ConfigWarning]) -> bool {
        warnings.iter().any(|w| w.level == WarnLevel::Error)
    }
}
