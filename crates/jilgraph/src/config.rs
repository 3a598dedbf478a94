//! Configuration management for jilgraph.
//!
//! Settings live in an optional `jilgraph.yaml`:
//!
//! ```yaml
//! status-report:
//!   name-width: 60
//! display:
//!   impact-limit: 10
//! ```
//!
//! Every key is optional; a missing file means all defaults.

use crate::error::{Error, Result};
use jilgraph_formats::StatusReportOptions;
use jilgraph_formats::status::DEFAULT_NAME_WIDTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "jilgraph.yaml";

/// Default number of impacted jobs printed before truncating
pub const DEFAULT_IMPACT_LIMIT: usize = 10;

/// Configuration file structure for jilgraph
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Status-report layout
    pub status_report: StatusReportConfig,

    /// Text output settings
    pub display: DisplayConfig,
}

/// Status-report layout section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct StatusReportConfig {
    /// Width of the job-name column
    pub name_width: usize,
}

impl Default for StatusReportConfig {
    fn default() -> Self {
        Self {
            name_width: DEFAULT_NAME_WIDTH,
        }
    }
}

/// Text output section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DisplayConfig {
    /// Impacted jobs listed per entry before "... and N more"
    pub impact_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            impact_limit: DEFAULT_IMPACT_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration text
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise `jilgraph.yaml` in `dir` is used
    /// when present, and defaults when not.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading configuration");
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading configuration");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Status-report parser options for this configuration
    #[must_use]
    pub fn status_report_options(&self) -> StatusReportOptions {
        StatusReportOptions {
            name_width: self.status_report.name_width,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.status_report.name_width == 0 {
            return Err(Error::Config(
                "status-report.name-width must be greater than 0".to_string(),
            ));
        }
        if self.display.impact_limit == 0 {
            return Err(Error::Config(
                "display.impact-limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
