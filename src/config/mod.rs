#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use crate::view::DEFAULT_GAUGE_RADIUS;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "resume-dash")]
#[command(about = "Upload resumes to a parsing service and show the ATS dashboard")]
pub struct CliConfig {
    /// Resume files, each submitted as its own selection, in order
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Base URL of the parsing service (`/parse` is appended)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Job description text sent with every resume
    #[arg(long, conflicts_with = "job_description_file")]
    pub job_description: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub job_description_file: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Give up on a request after this many seconds (default: wait forever)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Print the parsed result as JSON instead of the dashboard
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Effective settings after merging the config file and the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub timeout: Option<Duration>,
    pub job_description: String,
    pub gauge_radius: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            job_description: String::new(),
            gauge_radius: DEFAULT_GAUGE_RADIUS,
        }
    }
}

/// Command line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub job_description: Option<String>,
    pub job_description_file: Option<String>,
}

impl Settings {
    /// 命令列優先，其次是 TOML，最後是預設值
    pub fn resolve(file: Option<&TomlConfig>, overrides: Overrides) -> Result<Self> {
        let defaults = TomlConfig::default();
        let file = file.unwrap_or(&defaults);
        file.validate()?;

        let endpoint = overrides
            .endpoint
            .or_else(|| file.backend.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let timeout = overrides
            .timeout_seconds
            .or(file.backend.timeout_seconds)
            .map(Duration::from_secs);

        let job_description = match (overrides.job_description, overrides.job_description_file) {
            (Some(text), _) => text,
            (None, Some(path)) => read_job_description(&path)?,
            (None, None) => match (&file.input.job_description, &file.input.job_description_file)
            {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => read_job_description(path)?,
                (None, None) => String::new(),
            },
        };

        let settings = Self {
            endpoint,
            timeout,
            job_description,
            gauge_radius: file.view.gauge_radius.unwrap_or(DEFAULT_GAUGE_RADIUS),
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn read_job_description(path: &str) -> Result<String> {
    validation::validate_path("job_description_file", path)?;
    std::fs::read_to_string(path).map_err(|e| DashError::InvalidConfigValueError {
        field: "job_description_file".to_string(),
        value: path.to_string(),
        reason: e.to_string(),
    })
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        if let Some(timeout) = self.timeout {
            validation::validate_positive_number("timeout_seconds", timeout.as_secs(), 1)?;
        }
        validation::validate_positive_float("gauge_radius", self.gauge_radius)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            timeout_seconds: self.timeout_seconds,
            job_description: self.job_description.clone(),
            job_description_file: self.job_description_file.clone(),
        }
    }

    pub fn settings(&self) -> Result<Settings> {
        let file = self
            .config
            .as_deref()
            .map(TomlConfig::from_file)
            .transpose()?;
        Settings::resolve(file.as_ref(), self.overrides())
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        for file in &self.files {
            validation::validate_path("files", file)?;
        }
        if let Some(endpoint) = &self.endpoint {
            validation::validate_url("endpoint", endpoint)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        Ok(())
    }
}
