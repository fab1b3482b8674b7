use crate::utils::error::{DashError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub job_description: Option<String>,
    pub job_description_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub gauge_radius: Option<f64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PARSER_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.backend.endpoint {
            validation::validate_url("backend.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.backend.timeout_seconds {
            validation::validate_positive_number("backend.timeout_seconds", timeout, 1)?;
        }
        if let Some(path) = &self.input.job_description_file {
            validation::validate_path("input.job_description_file", path)?;
        }
        if let Some(radius) = self.view.gauge_radius {
            validation::validate_positive_float("view.gauge_radius", radius)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[backend]
endpoint = "http://parser.internal:5000"
timeout_seconds = 45

[input]
job_description = "Backend engineer, Rust and SQL"

[view]
gauge_radius = 40.0
"#,
        )
        .unwrap();

        assert_eq!(
            config.backend.endpoint.as_deref(),
            Some("http://parser.internal:5000")
        );
        assert_eq!(config.backend.timeout_seconds, Some(45));
        assert_eq!(
            config.input.job_description.as_deref(),
            Some("Backend engineer, Rust and SQL")
        );
        assert_eq!(config.view.gauge_radius, Some(40.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.backend.endpoint.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("RESUME_DASH_TEST_ENDPOINT", "http://10.0.0.7:8000");
        let config = TomlConfig::from_toml_str(
            r#"
[backend]
endpoint = "${RESUME_DASH_TEST_ENDPOINT}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.backend.endpoint.as_deref(),
            Some("http://10.0.0.7:8000")
        );
    }

    #[test]
    fn test_unset_variable_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[backend]
endpoint = "${RESUME_DASH_TEST_UNSET_VARIABLE}"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[backend]
timeout_seconds = 0

[view]
gauge_radius = -3.0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        assert!(TomlConfig::from_toml_str("[backend\nendpoint = 1").is_err());
    }
}
