use thiserror::Error;

/// 後端未提供可解析的錯誤訊息時使用
pub const UNKNOWN_PARSE_ERROR: &str = "An unknown error occurred during parsing.";

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Parsing service returned {status}: {message}")]
    ApplicationError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Page element '{id}' not found")]
    MissingElement { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Transport,
    Application,
    Configuration,
    View,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DashError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashError::TransportError(_) => ErrorCategory::Transport,
            DashError::ApplicationError { .. } | DashError::SerializationError(_) => {
                ErrorCategory::Application
            }
            DashError::IoError(_) => ErrorCategory::Input,
            DashError::UrlError(_)
            | DashError::ConfigError { .. }
            | DashError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DashError::MissingElement { .. } => ErrorCategory::View,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Application | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::View => ErrorSeverity::Critical,
        }
    }

    /// 顯示給使用者的失敗原因（對應瀏覽器 alert 的內容）
    pub fn failure_reason(&self) -> String {
        match self {
            DashError::ApplicationError { message, .. } => message.clone(),
            DashError::TransportError(e) => e.to_string(),
            DashError::SerializationError(e) => e.to_string(),
            other => other.to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => {
                format!("Could not reach the parsing service: {}", self.failure_reason())
            }
            ErrorCategory::Application => {
                format!("Failed to parse the resume: {}", self.failure_reason())
            }
            ErrorCategory::Input => format!("Could not read the resume file: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::View => format!("Dashboard layout is incomplete: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Transport => "Check that the parsing service is running and --endpoint points at it",
            ErrorCategory::Application => "Choose or drop the file again, or try a different PDF",
            ErrorCategory::Input => "Make sure the resume path exists and is readable",
            ErrorCategory::Configuration => "Review the command line flags and the TOML config file",
            ErrorCategory::View => "Bind the view to a layout that contains every required element",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_reason_is_server_message() {
        let err = DashError::ApplicationError {
            status: 422,
            message: "unsupported file type".to_string(),
        };
        assert_eq!(err.failure_reason(), "unsupported file type");
        assert_eq!(err.category(), ErrorCategory::Application);
        assert_eq!(
            err.user_friendly_message(),
            "Failed to parse the resume: unsupported file type"
        );
    }

    #[test]
    fn test_configuration_errors_are_critical() {
        let err = DashError::InvalidConfigValueError {
            field: "backend.endpoint".to_string(),
            value: "ftp://parser".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = DashError::MissingElement {
            id: "loader".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::View);
        assert!(err.to_string().contains("loader"));
    }
}
