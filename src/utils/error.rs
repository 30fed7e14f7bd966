use thiserror::Error;

#[derive(Error, Debug)]
pub enum GainError {
    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Export error: {message}")]
    ExportError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Export,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GainError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        GainError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GainError::InvalidInput { .. } => ErrorCategory::Input,
            GainError::ConfigError { .. }
            | GainError::ConfigValidationError { .. }
            | GainError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            GainError::ZipError(_)
            | GainError::CsvError(_)
            | GainError::SerializationError(_)
            | GainError::ExportError { .. } => ErrorCategory::Export,
            GainError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Export => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 針對錯誤類型提供修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            GainError::InvalidInput { field, .. } => format!(
                "Check the value passed for '{}', or rerun with --clamp to pull it into range",
                field
            ),
            GainError::ConfigError { .. } | GainError::ConfigValidationError { .. } => {
                "Make sure the configuration file exists and is valid TOML".to_string()
            }
            GainError::InvalidConfigValueError { field, .. } => {
                format!("Fix '{}' in the configuration file or remove it to use the default", field)
            }
            GainError::IoError(_) => {
                "Check that the output directory is writable and has free space".to_string()
            }
            GainError::ZipError(_) => "Retry without --bundle".to_string(),
            GainError::CsvError(_) | GainError::SerializationError(_) | GainError::ExportError { .. } => {
                "Retry with --format txt or --no-export".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GainError::InvalidInput { field, value, reason } => {
                format!("Input '{}' = {} is not accepted: {}", field, value, reason)
            }
            GainError::ConfigError { message } => format!("Could not load configuration: {}", message),
            GainError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            GainError::InvalidConfigValueError { field, value, reason } => {
                format!("Configuration value '{}' = {} is invalid: {}", field, value, reason)
            }
            GainError::IoError(e) => format!("File operation failed: {}", e),
            GainError::ZipError(e) => format!("Could not build the download bundle: {}", e),
            GainError::CsvError(e) => format!("Could not write the CSV file: {}", e),
            GainError::SerializationError(e) => format!("Could not serialize the result: {}", e),
            GainError::ExportError { message } => format!("Export failed: {}", message),
        }
    }
}

pub type Result<T> = std::result::Result<T, GainError>;
