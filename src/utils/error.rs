use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Database error: {0}")]
    StorageError(#[from] rusqlite::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Dataset row {row}: {message}")]
    DatasetError { row: usize, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Input,
    Storage,
    Dataset,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ExplorerError {
    pub fn not_found(entity: &str, key: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            key: key.to_string(),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::StorageError(_) | Self::IoError(_) => ErrorCategory::Storage,
            Self::CsvError(_) | Self::DatasetError { .. } | Self::SerializationError(_) => {
                ErrorCategory::Dataset
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者輸入錯誤：修正參數後即可重試
            ErrorCategory::Lookup | ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Dataset | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => {
                "Check the name or id; `epl teams`, `epl referees` and `epl matches` list valid values"
            }
            Self::ValidationError { .. } => "Correct the supplied value and run the command again",
            Self::DatasetError { .. } | Self::CsvError(_) => {
                "Fix the offending CSV row or rerun `epl load --skip-invalid-rows`"
            }
            Self::StorageError(_) => {
                "Make sure the database file exists and is readable; run `epl load` to rebuild it"
            }
            Self::IoError(_) => "Check that the path exists and that you have permission to access it",
            Self::SerializationError(_) => "Retry with `--format table` or `--format csv`",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Review the configuration file and command-line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { entity, key } => format!("No {} '{}' exists", entity, key),
            Self::ValidationError { field, message } => {
                format!("Invalid {}: {}", field, message)
            }
            Self::StorageError(e) => format!("The database could not be read or written ({})", e),
            Self::DatasetError { row, message } => {
                format!("The dataset has a bad row at line {}: {}", row, message)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_input_errors_are_medium() {
        let err = ExplorerError::not_found("team", "Gotham City");
        assert!(err.is_not_found());
        assert_eq!(err.category(), ErrorCategory::Lookup);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "team not found: Gotham City");

        let err = ExplorerError::validation("home_goals", "must not be negative");
        assert!(err.is_validation());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_storage_error_is_critical() {
        let err = ExplorerError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("The database"));
    }
}
