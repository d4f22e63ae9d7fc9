use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed API response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code used by the CLI for a failed run.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ScreenerError {
    pub fn config(message: impl Into<String>) -> Self {
        ScreenerError::Config {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ScreenerError::Network(_) => ErrorCategory::Network,
            ScreenerError::Parse(_) => ErrorCategory::Data,
            ScreenerError::Io(_) | ScreenerError::Csv(_) => ErrorCategory::Storage,
            ScreenerError::Config { .. } | ScreenerError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // a rerun may succeed once the endpoint is reachable again
            ScreenerError::Network(_) => ErrorSeverity::Medium,
            ScreenerError::Parse(_) => ErrorSeverity::High,
            ScreenerError::Config { .. } | ScreenerError::InvalidConfigValue { .. } => {
                ErrorSeverity::High
            }
            ScreenerError::Io(_) | ScreenerError::Csv(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScreenerError::Network(e) => match e.status() {
                Some(status) => format!("The stock API answered with HTTP {}", status),
                None => "Could not reach the stock API".to_string(),
            },
            ScreenerError::Parse(e) => {
                format!("The stock API returned data that is not a JSON list of records ({})", e)
            }
            ScreenerError::Io(e) => format!("Could not write the results file ({})", e),
            ScreenerError::Csv(e) => format!("Could not write the CSV results ({})", e),
            ScreenerError::Config { message } => format!("Invalid configuration: {}", message),
            ScreenerError::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the API endpoint URL and your network connection, then run again"
            }
            ErrorCategory::Data => "Make sure the endpoint returns a JSON array of objects",
            ErrorCategory::Storage => {
                "Check that the output directory exists and is writable"
            }
            ErrorCategory::Configuration => "Fix the flag or config file value and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
