use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Database operation failed: {0}")]
    DatabaseError(#[from] mongodb::error::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SiteError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::DatabaseError(_) => {
                "Could not reach the document database. Check MONGODB_URI.".to_string()
            }
            SiteError::ApiError(_) => {
                "The backend service did not respond as expected.".to_string()
            }
            SiteError::IoError(e) => format!("File system error: {}", e),
            SiteError::SerializationError(_) => "Could not render the record as JSON.".to_string(),
            SiteError::TomlError(e) => format!("Site config file is not valid TOML: {}", e),
            SiteError::ConfigError { message } => message.clone(),
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SiteError::ConfigError { .. }
                | SiteError::InvalidConfigValueError { .. }
                | SiteError::TomlError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
