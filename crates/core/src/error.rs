use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("NOTES_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("Invalid base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),
}
