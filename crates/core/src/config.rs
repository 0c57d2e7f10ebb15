use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_SERVER_NAME: &str = "notebridge";

pub const API_KEY_VAR: &str = "NOTES_API_KEY";
pub const BASE_URL_VAR: &str = "NOTES_API_BASE_URL";
pub const SERVER_NAME_VAR: &str = "NOTES_MCP_SERVER_NAME";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Clone)]
pub struct NotesConfig {
    /// Credential sent with every remote request.
    pub api_key: String,
    /// Remote API root, without a trailing slash.
    pub base_url: String,
    /// Name reported to the host during `initialize`.
    pub server_name: String,
}

impl NotesConfig {
    /// Build config from a lookup keyed by the `NOTES_*` variable names.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let server_name =
            get(SERVER_NAME_VAR).unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());

        Ok(Self::new(api_key, base_url)?.with_server_name(server_name))
    }

    /// Build config from explicit values.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            base_url: normalize_base_url(base_url.into())?,
            server_name: DEFAULT_SERVER_NAME.to_string(),
        })
    }

    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  remote:      base_url={}", self.base_url);
        tracing::info!("  credential:  {}", redact(&self.api_key));
        tracing::info!("  server:      name={}", self.server_name);
    }
}

impl std::fmt::Debug for NotesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("server_name", &self.server_name)
            .finish()
    }
}

fn normalize_base_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(raw));
    }
    Ok(trimmed.to_string())
}

fn redact(secret: &str) -> String {
    format!("<redacted, {} chars>", secret.chars().count())
}
