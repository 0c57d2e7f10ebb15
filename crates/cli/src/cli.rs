use clap::Parser;

use notebridge_core::config::{API_KEY_VAR, BASE_URL_VAR, SERVER_NAME_VAR};
use notebridge_core::{ConfigError, NotesConfig};

/// MCP server for a remote note service.
///
/// Speaks JSON-RPC over stdin/stdout. Logs go to stderr. Each flag falls back
/// to its `NOTES_*` environment variable (a `.env` file is honored).
#[derive(Parser, Debug)]
#[command(name = "notebridge", version, about = "MCP server for a remote note service")]
pub struct CliArgs {
    /// Credential for the note service [env: NOTES_API_KEY]
    #[arg(long)]
    pub api_key: Option<String>,

    /// Root URL of the note service API [env: NOTES_API_BASE_URL]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Server name reported to the MCP host [env: NOTES_MCP_SERVER_NAME]
    #[arg(long)]
    pub server_name: Option<String>,
}

impl CliArgs {
    /// Resolve the runtime configuration from flags over the process environment.
    pub fn to_config(&self) -> Result<NotesConfig, ConfigError> {
        self.resolve(|key| std::env::var(key).ok())
    }

    fn resolve<F>(&self, env: F) -> Result<NotesConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        NotesConfig::from_lookup(|key| self.flag(key).or_else(|| env(key)))
    }

    /// The flag standing in for an environment variable. Blank flags are unset.
    fn flag(&self, key: &str) -> Option<String> {
        let value = match key {
            API_KEY_VAR => &self.api_key,
            BASE_URL_VAR => &self.base_url,
            SERVER_NAME_VAR => &self.server_name,
            _ => return None,
        };
        value.clone().filter(|v| !v.trim().is_empty())
    }
}
