//! Startup configuration: the secret store that supplies the API key.
//!
//! The key is resolved once at process start and threaded explicitly into
//! the analyzer. Resolution order: `GOOGLE_API_KEY` environment variable,
//! then the `google_api_key` entry of a TOML secrets file. A missing or
//! blank credential is fatal before any other work happens.

use crate::error::{AttriscanError, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable that overrides the secrets file.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Default location of the secrets file.
pub const DEFAULT_SECRETS_PATH: &str = "secrets.toml";

/// On-disk shape of the secrets file.
#[derive(Debug, Deserialize)]
struct SecretsFile {
    #[serde(default)]
    google_api_key: Option<String>,
}

/// Resolved process-wide configuration.
pub struct Config {
    api_key: String,
}

impl Config {
    /// Loads configuration from the default secrets path, with the
    /// environment variable taking precedence.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_SECRETS_PATH)
    }

    /// Loads configuration from the given secrets file, with the
    /// environment variable taking precedence.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let env_key = std::env::var(API_KEY_ENV).ok();
        let file_key = read_secrets_file(path.as_ref())?;
        let api_key = resolve_api_key(env_key.as_deref(), file_key.as_deref())?;
        Ok(Self { api_key })
    }

    /// The credential authorizing all remote inference calls.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

fn read_secrets_file(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AttriscanError::Config(format!("unreadable secrets file: {e}")))?;
    let secrets: SecretsFile = toml::from_str(&raw)
        .map_err(|e| AttriscanError::Config(format!("malformed secrets file: {e}")))?;
    Ok(secrets.google_api_key)
}

/// Picks the credential from the available sources, rejecting blank values.
fn resolve_api_key(env_key: Option<&str>, file_key: Option<&str>) -> Result<String> {
    let candidate = [env_key, file_key]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty());

    candidate.map(str::to_owned).ok_or_else(|| {
        AttriscanError::Config(format!(
            "google_api_key not found: set {API_KEY_ENV} or add it to {DEFAULT_SECRETS_PATH}"
        ))
    })
}
