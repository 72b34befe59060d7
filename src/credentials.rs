//! API credential loading.
//!
//! Credentials live in a single `credentials.json` file in the data
//! directory. Absence or malformed content is an auth failure raised before
//! any network call is made.

use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::ClientError;

#[derive(Deserialize)]
struct RawCredentials {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    api_secret: String,
}

/// API key pair for the ledger API.
pub struct ApiCredentials {
    api_key: String,
    api_secret: SecretString,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Load credentials from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ClientError> {
        let content = std::fs::read_to_string(path).map_err(|_| ClientError::Auth)?;
        let raw: RawCredentials =
            serde_json::from_str(&content).map_err(|_| ClientError::Auth)?;

        if raw.api_key.is_empty() || raw.api_secret.is_empty() {
            return Err(ClientError::Auth);
        }

        Ok(Self::new(raw.api_key, raw.api_secret))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
