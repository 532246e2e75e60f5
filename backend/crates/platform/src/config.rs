//! Environment configuration helpers
//!
//! Thin wrappers over `std::env` used by the composition root. Values are
//! read once at startup; nothing here caches.

use std::env;

use base64::Engine;
use base64::engine::general_purpose;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Variable is set but is not valid unicode
    #[error("{key} is not valid unicode")]
    NotUnicode { key: String },

    /// Variable could not be decoded as base64
    #[error("{key} is not valid base64: {source}")]
    InvalidBase64 {
        key: String,
        #[source]
        source: base64::DecodeError,
    },
}

/// Read an optional variable. Empty and whitespace-only values count as unset.
pub fn optional(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
            key: key.to_string(),
        }),
    }
}

/// Read a variable, falling back to `default` when unset
pub fn or_default(key: &str, default: &str) -> Result<String, ConfigError> {
    Ok(optional(key)?.unwrap_or_else(|| default.to_string()))
}

/// Split a comma separated list, dropping empty entries
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decode a standard base64 secret
pub fn decode_secret(key: &str, encoded: &str) -> Result<Vec<u8>, ConfigError> {
    general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|source| ConfigError::InvalidBase64 {
            key: key.to_string(),
            source,
        })
}

/// Read an optional base64 secret such as a password pepper
pub fn optional_secret(key: &str) -> Result<Option<Vec<u8>>, ConfigError> {
    optional(key)?
        .map(|encoded| decode_secret(key, &encoded))
        .transpose()
}
