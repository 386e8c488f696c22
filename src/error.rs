//! Error types for configuration and resource loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring the middleware or building the resource
/// store.
///
/// All of these are fatal at startup: a host must not begin serving
/// requests without a valid store. Request-time anomalies (malformed
/// quality values, unmatched candidates) are absorbed by negotiation and
/// lookup and never surface as errors.
#[derive(Debug, Error)]
pub enum LinguaError {
    /// No default locale configured
    #[error("no default locale configured")]
    MissingDefaultLocale,

    /// No resource directory configured
    #[error("no resource directory configured")]
    MissingResourcePath,

    /// Failed to read the resource directory or a bundle file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A bundle file did not parse as JSON
    #[error("failed to parse resource bundle {}: {source}", .path.display())]
    BundleParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No loaded bundle's key equals the configured default locale
    #[error("no resource bundle for default locale `{0}`")]
    DefaultBundleMissing(String),
}

/// Result type for lingua operations.
pub type Result<T> = std::result::Result<T, LinguaError>;
