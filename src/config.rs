//! Middleware configuration.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{LinguaError, Result};

/// Locale negotiation configuration.
///
/// `default_locale` and `resource_path` are required; the rest carry the
/// conventional defaults. Deserializable, so it can live inside a host's
/// own configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct LinguaConfig {
    /// Locale served when no request signal matches a loaded bundle.
    /// A bundle for this key must exist or initialization fails.
    pub default_locale: String,

    /// Directory containing one bundle file per locale
    pub resource_path: PathBuf,

    /// Extension stripped from bundle file names to derive locale keys
    #[serde(default = "default_resource_extension")]
    pub resource_extension: String,

    /// Shared name of the query parameter and the cookie carrying an
    /// explicit locale override
    #[serde(default = "default_override_key")]
    pub override_key: String,

    /// Quality bucket for promoted primary subtags; `None` disables
    /// promotion
    #[serde(default = "default_subtag_weight")]
    pub subtag_weight: Option<f32>,
}

fn default_resource_extension() -> String {
    ".json".to_string()
}

fn default_override_key() -> String {
    "language".to_string()
}

fn default_subtag_weight() -> Option<f32> {
    Some(0.1)
}

impl LinguaConfig {
    /// Create a configuration with the required fields and defaults for
    /// the rest.
    pub fn new(default_locale: impl Into<String>, resource_path: impl Into<PathBuf>) -> Self {
        Self {
            default_locale: default_locale.into(),
            resource_path: resource_path.into(),
            resource_extension: default_resource_extension(),
            override_key: default_override_key(),
            subtag_weight: default_subtag_weight(),
        }
    }

    /// Set the bundle file extension
    pub fn with_resource_extension(mut self, extension: impl Into<String>) -> Self {
        self.resource_extension = extension.into();
        self
    }

    /// Set the override query-parameter/cookie name
    pub fn with_override_key(mut self, key: impl Into<String>) -> Self {
        self.override_key = key.into();
        self
    }

    /// Set the promotion weight for primary subtags
    pub fn with_subtag_weight(mut self, weight: f32) -> Self {
        self.subtag_weight = Some(weight);
        self
    }

    /// Disable primary-subtag promotion
    pub fn without_subtag_promotion(mut self) -> Self {
        self.subtag_weight = None;
        self
    }

    /// The effective promotion weight. A configured weight of zero counts
    /// as disabled.
    pub fn subtag_promotion(&self) -> Option<f32> {
        self.subtag_weight.filter(|weight| *weight != 0.0)
    }

    /// Check the required fields.
    ///
    /// Run once by the initializer; never raised mid-request.
    pub fn validate(&self) -> Result<()> {
        if self.default_locale.is_empty() {
            return Err(LinguaError::MissingDefaultLocale);
        }

        if self.resource_path.as_os_str().is_empty() {
            return Err(LinguaError::MissingResourcePath);
        }

        Ok(())
    }
}
