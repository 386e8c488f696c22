//! Immutable resource bundle storage and lookup.
//!
//! The store is built once at startup from a directory of JSON bundle
//! files (or from in-memory pairs), validated to contain the default
//! locale, and shared read-only for the process lifetime. Lookup is an
//! exact-string match with a guaranteed fallback to the default bundle.

use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use tracing::{info, warn};

use crate::config::LinguaConfig;
use crate::error::{LinguaError, Result};

/// A localized content tree stored under one locale key.
///
/// The content is opaque to the middleware: whatever JSON the bundle file
/// holds is served verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceBundle {
    /// Locale key, taken verbatim from the bundle file name
    pub locale: String,
    /// Arbitrary nested content loaded from the bundle file
    pub content: Value,
}

/// Immutable mapping from locale key to resource bundle.
///
/// Never mutated after construction, so concurrent request handlers share
/// it behind an `Arc` without locking.
#[derive(Debug)]
pub struct ResourceStore {
    bundles: HashMap<String, ResourceBundle>,
    default_locale: String,
}

impl ResourceStore {
    /// Build a store from already-loaded `(locale key, content)` pairs.
    ///
    /// Duplicate keys are last-write-wins. Fails when no pair's key equals
    /// `default_locale`, the one validation the store performs.
    pub fn from_bundles<I>(bundles: I, default_locale: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let default_locale = default_locale.into();
        let bundles: HashMap<String, ResourceBundle> = bundles
            .into_iter()
            .map(|(locale, content)| (locale.clone(), ResourceBundle { locale, content }))
            .collect();

        if !bundles.contains_key(&default_locale) {
            return Err(LinguaError::DefaultBundleMissing(default_locale));
        }

        Ok(Self {
            bundles,
            default_locale,
        })
    }

    /// Load every bundle file under `config.resource_path`.
    ///
    /// One file per locale: the file name minus `config.resource_extension`
    /// is the locale key. Subdirectories and files without the extension
    /// are skipped. Any read or parse failure is fatal: a host must not
    /// start serving from a partially loaded store.
    pub fn load(config: &LinguaConfig) -> Result<Self> {
        config.validate()?;

        let mut bundles = Vec::new();

        for entry in fs::read_dir(&config.resource_path)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let file_name = entry.file_name();
            let file_name = match file_name.to_str() {
                Some(file_name) => file_name,
                None => {
                    warn!(
                        path = %entry.path().display(),
                        "skipping bundle with non-UTF-8 file name"
                    );
                    continue;
                }
            };

            let locale = match file_name.strip_suffix(config.resource_extension.as_str()) {
                Some(locale) => locale,
                None => continue,
            };

            let source = fs::read_to_string(entry.path())?;
            let content = serde_json::from_str(&source).map_err(|source| {
                LinguaError::BundleParse {
                    path: entry.path(),
                    source,
                }
            })?;

            bundles.push((locale.to_string(), content));
        }

        let store = Self::from_bundles(bundles, config.default_locale.clone())?;

        info!(
            path = %config.resource_path.display(),
            bundles = store.len(),
            default_locale = %store.default_locale,
            "loaded resource bundles"
        );

        Ok(store)
    }

    /// Exact lookup by locale key, no normalization.
    pub fn get(&self, locale: &str) -> Option<&ResourceBundle> {
        self.bundles.get(locale)
    }

    /// Resolve a ranked candidate list to exactly one bundle.
    ///
    /// The first candidate with a loaded bundle wins; with no match at all
    /// the default locale's bundle is served. Unmatched candidates are
    /// never an error.
    pub fn resolve(&self, candidates: &[String]) -> &ResourceBundle {
        for candidate in candidates {
            if let Some(bundle) = self.get(candidate) {
                return bundle;
            }
        }

        self.bundles
            .get(&self.default_locale)
            .expect("store is constructed with a bundle for the default locale")
    }

    /// The configured default locale key.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Number of loaded bundles.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether the store holds no bundles. Cannot occur for a validated
    /// store, which always holds the default bundle.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Iterate over the loaded locale keys, in no particular order.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(|locale| locale.as_str())
    }
}
