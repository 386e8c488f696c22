//! Integration tests for the full localization pipeline.
//!
//! Startup (loading, validation) and per-request behavior (override
//! precedence, negotiation, fallback, cookie persistence) against an
//! in-memory request context.

use lingua::{LinguaConfig, LinguaError, LinguaMiddleware, RequestContext};
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::time::{Duration, SystemTime};

// =============================================================================
// Request context double
// =============================================================================

#[derive(Default)]
struct TestContext {
    query: HashMap<String, String>,
    cookies: HashMap<String, String>,
    headers: HashMap<String, String>,
    response_cookies: Vec<(String, String, SystemTime)>,
}

impl TestContext {
    fn with_header(mut self, value: &str) -> Self {
        self.headers
            .insert("accept-language".to_string(), value.to_string());
        self
    }

    fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }

    fn with_cookie(mut self, key: &str, value: &str) -> Self {
        self.cookies.insert(key.to_string(), value.to_string());
        self
    }
}

impl RequestContext for TestContext {
    fn override_from_query(&self, key: &str) -> Option<String> {
        self.query.get(key).cloned()
    }

    fn override_from_cookie(&self, key: &str) -> Option<String> {
        self.cookies.get(key).cloned()
    }

    fn header_value(&self, name: &str) -> Option<String> {
        self.headers.get(name).cloned()
    }

    fn set_cookie(&mut self, name: &str, value: &str, expires_at: SystemTime) {
        self.response_cookies
            .push((name.to_string(), value.to_string(), expires_at));
    }
}

fn middleware() -> LinguaMiddleware {
    LinguaMiddleware::from_bundles(
        LinguaConfig::new("en", "locales"),
        [
            ("en".to_string(), json!({ "greeting": "Hello" })),
            ("de-de".to_string(), json!({ "greeting": "Hallo" })),
        ],
    )
    .unwrap()
}

// =============================================================================
// Startup
// =============================================================================

#[test]
fn test_startup_loads_bundles_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"greeting": "Hello"}"#).unwrap();
    fs::write(dir.path().join("de-de.json"), r#"{"greeting": "Hallo"}"#).unwrap();

    let lingua = LinguaMiddleware::new(LinguaConfig::new("en", dir.path())).unwrap();

    assert_eq!(lingua.store().len(), 2);
    assert_eq!(lingua.store().get("en").unwrap().content["greeting"], "Hello");
    assert_eq!(
        lingua.store().get("de-de").unwrap().content["greeting"],
        "Hallo"
    );
}

#[test]
fn test_startup_fails_without_default_bundle() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"greeting": "Hello"}"#).unwrap();

    let result = LinguaMiddleware::new(LinguaConfig::new("fr", dir.path()));

    assert!(matches!(
        result,
        Err(LinguaError::DefaultBundleMissing(locale)) if locale == "fr"
    ));
}

#[test]
fn test_startup_fails_on_unparsable_bundle() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("en.json"), "{not json").unwrap();

    let result = LinguaMiddleware::new(LinguaConfig::new("en", dir.path()));

    assert!(matches!(result, Err(LinguaError::BundleParse { .. })));
}

#[test]
fn test_startup_fails_on_unreadable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");

    let result = LinguaMiddleware::new(LinguaConfig::new("en", missing));

    assert!(matches!(result, Err(LinguaError::Io(_))));
}

#[test]
fn test_loader_skips_foreign_files_and_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("en.json"), r#"{"greeting": "Hello"}"#).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a bundle").unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();

    let lingua = LinguaMiddleware::new(LinguaConfig::new("en", dir.path())).unwrap();

    assert_eq!(lingua.store().len(), 1);
    let locales: Vec<_> = lingua.store().locales().collect();
    assert_eq!(locales, ["en"]);
}

#[test]
fn test_loader_honors_configured_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("en.lang"), r#"{"greeting": "Hello"}"#).unwrap();
    fs::write(dir.path().join("de-de.json"), r#"{"greeting": "Hallo"}"#).unwrap();

    let config = LinguaConfig::new("en", dir.path()).with_resource_extension(".lang");
    let lingua = LinguaMiddleware::new(config).unwrap();

    assert_eq!(lingua.store().len(), 1);
    assert!(lingua.store().get("en").is_some());
}

// =============================================================================
// Per-request resolution
// =============================================================================

#[test]
fn test_negotiation_with_promotion_resolves_first_stored_match() {
    let lingua = middleware();
    let mut ctx = TestContext::default().with_header("fr-fr;q=0.9,en;q=0.5");

    let bundle = lingua.localize(&mut ctx);

    // Ranked [fr-fr, en, fr, en]; fr-fr is not loaded, en is.
    assert_eq!(bundle.locale, "en");
    assert_eq!(bundle.content["greeting"], "Hello");
}

#[test]
fn test_cookie_override_beats_header() {
    let lingua = middleware();
    let mut ctx = TestContext::default()
        .with_cookie("language", "de-de")
        .with_header("en");

    let bundle = lingua.localize(&mut ctx);

    assert_eq!(bundle.locale, "de-de");

    // The override is re-persisted with a roughly one-year expiry.
    let (name, value, expires_at) = ctx.response_cookies.last().unwrap().clone();
    assert_eq!(name, "language");
    assert_eq!(value, "de-de");

    let max_age = expires_at
        .duration_since(SystemTime::now())
        .unwrap_or_default();
    assert!(max_age > Duration::from_secs(364 * 24 * 60 * 60));
    assert!(max_age <= Duration::from_secs(366 * 24 * 60 * 60));
}

#[test]
fn test_query_override_beats_cookie() {
    let lingua = middleware();
    let mut ctx = TestContext::default()
        .with_query("language", "en")
        .with_cookie("language", "de-de");

    let bundle = lingua.localize(&mut ctx);

    assert_eq!(bundle.locale, "en");
}

#[test]
fn test_override_result_is_independent_of_header() {
    let lingua = middleware();

    let headers = ["en", "de-de;q=0.2,en;q=0.1", "ja", ""];
    for header in headers {
        let mut ctx = TestContext::default()
            .with_query("language", "de-de")
            .with_header(header);

        let bundle = lingua.localize(&mut ctx);
        assert_eq!(bundle.locale, "de-de");
    }
}

#[test]
fn test_missing_signals_serve_default_bundle() {
    let lingua = middleware();
    let mut ctx = TestContext::default();

    let bundle = lingua.localize(&mut ctx);

    assert_eq!(bundle.locale, "en");
    assert_eq!(ctx.response_cookies.last().unwrap().1, "en");
}

#[test]
fn test_unmatched_header_falls_back_to_default() {
    let lingua = middleware();
    let mut ctx = TestContext::default().with_header("ja,ko;q=0.8");

    let bundle = lingua.localize(&mut ctx);

    assert_eq!(bundle.locale, "en");
}

#[test]
fn test_resolution_is_deterministic() {
    let lingua = middleware();

    let resolve = || {
        let mut ctx = TestContext::default()
            .with_cookie("language", "de-de")
            .with_header("fr-fr;q=0.9,en;q=0.5");
        lingua.localize(&mut ctx).locale.clone()
    };

    assert_eq!(resolve(), resolve());
}

#[test]
fn test_custom_override_key_is_used_for_query_and_cookie() {
    let lingua = LinguaMiddleware::from_bundles(
        LinguaConfig::new("en", "locales").with_override_key("lang"),
        [
            ("en".to_string(), json!({})),
            ("de-de".to_string(), json!({})),
        ],
    )
    .unwrap();

    // The default key is ignored under a custom key name.
    let mut ctx = TestContext::default()
        .with_query("language", "de-de")
        .with_header("en");
    assert_eq!(lingua.localize(&mut ctx).locale, "en");

    let mut ctx = TestContext::default().with_query("lang", "de-de");
    assert_eq!(lingua.localize(&mut ctx).locale, "de-de");
    assert_eq!(ctx.response_cookies.last().unwrap().0, "lang");
}
