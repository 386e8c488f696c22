//! Request-facing middleware: signal gathering, resolution, persistence.

use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::debug;

use crate::config::LinguaConfig;
use crate::error::Result;
use crate::resolve;
use crate::store::{ResourceBundle, ResourceStore};

/// Lifetime of the persisted locale cookie.
const COOKIE_MAX_AGE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Host-side view of one request.
///
/// The middleware never touches the transport: the host adapts its own
/// request/response pair to this trait. The override signals share one name
/// ([`LinguaConfig::override_key`]) between the query parameter and the
/// cookie.
pub trait RequestContext: Send {
    /// Value of the override query parameter, if the request carries one.
    fn override_from_query(&self, key: &str) -> Option<String>;

    /// Value of the override cookie, if the client sent one.
    fn override_from_cookie(&self, key: &str) -> Option<String>;

    /// A request header value by lowercase name.
    fn header_value(&self, name: &str) -> Option<String>;

    /// Queue a cookie on the response.
    fn set_cookie(&mut self, name: &str, value: &str, expires_at: SystemTime);
}

/// Locale negotiation middleware.
///
/// Owns the immutable resource store for the process lifetime; per-request
/// work is pure, lock-free and infallible. Cloning shares the store.
#[derive(Debug, Clone)]
pub struct LinguaMiddleware {
    config: Arc<LinguaConfig>,
    store: Arc<ResourceStore>,
}

impl LinguaMiddleware {
    /// Validate the configuration, load every bundle and build the store.
    ///
    /// Any configuration or load failure is returned before the middleware
    /// exists; a host must treat that as fatal and not start serving.
    pub fn new(config: LinguaConfig) -> Result<Self> {
        let store = ResourceStore::load(&config)?;

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
        })
    }

    /// Build from in-memory bundles, bypassing the file loader.
    pub fn from_bundles<I>(config: LinguaConfig, bundles: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        config.validate()?;
        let store = ResourceStore::from_bundles(bundles, config.default_locale.clone())?;

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
        })
    }

    /// Resolve the request to exactly one bundle and persist the winner.
    ///
    /// The explicit override (query parameter first, then cookie) wins over
    /// header negotiation; with no usable signal the default bundle is
    /// served. The winning locale key (the exact string, not re-negotiated)
    /// is written back as a cookie so the next request from this client
    /// short-circuits negotiation.
    pub fn localize(&self, ctx: &mut dyn RequestContext) -> &ResourceBundle {
        let key = self.config.override_key.as_str();

        let override_locale = ctx
            .override_from_query(key)
            .or_else(|| ctx.override_from_cookie(key));
        let header = ctx.header_value("accept-language");

        let candidates = resolve::candidate_locales(
            override_locale.as_deref(),
            header.as_deref(),
            &self.config,
        );
        let bundle = self.store.resolve(&candidates);

        debug!(
            override_locale = ?override_locale,
            header = ?header,
            locale = %bundle.locale,
            "resolved request locale"
        );

        ctx.set_cookie(key, &bundle.locale, SystemTime::now() + COOKIE_MAX_AGE);

        bundle
    }

    /// The store backing this middleware.
    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    /// The configuration backing this middleware.
    pub fn config(&self) -> &LinguaConfig {
        &self.config
    }
}

/// Format a `Set-Cookie` header value for the persisted locale.
///
/// Hosts whose response type takes raw headers can call this from their
/// [`RequestContext::set_cookie`] implementation.
pub fn format_set_cookie(name: &str, value: &str, expires_at: SystemTime) -> String {
    format!(
        "{}={}; Path=/; Expires={}",
        name,
        value,
        httpdate::fmt_http_date(expires_at)
    )
}
