//! Locale Negotiation and Resource Resolution
//!
//! `lingua` decides, for each incoming request, which localized resource
//! bundle to serve, and guarantees it always produces one:
//!
//! - **Quality-value ranking**: `Accept-Language` parsing per RFC 2616
//!   §14.4, stable across equal weights
//! - **Primary-subtag promotion**: `en-gb` also offers `en` at a low weight
//! - **Override precedence**: query parameter beats cookie beats header
//!   beats default locale
//! - **Immutable bundle store**: one JSON file per locale, loaded once at
//!   startup and shared lock-free
//! - **Guaranteed fallback**: an unmatched request resolves to the default
//!   bundle, never an error
//! - **Cookie persistence**: the winning locale is written back so the next
//!   request short-circuits negotiation
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lingua::{LinguaConfig, LinguaMiddleware};
//!
//! let config = LinguaConfig::new("en", "locales/")
//!     .with_override_key("language")
//!     .with_subtag_weight(0.1);
//!
//! // Fails fast when the directory is unreadable, a bundle does not
//! // parse, or no bundle exists for the default locale.
//! let lingua = LinguaMiddleware::new(config)?;
//!
//! // Per request, with `ctx` adapting the host's request/response pair:
//! let bundle = lingua.localize(&mut ctx);
//! render(&bundle.content);
//! ```
//!
//! # Ranking
//!
//! ```rust
//! use lingua::negotiate::rank;
//!
//! let candidates = rank("fr-fr;q=0.9,en;q=0.5", Some(0.1));
//! assert_eq!(candidates, ["fr-fr", "en", "fr", "en"]);
//! ```
//!
//! # Host Integration
//!
//! The crate never touches the transport. A host implements
//! [`RequestContext`] over its own request/response types; the middleware
//! pulls the override signals and the `Accept-Language` header through it
//! and queues the persisted cookie on it. [`format_set_cookie`] covers
//! hosts whose responses take raw header strings.

pub mod config;
pub mod error;
pub mod middleware;
pub mod negotiate;
pub mod resolve;
pub mod store;

pub use config::LinguaConfig;
pub use error::{LinguaError, Result};
pub use middleware::{LinguaMiddleware, RequestContext, format_set_cookie};
pub use negotiate::{TagBuckets, rank};
pub use resolve::candidate_locales;
pub use store::{ResourceBundle, ResourceStore};
