//! Per-request locale candidate resolution.

use crate::config::LinguaConfig;
use crate::negotiate;

/// Compute the ranked locale candidates for one request.
///
/// An explicit override wins outright and suppresses header negotiation
/// entirely; otherwise the `Accept-Language` value is ranked; with neither
/// signal the default locale is the only candidate. Whether a candidate
/// actually names a loaded bundle is not checked here; lookup owns that,
/// including the fallback when nothing matches.
///
/// Pure and I/O-free: the same signals always produce the same candidates.
pub fn candidate_locales(
    override_locale: Option<&str>,
    header_value: Option<&str>,
    config: &LinguaConfig,
) -> Vec<String> {
    if let Some(locale) = override_locale {
        return vec![locale.to_string()];
    }

    if let Some(header) = header_value {
        return negotiate::rank(header, config.subtag_promotion());
    }

    vec![config.default_locale.clone()]
}
