//! `Accept-Language` parsing and quality-value ranking.
//!
//! Implements the tag-ranking half of content negotiation (RFC 2616 §14.4):
//! header entries are grouped into quality-value buckets and flattened into
//! a single preference-ordered candidate list, optionally extended with each
//! entry's promoted primary subtag at a fixed low weight.
//!
//! # Examples
//!
//! ```
//! use lingua::negotiate::rank;
//!
//! let candidates = rank("fr-fr;q=0.9,en;q=0.5", Some(0.1));
//! assert_eq!(candidates, ["fr-fr", "en", "fr", "en"]);
//! ```

use std::cmp::Ordering;

/// Quality value applied when an entry carries none, or none that parses.
const DEFAULT_QVALUE: f32 = 1.0;

/// Ordered tag buckets keyed by quality value.
///
/// Tags added under the same qvalue append in insertion order; flattening
/// visits buckets in descending qvalue order. Nothing is deduplicated: a
/// tag present in several buckets appears that many times in the flattened
/// sequence.
#[derive(Debug, Default)]
pub struct TagBuckets {
    buckets: Vec<(f32, Vec<String>)>,
}

impl TagBuckets {
    /// Create an empty bucket set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single tag under the given quality value.
    pub fn add_tag(&mut self, tag: impl Into<String>, qvalue: f32) {
        self.bucket_mut(qvalue).push(tag.into());
    }

    /// Append several tags, in order, under one quality value.
    pub fn add_tags<I>(&mut self, tags: I, qvalue: f32)
    where
        I: IntoIterator<Item = String>,
    {
        self.bucket_mut(qvalue).extend(tags);
    }

    fn bucket_mut(&mut self, qvalue: f32) -> &mut Vec<String> {
        // A header carries a handful of distinct qvalues at most, so the
        // buckets stay a small vector searched linearly.
        let index = match self.buckets.iter().position(|(q, _)| *q == qvalue) {
            Some(index) => index,
            None => {
                self.buckets.push((qvalue, Vec::new()));
                self.buckets.len() - 1
            }
        };

        &mut self.buckets[index].1
    }

    /// Flatten into one sequence: descending qvalue, insertion order within
    /// a bucket.
    pub fn into_tags(mut self) -> Vec<String> {
        self.buckets
            .sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        self.buckets
            .into_iter()
            .flat_map(|(_, tags)| tags)
            .collect()
    }
}

/// Rank the tags of an `Accept-Language` header value.
///
/// Entries are ordered by descending quality value, with ties kept in
/// header order. An absent or unparsable `q` parameter counts as 1; an
/// entry that is empty after trimming still contributes an empty-string
/// candidate, which simply never matches a stored bundle.
///
/// When `subtag_weight` is a non-zero weight, every entry's primary subtag
/// (the part before the first `-`) is promoted: the promoted subtags are
/// collected in their own preference order and appended after the exact
/// tags as a single bucket at that weight. Exact tags and promoted subtags
/// are never deduplicated against each other.
///
/// An empty header value yields an empty ranking.
pub fn rank(header_value: &str, subtag_weight: Option<f32>) -> Vec<String> {
    if header_value.is_empty() {
        return Vec::new();
    }

    let promotion = subtag_weight.filter(|weight| *weight != 0.0);

    let mut tags = TagBuckets::new();
    let mut subtags = TagBuckets::new();

    for entry in header_value.split(',') {
        let mut parts = entry.split(';');
        let tag = parts.next().unwrap_or("").trim().to_lowercase();
        let qvalue = parse_qvalue(parts).unwrap_or(DEFAULT_QVALUE);

        if promotion.is_some() {
            subtags.add_tag(primary_subtag(&tag), qvalue);
        }

        tags.add_tag(tag, qvalue);
    }

    if let Some(weight) = promotion {
        tags.add_tags(subtags.into_tags(), weight);
    }

    tags.into_tags()
}

/// Scan `key=value` parameters for the first usable `q`.
///
/// The key must be exactly `q`; the value tolerates surrounding whitespace.
/// A `q` whose value does not parse is passed over, so a later well-formed
/// `q` may still win.
fn parse_qvalue<'a>(params: impl Iterator<Item = &'a str>) -> Option<f32> {
    for param in params {
        let mut pair = param.split('=');
        if pair.next() != Some("q") {
            continue;
        }

        if let Some(qvalue) = pair.next().and_then(|v| v.trim().parse::<f32>().ok()) {
            if !qvalue.is_nan() {
                return Some(qvalue);
            }
        }
    }

    None
}

/// The language component of a tag, up to the first `-`.
///
/// A tag with no `-` is its own primary subtag.
fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}
