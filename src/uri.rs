//! Validated URI values for sitemap locations and alternate-link targets.
//!
//! Every URL that ends up in a sitemap passes through [`SitemapUri::parse`]
//! exactly once, at construction time. After that the value is immutable and
//! never re-validated: the renderer can escape-and-emit it without worrying
//! about malformed input, and the generator only has to compare string
//! prefixes for the base-URL check.
//!
//! ## Equality is deliberately absent
//!
//! `SitemapUri` does not implement `PartialEq` or `Hash`. Alternate-link
//! targets are positional: an entry's alternates keep their insertion order,
//! and two semantically identical URIs supplied as separate alternates are
//! both emitted. Deduplication, when it happens at all, happens on the raw
//! *string* keys of the caller's ordered map before conversion. Content
//! equality for URIs opens questions (trailing slash? percent-encoding case?
//! default port?) this crate has no business answering.

use std::fmt;
use thiserror::Error;
use url::Url;

/// Validation failures raised eagerly at entry or URI construction.
///
/// Nothing in the rendering/batching pipeline ever raises these; by the time
/// an entry reaches the generator its fields are known-good.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("invalid URI {raw:?}: {source}")]
    InvalidUri {
        raw: String,
        source: url::ParseError,
    },
    #[error("priority {0} is outside the 0.0-1.0 range")]
    PriorityOutOfRange(f32),
    #[error("URL {url:?} does not live under base URL {base:?}")]
    OutsideBaseUrl { url: String, base: String },
    #[error("unrecognized change frequency {0:?}")]
    UnknownChangeFreq(String),
}

/// A syntactically valid, absolute URI.
///
/// Wraps [`url::Url`], so the stored form is the normalized one (lowercased
/// scheme and host, percent-encoding applied). [`as_str`](Self::as_str)
/// returns that normalized string; it is used verbatim — after XML escaping —
/// in `<loc>` elements and `href` attributes.
#[derive(Debug, Clone)]
pub struct SitemapUri(Url);

impl SitemapUri {
    /// Parse and validate a URI string.
    ///
    /// Fails for anything `url::Url` rejects, which includes every relative
    /// reference — sitemap URLs must be absolute.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let url = Url::parse(raw).map_err(|source| ValidationError::InvalidUri {
            raw: raw.to_string(),
            source,
        })?;
        Ok(Self(url))
    }

    /// The normalized string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SitemapUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
