//! W3C datetime formatting for `<lastmod>` values.
//!
//! The sitemap protocol takes timestamps in the W3C datetime profile of
//! ISO 8601, at any precision from a bare year down to milliseconds. The
//! generator holds one [`W3cDateFormat`] and threads it into every render
//! call, so all `<lastmod>` elements in a run share one precision.
//!
//! Timestamps are `chrono::DateTime<Utc>` and are always emitted in UTC with
//! the `Z` designator; callers with zoned inputs convert before handing the
//! value over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Precision of the emitted W3C datetime string.
///
/// The default is [`Day`](Self::Day) (`2026-03-14`), which is what most
/// sitemaps ship: search engines read `lastmod` as a freshness hint, and
/// sub-day precision rarely means anything for page content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum W3cDateFormat {
    /// `2026`
    Year,
    /// `2026-03`
    Month,
    /// `2026-03-14`
    #[default]
    Day,
    /// `2026-03-14T09:26Z`
    Minute,
    /// `2026-03-14T09:26:53Z`
    Second,
    /// `2026-03-14T09:26:53.589Z`
    Millisecond,
}

impl W3cDateFormat {
    /// Format an instant at this precision, in UTC.
    pub fn format(&self, instant: &DateTime<Utc>) -> String {
        let pattern = match self {
            Self::Year => "%Y",
            Self::Month => "%Y-%m",
            Self::Day => "%Y-%m-%d",
            Self::Minute => "%Y-%m-%dT%H:%MZ",
            Self::Second => "%Y-%m-%dT%H:%M:%SZ",
            Self::Millisecond => "%Y-%m-%dT%H:%M:%S%.3fZ",
        };
        instant.format(pattern).to_string()
    }
}
