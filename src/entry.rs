//! The sitemap entry model.
//!
//! An entry describes one page: its canonical location plus optional
//! protocol metadata (`lastmod`, `changefreq`, `priority`) and, for the
//! Google hreflang extension, an ordered set of alternate-language links.
//!
//! Entries are plain immutable records. All validation happens once, inside
//! [`EntryOptions::build`]; after that an entry is just data the renderer
//! can trust. The generator holds an entry only long enough to render it.
//!
//! ## Variants
//!
//! The pipeline supports a closed set of entry flavors, tagged by
//! [`VariantTag`]:
//!
//! - [`UrlEntry`] — a plain web page (the base sitemap protocol)
//! - [`AlternateLinksEntry`] — a page with `<xhtml:link rel="alternate">`
//!   children per Google's alternate-language-pages guidance
//!
//! Adding a flavor (images, news, video) means adding a variant here and a
//! render function in [`crate::render`]; the batching code never changes.
//!
//! ## Alternates are ordered and not deduplicated
//!
//! Alternates come in as an ordered string-keyed map, so supplying the same
//! *string* twice collapses last-write-wins before validation. After the
//! keys are parsed into [`SitemapUri`]s no further deduplication happens:
//! two spellings of the same resource stay two `<xhtml:link>` tags, in
//! insertion order.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::uri::{SitemapUri, ValidationError};

/// How frequently a page is likely to change (`<changefreq>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    /// The lowercase wire form used in the XML element.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFreq {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            other => Err(ValidationError::UnknownChangeFreq(other.to_string())),
        }
    }
}

/// Tag identifying an entry's variant, used for renderer dispatch and for
/// tracking which XML namespaces a batch actually needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantTag {
    Url,
    AlternateLinks,
}

/// A plain sitemap entry: location plus optional protocol metadata.
///
/// Absent optional fields mean the corresponding XML element is omitted.
#[derive(Debug, Clone)]
pub struct UrlEntry {
    location: SitemapUri,
    last_modified: Option<DateTime<Utc>>,
    change_frequency: Option<ChangeFreq>,
    priority: Option<f32>,
}

impl UrlEntry {
    pub fn location(&self) -> &SitemapUri {
        &self.location
    }

    pub fn last_modified(&self) -> Option<&DateTime<Utc>> {
        self.last_modified.as_ref()
    }

    pub fn change_frequency(&self) -> Option<ChangeFreq> {
        self.change_frequency
    }

    pub fn priority(&self) -> Option<f32> {
        self.priority
    }
}

/// A sitemap entry carrying alternate-language links.
///
/// Each alternate pairs a target URI with an ordered attribute map
/// (`hreflang` by convention, but any attribute goes through verbatim).
#[derive(Debug, Clone)]
pub struct AlternateLinksEntry {
    base: UrlEntry,
    alternates: Vec<(SitemapUri, IndexMap<String, String>)>,
}

impl AlternateLinksEntry {
    pub fn base(&self) -> &UrlEntry {
        &self.base
    }

    /// Alternates in insertion order.
    pub fn alternates(&self) -> &[(SitemapUri, IndexMap<String, String>)] {
        &self.alternates
    }
}

/// One sitemap entry of any supported variant.
#[derive(Debug, Clone)]
pub enum SitemapEntry {
    Url(UrlEntry),
    AlternateLinks(AlternateLinksEntry),
}

impl SitemapEntry {
    pub fn variant(&self) -> VariantTag {
        match self {
            Self::Url(_) => VariantTag::Url,
            Self::AlternateLinks(_) => VariantTag::AlternateLinks,
        }
    }

    pub fn location(&self) -> &SitemapUri {
        self.base().location()
    }

    /// The base-protocol fields shared by every variant.
    pub(crate) fn base(&self) -> &UrlEntry {
        match self {
            Self::Url(entry) => entry,
            Self::AlternateLinks(entry) => entry.base(),
        }
    }
}

/// Configuration for one entry, validated by [`build`](Self::build).
///
/// This is a plain options record, not a stateful builder: collect the
/// fields, call `build()` once, get an immutable [`SitemapEntry`] or a
/// [`ValidationError`]. The variant is picked by the data — any alternates
/// present make it an [`AlternateLinksEntry`], none make it a [`UrlEntry`].
///
/// ```
/// use sitemap_gen::{ChangeFreq, EntryOptions};
///
/// let entry = EntryOptions::new("https://example.com/about")
///     .change_frequency(ChangeFreq::Monthly)
///     .priority(0.4)
///     .build()?;
/// # Ok::<(), sitemap_gen::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntryOptions {
    location: String,
    last_modified: Option<DateTime<Utc>>,
    change_frequency: Option<ChangeFreq>,
    priority: Option<f32>,
    alternates: IndexMap<String, IndexMap<String, String>>,
}

impl EntryOptions {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn last_modified(mut self, instant: DateTime<Utc>) -> Self {
        self.last_modified = Some(instant);
        self
    }

    pub fn change_frequency(mut self, freq: ChangeFreq) -> Self {
        self.change_frequency = Some(freq);
        self
    }

    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Add one alternate link. Re-adding the same `href` string replaces the
    /// earlier attributes (last write wins) while keeping its original
    /// position, matching `IndexMap` insert semantics.
    pub fn alternate(
        mut self,
        href: impl Into<String>,
        attributes: IndexMap<String, String>,
    ) -> Self {
        self.alternates.insert(href.into(), attributes);
        self
    }

    /// Supply the full alternates map at once, replacing any accumulated so
    /// far.
    pub fn alternates(mut self, alternates: IndexMap<String, IndexMap<String, String>>) -> Self {
        self.alternates = alternates;
        self
    }

    /// Validate and freeze into an immutable entry.
    ///
    /// Fails if the location or any alternate key is not a valid absolute
    /// URI, or if the priority falls outside `[0.0, 1.0]`.
    pub fn build(self) -> Result<SitemapEntry, ValidationError> {
        let location = SitemapUri::parse(&self.location)?;
        if let Some(priority) = self.priority
            && !(0.0..=1.0).contains(&priority)
        {
            return Err(ValidationError::PriorityOutOfRange(priority));
        }

        let base = UrlEntry {
            location,
            last_modified: self.last_modified,
            change_frequency: self.change_frequency,
            priority: self.priority,
        };

        if self.alternates.is_empty() {
            return Ok(SitemapEntry::Url(base));
        }

        let mut alternates = Vec::with_capacity(self.alternates.len());
        for (href, attributes) in self.alternates {
            alternates.push((SitemapUri::parse(&href)?, attributes));
        }
        Ok(SitemapEntry::AlternateLinks(AlternateLinksEntry {
            base,
            alternates,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn attrs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn location_only_builds_url_variant() {
        let entry = EntryOptions::new("https://example.com/a").build().unwrap();
        assert_eq!(entry.variant(), VariantTag::Url);
        assert_eq!(entry.location().as_str(), "https://example.com/a");
        let SitemapEntry::Url(url) = entry else {
            panic!("expected Url variant");
        };
        assert!(url.last_modified().is_none());
        assert!(url.change_frequency().is_none());
        assert!(url.priority().is_none());
    }

    #[test]
    fn all_optional_fields_are_kept() {
        let t = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let entry = EntryOptions::new("https://example.com/a")
            .last_modified(t)
            .change_frequency(ChangeFreq::Weekly)
            .priority(0.8)
            .build()
            .unwrap();
        let SitemapEntry::Url(url) = entry else {
            panic!("expected Url variant");
        };
        assert_eq!(url.last_modified(), Some(&t));
        assert_eq!(url.change_frequency(), Some(ChangeFreq::Weekly));
        assert_eq!(url.priority(), Some(0.8));
    }

    #[test]
    fn invalid_location_fails() {
        let err = EntryOptions::new("not a url").build().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUri { .. }));
    }

    #[test]
    fn priority_above_one_fails() {
        let err = EntryOptions::new("https://example.com/a")
            .priority(1.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::PriorityOutOfRange(_)));
    }

    #[test]
    fn priority_bounds_are_inclusive() {
        for p in [0.0, 1.0] {
            assert!(
                EntryOptions::new("https://example.com/a")
                    .priority(p)
                    .build()
                    .is_ok()
            );
        }
    }

    #[test]
    fn alternates_build_alternate_links_variant() {
        let entry = EntryOptions::new("https://example.com/a")
            .alternate("https://example.com/es/a", attrs(&[("hreflang", "es")]))
            .alternate("https://example.com/de/a", attrs(&[("hreflang", "de")]))
            .build()
            .unwrap();
        assert_eq!(entry.variant(), VariantTag::AlternateLinks);
        let SitemapEntry::AlternateLinks(entry) = entry else {
            panic!("expected AlternateLinks variant");
        };
        let hrefs: Vec<&str> = entry
            .alternates()
            .iter()
            .map(|(uri, _)| uri.as_str())
            .collect();
        assert_eq!(
            hrefs,
            ["https://example.com/es/a", "https://example.com/de/a"]
        );
    }

    #[test]
    fn invalid_alternate_key_fails() {
        let err = EntryOptions::new("https://example.com/a")
            .alternate("::bad", attrs(&[("hreflang", "es")]))
            .build()
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUri { .. }));
    }

    #[test]
    fn duplicate_string_key_is_last_write_wins() {
        let entry = EntryOptions::new("https://example.com/a")
            .alternate("https://example.com/es/a", attrs(&[("hreflang", "es")]))
            .alternate("https://example.com/es/a", attrs(&[("hreflang", "es-MX")]))
            .build()
            .unwrap();
        let SitemapEntry::AlternateLinks(entry) = entry else {
            panic!("expected AlternateLinks variant");
        };
        assert_eq!(entry.alternates().len(), 1);
        assert_eq!(
            entry.alternates()[0].1.get("hreflang").map(String::as_str),
            Some("es-MX")
        );
    }

    #[test]
    fn attribute_order_is_preserved() {
        let entry = EntryOptions::new("https://example.com/a")
            .alternate(
                "https://m.example.com/a",
                attrs(&[("media", "only screen and (max-width: 640px)"), ("hreflang", "en")]),
            )
            .build()
            .unwrap();
        let SitemapEntry::AlternateLinks(entry) = entry else {
            panic!("expected AlternateLinks variant");
        };
        let names: Vec<&str> = entry.alternates()[0].1.keys().map(String::as_str).collect();
        assert_eq!(names, ["media", "hreflang"]);
    }

    #[test]
    fn change_freq_round_trips_through_strings() {
        for freq in [
            ChangeFreq::Always,
            ChangeFreq::Hourly,
            ChangeFreq::Daily,
            ChangeFreq::Weekly,
            ChangeFreq::Monthly,
            ChangeFreq::Yearly,
            ChangeFreq::Never,
        ] {
            assert_eq!(freq.as_str().parse::<ChangeFreq>().unwrap(), freq);
        }
        let err = "sometimes".parse::<ChangeFreq>().unwrap_err();
        assert!(matches!(err, ValidationError::UnknownChangeFreq(_)));
    }

    #[test]
    fn change_freq_serde_uses_wire_form() {
        assert_eq!(
            serde_json::to_string(&ChangeFreq::Monthly).unwrap(),
            "\"monthly\""
        );
        let parsed: ChangeFreq = serde_json::from_str("\"never\"").unwrap();
        assert_eq!(parsed, ChangeFreq::Never);
    }
}
