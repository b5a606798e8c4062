//! Entry rendering: one XML `<url>` fragment per entry.
//!
//! Dispatch is table-driven. [`RENDERERS`] maps each [`VariantTag`] to a
//! plain render function plus the `xmlns:*` declaration the document root
//! must carry when that variant appears in a batch. Adding a sitemap flavor
//! means adding one row here — the generator walks the table and never
//! matches on variants itself.
//!
//! All text and attribute values go through `quick_xml`'s escaper, so `&`,
//! `<`, `>`, `"` and `'` survive a round trip through any XML parser.
//! Renderers append to the batch's buffer and cannot fail: entries were
//! validated at construction, and writing to a `String` does not error.

use quick_xml::escape::escape;

use crate::dates::W3cDateFormat;
use crate::entry::{AlternateLinksEntry, SitemapEntry, UrlEntry, VariantTag};

/// The base sitemap protocol namespace, declared on every `<urlset>`.
pub(crate) const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// The XHTML namespace declaration contributed by alternate-links entries.
const XHTML_NS_DECL: &str = r#"xmlns:xhtml="http://www.w3.org/1999/xhtml""#;

/// One row of the dispatch table.
pub(crate) struct Renderer {
    pub tag: VariantTag,
    /// `xmlns:*` attribute(s) for the document root, or `""` for variants
    /// that only use base-protocol elements.
    pub extra_namespaces: &'static str,
    pub render: fn(&SitemapEntry, &mut String, &W3cDateFormat),
}

/// The closed set of supported variants.
pub(crate) static RENDERERS: &[Renderer] = &[
    Renderer {
        tag: VariantTag::Url,
        extra_namespaces: "",
        render: render_url,
    },
    Renderer {
        tag: VariantTag::AlternateLinks,
        extra_namespaces: XHTML_NS_DECL,
        render: render_alternate_links,
    },
];

pub(crate) fn renderer_for(tag: VariantTag) -> &'static Renderer {
    RENDERERS
        .iter()
        .find(|renderer| renderer.tag == tag)
        .unwrap_or_else(|| unreachable!("no renderer registered for {tag:?}"))
}

/// Render one entry into `buffer` via its variant's table row.
pub(crate) fn render(entry: &SitemapEntry, buffer: &mut String, dates: &W3cDateFormat) {
    (renderer_for(entry.variant()).render)(entry, buffer, dates);
}

fn render_url(entry: &SitemapEntry, buffer: &mut String, dates: &W3cDateFormat) {
    render_base(entry.base(), buffer, dates, "");
}

fn render_alternate_links(entry: &SitemapEntry, buffer: &mut String, dates: &W3cDateFormat) {
    let SitemapEntry::AlternateLinks(entry) = entry else {
        return;
    };
    let extension = render_links(entry);
    render_base(entry.base(), buffer, dates, &extension);
}

/// The `<xhtml:link rel="alternate" .../>` block, one self-closing tag per
/// alternate, attributes in insertion order, `href` always last.
fn render_links(entry: &AlternateLinksEntry) -> String {
    let mut block = String::new();
    for (href, attributes) in entry.alternates() {
        block.push_str("    <xhtml:link rel=\"alternate\"");
        for (name, value) in attributes {
            block.push(' ');
            block.push_str(name);
            block.push_str("=\"");
            block.push_str(&escape(value.as_str()));
            block.push('"');
        }
        block.push_str(" href=\"");
        block.push_str(&escape(href.as_str()));
        block.push_str("\"/>\n");
    }
    block
}

/// Shared base-protocol rendering. Variant-specific tags arrive as a
/// pre-rendered `extension` block inserted before `</url>`.
fn render_base(entry: &UrlEntry, buffer: &mut String, dates: &W3cDateFormat, extension: &str) {
    buffer.push_str("  <url>\n");
    buffer.push_str("    <loc>");
    buffer.push_str(&escape(entry.location().as_str()));
    buffer.push_str("</loc>\n");
    if let Some(instant) = entry.last_modified() {
        buffer.push_str("    <lastmod>");
        buffer.push_str(&dates.format(instant));
        buffer.push_str("</lastmod>\n");
    }
    if let Some(freq) = entry.change_frequency() {
        buffer.push_str("    <changefreq>");
        buffer.push_str(freq.as_str());
        buffer.push_str("</changefreq>\n");
    }
    if let Some(priority) = entry.priority() {
        buffer.push_str("    <priority>");
        buffer.push_str(&format_priority(priority));
        buffer.push_str("</priority>\n");
    }
    buffer.push_str(extension);
    buffer.push_str("  </url>\n");
}

/// Whole values render with one decimal (`1.0`, not `1`); everything else
/// keeps its natural precision (`0.85`).
fn format_priority(priority: f32) -> String {
    if priority.fract() == 0.0 {
        format!("{priority:.1}")
    } else {
        format!("{priority}")
    }
}
