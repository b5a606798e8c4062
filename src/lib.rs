//! # sitemap-gen
//!
//! Generates XML sitemaps conforming to the
//! [sitemaps.org protocol](https://www.sitemaps.org/protocol.html), including
//! Google's alternate-language (`hreflang`) link extension. Feed it URL data,
//! get back well-formed XML — as strings or as files split across
//! `sitemap.xml`, `sitemap2.xml`, … at the protocol's 50,000-entry limit.
//!
//! # Architecture: Entries → Renderers → Batches
//!
//! Three pieces, each oblivious to the others' internals:
//!
//! ```text
//! 1. Entry     caller data  →  validated immutable record
//! 2. Render    entry        →  one XML <url> fragment
//! 3. Generate  fragments    →  batched documents (strings or files)
//! ```
//!
//! - **Validation happens once**, at construction: a [`SitemapEntry`] that
//!   exists is renderable, so the pipeline itself never fails on content.
//! - **Rendering is table-driven**: each entry variant maps to a render
//!   function plus the namespace declaration it needs. New sitemap flavors
//!   (images, news, video) are one table row away and the batching logic
//!   never changes.
//! - **Batching is streaming**: entries are rendered on arrival and only the
//!   current batch is held in memory, so a ten-million-URL site costs the
//!   same per-document memory as a ten-URL one.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`uri`] | Validated absolute-URI wrapper used for locations and alternate targets |
//! | [`entry`] | The entry variant family and its validating options factory |
//! | [`dates`] | W3C datetime formatting for `<lastmod>` |
//! | [`render`] | Per-variant XML fragment rendering and escaping |
//! | [`generate`] | Batching, file splitting, output, and the sitemap index |
//!
//! # Example
//!
//! ```
//! use indexmap::IndexMap;
//! use sitemap_gen::{EntryOptions, GeneratorOptions};
//!
//! let mut generator = GeneratorOptions::new("https://example.com").build()?;
//!
//! let mut attrs = IndexMap::new();
//! attrs.insert("hreflang".to_string(), "es".to_string());
//! generator.add(
//!     EntryOptions::new("https://example.com/page")
//!         .alternate("https://example.com/es/page", attrs)
//!         .build()?,
//! )?;
//!
//! let documents = generator.finalize_to_strings()?;
//! assert!(documents[0].contains(
//!     r#"<xhtml:link rel="alternate" hreflang="es" href="https://example.com/es/page"/>"#
//! ));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design Decisions
//!
//! ## Variants Over Trait Objects
//!
//! The entry family is a closed enum dispatched through a static table, not
//! a trait-object hierarchy. Sitemap flavors are few and known; a tag plus a
//! function pointer keeps dispatch transparent and lets the generator ask
//! "which namespaces does this batch need" without downcasting.
//!
//! ## Options Records Over Builders
//!
//! [`EntryOptions`] and [`GeneratorOptions`] are plain records with one
//! validating `build()` each. There is no half-constructed state to misuse:
//! either you get an immutable value the rest of the pipeline trusts
//! completely, or you get the error at the call site that caused it.
//!
//! ## No Deduplication, No Reordering
//!
//! Entries come out in exactly the order they went in, duplicates included.
//! Alternate links likewise keep insertion order and are not collapsed when
//! two spellings point at the same resource. Sitemap semantics belong to the
//! site owner; this crate only promises faithful, well-formed XML.

pub mod dates;
pub mod entry;
pub mod generate;
pub mod render;
pub mod uri;

pub use dates::W3cDateFormat;
pub use entry::{AlternateLinksEntry, ChangeFreq, EntryOptions, SitemapEntry, UrlEntry, VariantTag};
pub use generate::{GenerateError, GeneratorOptions, MAX_ENTRIES_PER_FILE, SitemapGenerator};
pub use uri::{SitemapUri, ValidationError};
