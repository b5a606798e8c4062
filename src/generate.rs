//! Sitemap generation: batching, file splitting, and output.
//!
//! The generator accumulates rendered entries into a single current batch
//! and cuts a new output document whenever the batch hits the protocol
//! limits. Entries stream through in order and are never held after
//! rendering, so memory stays proportional to one document, not the whole
//! site.
//!
//! ## Lifecycle
//!
//! ```text
//! Empty ──add──▶ Accumulating ──limit reached──▶ flush ──▶ Accumulating
//!                     │
//!                 finalize ──▶ Finalized (terminal)
//! ```
//!
//! `add` flushes the current batch *before* rendering when the batch is
//! full, so the incoming entry always becomes the first of the next file.
//! After `finalize`/`finalize_to_strings`, further calls fail with
//! [`GenerateError::Lifecycle`].
//!
//! ## Output modes
//!
//! With [`GeneratorOptions::output_directory`] set, each flush writes
//! `sitemap.xml`, `sitemap2.xml`, `sitemap3.xml`, … (`.xml.gz` when gzip is
//! on) and [`SitemapGenerator::finalize`] returns the paths. Without it the
//! generator runs in string-only mode and
//! [`SitemapGenerator::finalize_to_strings`] returns the documents.
//!
//! A failed write leaves the batch intact and unflushed: the caller can fix
//! the environment and call `finalize` again without re-rendering anything.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::dates::W3cDateFormat;
use crate::entry::{SitemapEntry, VariantTag};
use crate::render::{self, SITEMAP_NS, renderer_for};
use crate::uri::ValidationError;

/// Per-file entry cap from the sitemap protocol. Overrides may lower this
/// but never raise it.
pub const MAX_ENTRIES_PER_FILE: usize = 50_000;

// The protocol caps an uncompressed sitemap at 52,428,800 bytes. The batch
// tracks fragment bytes only, so keep slack for the document header/footer
// added at flush time.
const MAX_BATCH_BYTES: usize = 52_428_800 - 1024;

const INDEX_FILE_NAME: &str = "sitemap_index.xml";

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("lifecycle error: {0}")]
    Lifecycle(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generator configuration, validated once by [`build`](Self::build).
///
/// ```no_run
/// use sitemap_gen::{EntryOptions, GeneratorOptions};
///
/// let mut generator = GeneratorOptions::new("https://example.com")
///     .output_directory("dist")
///     .build()?;
/// generator.add(EntryOptions::new("https://example.com/about").build()?)?;
/// let files = generator.finalize()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    base_url: String,
    output_directory: Option<PathBuf>,
    date_format: W3cDateFormat,
    max_entries_per_file: usize,
    gzip: bool,
}

impl GeneratorOptions {
    /// Start from a base URL; every entry added later must live under it.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            output_directory: None,
            date_format: W3cDateFormat::default(),
            max_entries_per_file: MAX_ENTRIES_PER_FILE,
            gzip: false,
        }
    }

    /// Write sitemap files into this directory. Omit for string-only mode.
    pub fn output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(dir.into());
        self
    }

    /// Precision used for `<lastmod>` values.
    pub fn date_format(mut self, format: W3cDateFormat) -> Self {
        self.date_format = format;
        self
    }

    /// Lower the per-file entry cap (the protocol maximum of 50,000 cannot
    /// be raised).
    pub fn max_entries_per_file(mut self, max: usize) -> Self {
        self.max_entries_per_file = max;
        self
    }

    /// Gzip-compress written files (`sitemap.xml.gz`, …).
    pub fn gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    /// Validate the configuration and construct the generator.
    ///
    /// Fails with [`GenerateError::Config`] for a malformed base URL, an
    /// out-of-range entry cap, or an output directory that is missing or
    /// read-only. All of this happens here, once — never per entry.
    pub fn build(self) -> Result<SitemapGenerator, GenerateError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            GenerateError::Config(format!("invalid base URL {:?}: {e}", self.base_url))
        })?;

        if self.max_entries_per_file == 0 || self.max_entries_per_file > MAX_ENTRIES_PER_FILE {
            return Err(GenerateError::Config(format!(
                "max_entries_per_file must be 1-{MAX_ENTRIES_PER_FILE}, got {}",
                self.max_entries_per_file
            )));
        }

        if let Some(dir) = &self.output_directory {
            if !dir.is_dir() {
                return Err(GenerateError::Config(format!(
                    "output directory {} does not exist",
                    dir.display()
                )));
            }
            if fs::metadata(dir)?.permissions().readonly() {
                return Err(GenerateError::Config(format!(
                    "output directory {} is not writable",
                    dir.display()
                )));
            }
        }

        Ok(SitemapGenerator {
            base_url,
            output_directory: self.output_directory,
            date_format: self.date_format,
            max_entries_per_file: self.max_entries_per_file,
            gzip: self.gzip,
            batch: Batch::default(),
            files_flushed: 0,
            written: Vec::new(),
            rendered: Vec::new(),
            finalized: false,
        })
    }
}

/// One in-progress accumulation of rendered fragments, destined for a
/// single output document.
#[derive(Debug, Default)]
struct Batch {
    fragments: String,
    entries: usize,
    /// Variants seen in this batch, insertion order. Drives which extension
    /// namespaces the `<urlset>` root declares.
    variants: Vec<VariantTag>,
}

impl Batch {
    fn note_variant(&mut self, tag: VariantTag) {
        if !self.variants.contains(&tag) {
            self.variants.push(tag);
        }
    }

    fn is_full(&self, max_entries: usize) -> bool {
        self.entries >= max_entries || self.fragments.len() >= MAX_BATCH_BYTES
    }
}

/// Streams entries into one or more sitemap documents.
///
/// Single-threaded and synchronous; wrap it in a mutex (or keep one per
/// thread) if it must be shared.
#[derive(Debug)]
pub struct SitemapGenerator {
    base_url: Url,
    output_directory: Option<PathBuf>,
    date_format: W3cDateFormat,
    max_entries_per_file: usize,
    gzip: bool,
    batch: Batch,
    files_flushed: usize,
    written: Vec<PathBuf>,
    rendered: Vec<String>,
    finalized: bool,
}

impl SitemapGenerator {
    /// Render one entry into the current batch, cutting a new document
    /// first if the batch is full.
    ///
    /// Fails with [`ValidationError::OutsideBaseUrl`] for an entry whose
    /// location does not start with the configured base URL, and with
    /// [`GenerateError::Lifecycle`] after finalization. Entry order is
    /// preserved across all output documents.
    pub fn add(&mut self, entry: SitemapEntry) -> Result<(), GenerateError> {
        if self.finalized {
            return Err(GenerateError::Lifecycle(
                "cannot add entries after finalize".into(),
            ));
        }
        if !entry.location().as_str().starts_with(self.base_url.as_str()) {
            return Err(ValidationError::OutsideBaseUrl {
                url: entry.location().as_str().to_string(),
                base: self.base_url.as_str().to_string(),
            }
            .into());
        }
        if self.batch.is_full(self.max_entries_per_file) {
            self.flush_batch()?;
        }
        render::render(&entry, &mut self.batch.fragments, &self.date_format);
        self.batch.entries += 1;
        self.batch.note_variant(entry.variant());
        Ok(())
    }

    /// Flush the remaining batch and return the paths of all files written.
    ///
    /// Only valid with an output directory configured. The generator
    /// becomes `Finalized`; any further call fails with
    /// [`GenerateError::Lifecycle`].
    pub fn finalize(&mut self) -> Result<Vec<PathBuf>, GenerateError> {
        if self.finalized {
            return Err(GenerateError::Lifecycle(
                "generator already finalized".into(),
            ));
        }
        if self.output_directory.is_none() {
            return Err(GenerateError::Config(
                "no output directory configured; use finalize_to_strings".into(),
            ));
        }
        self.flush_batch()?;
        self.finalized = true;
        Ok(self.written.clone())
    }

    /// Flush the remaining batch and return every rendered document.
    ///
    /// The string-only counterpart of [`finalize`](Self::finalize); only
    /// valid without an output directory.
    pub fn finalize_to_strings(&mut self) -> Result<Vec<String>, GenerateError> {
        if self.finalized {
            return Err(GenerateError::Lifecycle(
                "generator already finalized".into(),
            ));
        }
        if self.output_directory.is_some() {
            return Err(GenerateError::Config(
                "an output directory is configured; use finalize".into(),
            ));
        }
        self.flush_batch()?;
        self.finalized = true;
        Ok(std::mem::take(&mut self.rendered))
    }

    /// Render a `<sitemapindex>` document listing every emitted sitemap
    /// file under the base URL. Valid only after finalization.
    pub fn render_index(&self) -> Result<String, GenerateError> {
        if !self.finalized {
            return Err(GenerateError::Lifecycle(
                "finalize before rendering the sitemap index".into(),
            ));
        }
        let mut doc = String::new();
        doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        doc.push_str(&format!("<sitemapindex xmlns=\"{SITEMAP_NS}\">\n"));
        for n in 0..self.files_flushed {
            let name = self.file_name(n);
            let loc = self.base_url.join(&name).map_err(|e| {
                GenerateError::Config(format!("cannot join {name:?} to base URL: {e}"))
            })?;
            doc.push_str("  <sitemap>\n    <loc>");
            doc.push_str(&quick_xml::escape::escape(loc.as_str()));
            doc.push_str("</loc>\n  </sitemap>\n");
        }
        doc.push_str("</sitemapindex>\n");
        Ok(doc)
    }

    /// Write the sitemap index as `sitemap_index.xml` in the output
    /// directory. The index itself is never gzipped.
    pub fn write_index(&self) -> Result<PathBuf, GenerateError> {
        let Some(dir) = &self.output_directory else {
            return Err(GenerateError::Config(
                "no output directory configured for the sitemap index".into(),
            ));
        };
        let doc = self.render_index()?;
        let path = dir.join(INDEX_FILE_NAME);
        fs::write(&path, doc.as_bytes())?;
        Ok(path)
    }

    /// Name of the `n`th (zero-based) output file: `sitemap.xml`, then
    /// `sitemap2.xml`, `sitemap3.xml`, …
    fn file_name(&self, n: usize) -> String {
        let suffix = if self.gzip { ".xml.gz" } else { ".xml" };
        if n == 0 {
            format!("sitemap{suffix}")
        } else {
            format!("sitemap{}{suffix}", n + 1)
        }
    }

    /// Wrap the current batch into a complete document and emit it.
    ///
    /// On a write error the batch and flush counter are untouched, so the
    /// caller can retry the same flush.
    fn flush_batch(&mut self) -> Result<(), GenerateError> {
        if self.batch.entries == 0 {
            return Ok(());
        }
        let doc = self.wrap_document();
        match &self.output_directory {
            Some(dir) => {
                let path = dir.join(self.file_name(self.files_flushed));
                write_sink(&path, doc.as_bytes(), self.gzip)?;
                self.written.push(path);
            }
            None => self.rendered.push(doc),
        }
        self.files_flushed += 1;
        self.batch = Batch::default();
        Ok(())
    }

    /// XML declaration + `<urlset>` root + fragments + closing tag. The
    /// root declares the base namespace plus the extension namespaces of
    /// the variants actually present in this batch, nothing more.
    fn wrap_document(&self) -> String {
        let mut doc = String::with_capacity(self.batch.fragments.len() + 256);
        doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        doc.push_str(&format!("<urlset xmlns=\"{SITEMAP_NS}\""));
        for tag in &self.batch.variants {
            let ns = renderer_for(*tag).extra_namespaces;
            if !ns.is_empty() {
                doc.push(' ');
                doc.push_str(ns);
            }
        }
        doc.push_str(">\n");
        doc.push_str(&self.batch.fragments);
        doc.push_str("</urlset>\n");
        doc
    }
}

/// Write one complete document. The file handle lives only for this call;
/// on error it is closed before the error propagates (a partial file may
/// remain on disk, but nothing stays open).
fn write_sink(path: &Path, bytes: &[u8], gzip: bool) -> std::io::Result<()> {
    if gzip {
        let file = fs::File::create(path)?;
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(bytes)?;
        encoder.finish()?;
        Ok(())
    } else {
        fs::write(path, bytes)
    }
}
