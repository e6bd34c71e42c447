//! The ToC synthesis pipeline: number, lay out, render, splice, resolve.

use crate::config::TocConfig;
use crate::error::TocError;
use lopdf::Document;
use std::path::Path;
use tocsmith_layout::{FontLibrary, TocLayoutEngine};
use tocsmith_outline::{apply_numbering, strip_numbering};
use tocsmith_pdf_composer::{resolve_links, splice, toc_page_size, write_bookmarks};
use tocsmith_render_lopdf::render_toc_pages;
use tocsmith_types::OutlineItem;

/// A source document with its generated ToC spliced in.
#[derive(Debug)]
pub struct SynthesizedToc {
    pub document: Document,
    /// Number of ToC pages actually produced; 1 unless the outline overflowed.
    pub toc_page_count: usize,
}

impl SynthesizedToc {
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), TocError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|source| TocError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>, TocError> {
        let mut buffer = Vec::new();
        self.document
            .save_to(&mut buffer)
            .map_err(|e| TocError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}

/// Builds a copy of `source` with a linked table of contents for `outline`.
///
/// The source document and the outline are left untouched. Fonts must be
/// loaded by the caller; nothing in here touches the filesystem.
pub fn synthesize_toc(
    source: &Document,
    outline: &[OutlineItem],
    config: &TocConfig,
    fonts: &FontLibrary,
) -> Result<SynthesizedToc, TocError> {
    let items = if config.numbering {
        apply_numbering(outline, &config.levels)
    } else {
        strip_numbering(outline)
    };

    let page_size = toc_page_size(source);
    let layout_config = config.layout_config();
    let layout = TocLayoutEngine::new(fonts, &config.levels, &layout_config).layout(&items, page_size);
    log::info!(
        "Laid out {} entries on {} ToC page(s) of {}x{}pt",
        layout.links.len(),
        layout.page_count(),
        page_size.width,
        page_size.height
    );

    let mut document = Document::with_version(source.version.as_str());
    let toc_page_ids = render_toc_pages(&mut document, &layout.pages, fonts)?;
    let spliced = splice(&mut document, source, &toc_page_ids, config.insertion_page)?;
    resolve_links(&mut document, &spliced, &layout.links)?;

    if config.write_bookmarks {
        write_bookmarks(
            &mut document,
            &spliced,
            &items,
            &config.title,
            config.page_offset,
        )?;
    }

    Ok(SynthesizedToc {
        document,
        toc_page_count: spliced.toc_page_count(),
    })
}

pub fn load_document(path: impl AsRef<Path>) -> Result<Document, TocError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| TocError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let document = Document::load_mem(&bytes)?;
    log::debug!(
        "Loaded {} ({} pages)",
        path.display(),
        document.get_pages().len()
    );
    Ok(document)
}
