//! PDF output for laid-out ToC pages using lopdf.
//!
//! `render_toc_pages` adds one page object per `TocPage` to a document, all
//! sharing a single font resource dictionary. The page dictionaries carry no
//! `/Parent`; whoever places them into a page tree sets it.

mod error;
mod fonts;
mod page;

pub use error::RenderError;
pub use fonts::{resource_name, write_font_resources};

use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use page::PageContext;
use tocsmith_layout::{FontLibrary, TocPage};

pub fn render_toc_pages(
    doc: &mut Document,
    pages: &[TocPage],
    fonts: &FontLibrary,
) -> Result<Vec<ObjectId>, RenderError> {
    if pages.is_empty() {
        return Ok(Vec::new());
    }
    let resources_id = write_font_resources(doc, fonts, pages)?;

    let mut page_ids = Vec::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        let mut ctx = PageContext::new(fonts);
        for run in &page.runs {
            ctx.draw_run(run);
        }
        let content = ctx
            .finish()
            .encode()
            .map_err(|e| RenderError::ContentEncoding {
                page: index + 1,
                message: e.to_string(),
            })?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), page.size.width.into(), page.size.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    log::debug!("Rendered {} ToC page object(s)", page_ids.len());
    Ok(page_ids)
}

/// Raw content bytes of a page written by `render_toc_pages`.
pub fn page_content(doc: &Document, page_id: ObjectId) -> Result<Vec<u8>, RenderError> {
    let page = doc.get_object(page_id)?.as_dict()?;
    let content_id = page.get(b"Contents")?.as_reference()?;
    match doc.get_object(content_id)? {
        Object::Stream(stream) => Ok(stream.content.clone()),
        _ => Err(RenderError::Pdf(format!("Contents of {:?} is not a stream", page_id))),
    }
}
