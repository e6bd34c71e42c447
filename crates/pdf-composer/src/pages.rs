//! Page-tree queries on source documents.

use lopdf::{Document, Object, ObjectId};
use std::collections::HashSet;
use tocsmith_types::Size;

/// Page ids in reading order.
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

/// Looks `key` up on the page's ancestors. The page's own value is not checked.
pub fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut seen = HashSet::new();
    let mut current = parent_of(doc, page_id);
    while let Some(id) = current {
        if !seen.insert(id) {
            log::warn!("Cycle in page tree at {:?}", id);
            return None;
        }
        let dict = doc.get_dictionary(id).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        current = parent_of(doc, id);
    }
    None
}

fn parent_of(doc: &Document, id: ObjectId) -> Option<ObjectId> {
    doc.get_dictionary(id)
        .ok()?
        .get(b"Parent")
        .and_then(Object::as_reference)
        .ok()
}

/// Width and height of the page's `/MediaBox`, own or inherited.
pub fn page_size(doc: &Document, page_id: ObjectId) -> Option<Size> {
    let own = doc
        .get_dictionary(page_id)
        .ok()?
        .get(b"MediaBox")
        .ok()
        .cloned();
    let media_box = own.or_else(|| inherited_attribute(doc, page_id, b"MediaBox"))?;
    let (_, media_box) = doc.dereference(&media_box).ok()?;
    let values = media_box
        .as_array()
        .ok()?
        .iter()
        .map(|v| v.as_float().ok())
        .collect::<Option<Vec<f32>>>()?;
    match values.as_slice() {
        [x0, y0, x1, y1] => Some(Size::new((x1 - x0).abs(), (y1 - y0).abs())),
        _ => None,
    }
}

/// Size for generated ToC pages: the source's second page when there is one,
/// else its first, else US Letter.
pub fn toc_page_size(doc: &Document) -> Size {
    let ids = page_ids(doc);
    let sample = if ids.len() > 1 { ids.get(1) } else { ids.first() };
    sample
        .and_then(|id| page_size(doc, *id))
        .unwrap_or_else(Size::letter)
}
