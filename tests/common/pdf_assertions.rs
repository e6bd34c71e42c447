use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// A link annotation as found on a page of the output document.
#[derive(Debug)]
pub struct LinkAnnotation {
    pub rect: [f32; 4],
    /// 1-based page number the link jumps to.
    pub dest_page: u32,
}

/// Strings shown with `Tj` on the given 1-based page, decoded as Latin-1.
pub fn shown_text(doc: &Document, page_number: u32) -> Vec<String> {
    let page_id = doc.get_pages()[&page_number];
    let bytes = doc.get_page_content(page_id).unwrap();
    Content::decode(&bytes)
        .unwrap()
        .operations
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| {
            op.operands
                .first()
                .and_then(|o| o.as_str().ok())
                .map(|s| s.iter().map(|&b| b as char).collect())
        })
        .collect()
}

/// Raw operand bytes of every `Tj` on the given 1-based page.
pub fn shown_bytes(doc: &Document, page_number: u32) -> Vec<Vec<u8>> {
    let page_id = doc.get_pages()[&page_number];
    let bytes = doc.get_page_content(page_id).unwrap();
    Content::decode(&bytes)
        .unwrap()
        .operations
        .into_iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| op.operands.first().and_then(|o| o.as_str().ok()).map(<[u8]>::to_vec))
        .collect()
}

/// The font dictionary a page's resources bind to `name`, e.g. `b"F1"`.
pub fn page_font<'a>(doc: &'a Document, page_number: u32, name: &[u8]) -> &'a Dictionary {
    let page = doc.get_dictionary(doc.get_pages()[&page_number]).unwrap();
    let resources = resolve(doc, page.get(b"Resources").unwrap()).as_dict().unwrap();
    let fonts = resolve(doc, resources.get(b"Font").unwrap()).as_dict().unwrap();
    resolve(doc, fonts.get(name).unwrap()).as_dict().unwrap()
}

/// Follows a reference, returning direct objects as they are.
pub fn deref<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    resolve(doc, object)
}

fn page_numbers(doc: &Document) -> HashMap<ObjectId, u32> {
    doc.get_pages().into_iter().map(|(n, id)| (id, n)).collect()
}

fn resolve<'a>(doc: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => doc.get_object(*id).unwrap(),
        other => other,
    }
}

/// All `/Link` annotations with a page destination on the given 1-based page.
pub fn link_annotations(doc: &Document, page_number: u32) -> Vec<LinkAnnotation> {
    let numbers = page_numbers(doc);
    let page = doc.get_dictionary(doc.get_pages()[&page_number]).unwrap();
    let Ok(annots) = page.get(b"Annots") else {
        return Vec::new();
    };

    resolve(doc, annots)
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|annot| {
            let dict = resolve(doc, annot).as_dict().ok()?;
            if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Link" {
                return None;
            }
            let dest = dict.get(b"Dest").ok()?.as_array().ok()?;
            let dest_page = numbers[&dest.first()?.as_reference().ok()?];
            let rect = dict.get(b"Rect").ok()?.as_array().ok()?;
            let rect = [0, 1, 2, 3].map(|i| rect[i].as_float().unwrap_or(f32::NAN));
            Some(LinkAnnotation { rect, dest_page })
        })
        .collect()
}

/// Page number a named destination resolves to, looked up in the catalog's
/// `/Names` tree (single leaf) when `name` is a string, `/Dests` otherwise.
pub fn named_dest_page(doc: &Document, name: &Object) -> Option<u32> {
    let numbers = page_numbers(doc);
    let catalog = doc.catalog().ok()?;
    let dest = match name {
        Object::String(key, _) => {
            let names = resolve(doc, catalog.get(b"Names").ok()?).as_dict().ok()?;
            let tree = resolve(doc, names.get(b"Dests").ok()?).as_dict().ok()?;
            let pairs = tree.get(b"Names").ok()?.as_array().ok()?;
            pairs
                .chunks_exact(2)
                .find(|pair| pair[0].as_str().ok() == Some(key.as_slice()))
                .map(|pair| resolve(doc, &pair[1]))?
        }
        Object::Name(key) => {
            let dests = resolve(doc, catalog.get(b"Dests").ok()?).as_dict().ok()?;
            resolve(doc, dests.get(key).ok()?)
        }
        _ => return None,
    };
    let target = dest.as_array().ok()?.first()?.as_reference().ok()?;
    numbers.get(&target).copied()
}

/// The raw `/Dest` values of every link on the given 1-based page.
pub fn link_dest_objects(doc: &Document, page_number: u32) -> Vec<Object> {
    let page = doc.get_dictionary(doc.get_pages()[&page_number]).unwrap();
    let Ok(annots) = page.get(b"Annots") else {
        return Vec::new();
    };
    resolve(doc, annots)
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|annot| resolve(doc, annot).as_dict().ok()?.get(b"Dest").ok().cloned())
        .collect()
}

#[macro_export]
macro_rules! assert_page_shows {
    ($doc:expr, $page:expr, $text:expr) => {
        let shown = $crate::common::pdf_assertions::shown_text(&$doc, $page);
        assert!(
            shown.iter().any(|s| s == $text),
            "Expected page {} to show '{}', found {:?}",
            $page,
            $text,
            shown
        );
    };
}
