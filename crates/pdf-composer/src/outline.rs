//! PDF document outlines (bookmarks): writing the ToC tree as bookmarks and
//! importing an existing bookmark tree as an outline.

use crate::ComposerError;
use crate::splice::Splice;
use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat, dictionary};
use std::collections::{HashMap, HashSet};
use tocsmith_types::OutlineItem;

/// Name-tree nesting deeper than this is treated as malformed.
const MAX_NAME_TREE_DEPTH: usize = 32;

/// Encodes a PDF text string: plain bytes for ASCII, UTF-16BE with BOM otherwise.
pub fn encode_text_string(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

pub fn decode_text_string(bytes: &[u8]) -> String {
    match bytes {
        [0xFE, 0xFF, rest @ ..] => {
            let units: Vec<u16> = rest
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        }
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        _ => bytes.iter().map(|&b| b as char).collect(),
    }
}

struct BookmarkNode {
    id: ObjectId,
    title: String,
    dest: ObjectId,
    children: Vec<BookmarkNode>,
}

/// Writes `/Outlines` for the spliced document: a leading entry titled
/// `heading` pointing at the first ToC page, then the outline tree with every
/// destination shifted by `page_offset` and resolved like a ToC link.
///
/// Returns `None` when there is nothing to write.
pub fn write_bookmarks(
    doc: &mut Document,
    splice: &Splice,
    items: &[OutlineItem],
    heading: &str,
    page_offset: i64,
) -> Result<Option<ObjectId>, ComposerError> {
    let mut roots = Vec::new();
    if let Some(first_toc) = splice.toc_page(0) {
        roots.push(BookmarkNode {
            id: doc.new_object_id(),
            title: heading.to_string(),
            dest: first_toc,
            children: Vec::new(),
        });
    }
    roots.extend(build_nodes(doc, splice, items, page_offset));
    if roots.is_empty() {
        return Ok(None);
    }

    let outline_root_id = doc.new_object_id();
    write_level(doc, &roots, outline_root_id);
    let (first, last) = (roots[0].id, roots[roots.len() - 1].id);
    doc.objects.insert(
        outline_root_id,
        dictionary! {
            "Type" => "Outlines",
            "First" => first,
            "Last" => last,
            "Count" => roots.len() as i64,
        }
        .into(),
    );

    let catalog_id = doc.trailer.get(b"Root")?.as_reference()?;
    doc.get_dictionary_mut(catalog_id)?
        .set("Outlines", outline_root_id);

    log::debug!("Wrote {} top-level bookmark(s)", roots.len());
    Ok(Some(outline_root_id))
}

fn build_nodes(
    doc: &mut Document,
    splice: &Splice,
    items: &[OutlineItem],
    page_offset: i64,
) -> Vec<BookmarkNode> {
    items
        .iter()
        .filter_map(|item| {
            let dest = splice.resolve_page(item.target_page.saturating_add(page_offset))?;
            Some(BookmarkNode {
                id: doc.new_object_id(),
                title: item.display_title(),
                dest,
                children: build_nodes(doc, splice, &item.children, page_offset),
            })
        })
        .collect()
}

fn write_level(doc: &mut Document, items: &[BookmarkNode], parent_id: ObjectId) {
    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! {
            "Title" => Object::String(encode_text_string(&item.title), StringFormat::Literal),
            "Parent" => parent_id,
            "Dest" => vec![Object::Reference(item.dest), "Fit".into()],
        };
        if i > 0 {
            dict.set("Prev", items[i - 1].id);
        }
        if let Some(next) = items.get(i + 1) {
            dict.set("Next", next.id);
        }
        if let (Some(first), Some(last)) = (item.children.first(), item.children.last()) {
            dict.set("First", first.id);
            dict.set("Last", last.id);
            // Negative: closed
            dict.set("Count", -(item.children.len() as i64));
            write_level(doc, &item.children, item.id);
        }
        doc.objects.insert(item.id, dict.into());
    }
}

/// Reads the document's bookmark tree as an outline with 1-based page numbers.
///
/// Destinations that cannot be resolved to a page of `doc` become page 1.
/// Malformed trees that loop back on themselves are cut at the repeat.
pub fn import_outline(doc: &Document) -> Result<Vec<OutlineItem>, ComposerError> {
    let catalog = doc.catalog()?;
    let Ok(outlines) = catalog.get(b"Outlines") else {
        return Ok(Vec::new());
    };
    let (_, outlines) = doc.dereference(outlines)?;
    let Ok(first) = outlines.as_dict().and_then(|d| d.get(b"First")).and_then(Object::as_reference) else {
        return Ok(Vec::new());
    };

    let page_numbers: HashMap<ObjectId, u32> = doc
        .get_pages()
        .into_iter()
        .map(|(number, id)| (id, number))
        .collect();
    let mut importer = OutlineImporter {
        doc,
        catalog,
        page_numbers,
        visited: HashSet::new(),
    };
    let items = importer.read_siblings(first);
    log::debug!("Imported {} outline entries", tocsmith_types::count_items(&items));
    Ok(items)
}

struct OutlineImporter<'a> {
    doc: &'a Document,
    catalog: &'a Dictionary,
    page_numbers: HashMap<ObjectId, u32>,
    visited: HashSet<ObjectId>,
}

impl OutlineImporter<'_> {
    fn read_siblings(&mut self, first: ObjectId) -> Vec<OutlineItem> {
        let mut items = Vec::new();
        let mut current = Some(first);
        while let Some(id) = current {
            if !self.visited.insert(id) {
                log::warn!("Bookmark {:?} visited twice, cutting the cycle", id);
                break;
            }
            let Ok(dict) = self.doc.get_dictionary(id) else {
                log::warn!("Bookmark {:?} is not a dictionary", id);
                break;
            };

            let title = dict
                .get(b"Title")
                .ok()
                .and_then(|t| self.doc.dereference(t).ok())
                .and_then(|(_, t)| t.as_str().ok())
                .map(decode_text_string)
                .unwrap_or_default();
            let target_page = self.destination_page(dict).unwrap_or_else(|| {
                log::warn!("Bookmark '{}' has no resolvable destination, using page 1", title);
                1
            });
            let children = match dict.get(b"First").and_then(Object::as_reference) {
                Ok(child) => self.read_siblings(child),
                Err(_) => Vec::new(),
            };

            items.push(OutlineItem::new(title, target_page).with_children(children));
            current = dict.get(b"Next").and_then(Object::as_reference).ok();
        }
        items
    }

    fn destination_page(&self, bookmark: &Dictionary) -> Option<i64> {
        if let Ok(dest) = bookmark.get(b"Dest") {
            return self.resolve_dest(dest);
        }
        let (_, action) = self.doc.dereference(bookmark.get(b"A").ok()?).ok()?;
        let action = action.as_dict().ok()?;
        if action.get(b"S").and_then(Object::as_name).ok()? != b"GoTo" {
            return None;
        }
        self.resolve_dest(action.get(b"D").ok()?)
    }

    fn resolve_dest(&self, dest: &Object) -> Option<i64> {
        let (_, dest) = self.doc.dereference(dest).ok()?;
        match dest {
            Object::Array(parts) => self.page_of(parts.first()?),
            // Named destination objects may wrap the array as << /D [...] >>
            Object::Dictionary(d) => self.resolve_dest(d.get(b"D").ok()?),
            Object::Name(name) => {
                let dests = self.catalog.get(b"Dests").ok()?;
                let (_, dests) = self.doc.dereference(dests).ok()?;
                self.resolve_dest(dests.as_dict().ok()?.get(name).ok()?)
            }
            Object::String(name, _) => {
                let names = self.catalog.get(b"Names").ok()?;
                let (_, names) = self.doc.dereference(names).ok()?;
                let tree = names.as_dict().ok()?.get(b"Dests").ok()?;
                let found = self.lookup_name_tree(tree, name, 0)?;
                self.resolve_dest(found)
            }
            _ => None,
        }
    }

    fn page_of(&self, target: &Object) -> Option<i64> {
        match target {
            Object::Reference(id) => self.page_numbers.get(id).map(|n| *n as i64),
            // Page index form used by remote go-to destinations
            Object::Integer(index) => Some(index + 1),
            _ => None,
        }
    }

    fn lookup_name_tree<'s>(&'s self, node: &'s Object, key: &[u8], depth: usize) -> Option<&'s Object> {
        if depth > MAX_NAME_TREE_DEPTH {
            return None;
        }
        let (_, node) = self.doc.dereference(node).ok()?;
        let node = node.as_dict().ok()?;
        if let Ok(names) = node.get(b"Names").and_then(Object::as_array) {
            for pair in names.chunks_exact(2) {
                if pair[0].as_str().ok() == Some(key) {
                    return Some(&pair[1]);
                }
            }
        }
        let kids = node.get(b"Kids").and_then(Object::as_array).ok()?;
        kids.iter()
            .find_map(|kid| self.lookup_name_tree(kid, key, depth + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_strings_round_trip() {
        for text in ["Intro", "Café", "第一章 总论", ""] {
            assert_eq!(decode_text_string(&encode_text_string(text)), text);
        }
        assert_eq!(&encode_text_string("é")[..2], &[0xFE, 0xFF]);
        assert_eq!(decode_text_string(b"Caf\xe9"), "Café");
    }

    /// Three blank pages and a catalog, returning the page ids in order.
    fn three_page_document() -> (Document, Vec<ObjectId>) {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();
        let page_ids: Vec<ObjectId> = (0..3)
            .map(|_| doc.add_object(dictionary! { "Type" => "Page", "Parent" => pages_id }))
            .collect();
        let kids: Vec<Object> = page_ids.iter().map(|&id| id.into()).collect();
        doc.objects.insert(
            pages_id,
            dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => 3 }.into(),
        );
        let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        doc.trailer.set("Root", catalog_id);
        (doc, page_ids)
    }

    #[test]
    fn string_destinations_resolve_through_nested_name_trees() {
        let (mut doc, pages) = three_page_document();
        let leaf = doc.add_object(dictionary! {
            "Limits" => vec![Object::string_literal("a"), Object::string_literal("z")],
            "Names" => vec![
                Object::string_literal("intro"),
                vec![pages[0].into(), "Fit".into()].into(),
                Object::string_literal("sec3"),
                dictionary! { "D" => vec![pages[2].into(), "Fit".into()] }.into(),
            ],
        });
        let bookmark_id = doc.new_object_id();
        let outlines_id = doc.add_object(dictionary! {
            "Type" => "Outlines",
            "First" => bookmark_id,
            "Last" => bookmark_id,
            "Count" => 1,
        });
        doc.objects.insert(
            bookmark_id,
            dictionary! {
                "Title" => Object::string_literal("Section 3"),
                "Parent" => outlines_id,
                "Dest" => Object::string_literal("sec3"),
            }
            .into(),
        );
        let catalog = doc.catalog_mut().unwrap();
        catalog.set("Outlines", outlines_id);
        catalog.set("Names", dictionary! { "Dests" => dictionary! { "Kids" => vec![leaf.into()] } });

        let items = import_outline(&doc).unwrap();
        assert_eq!(items, vec![OutlineItem::new("Section 3", 3)]);
    }

    #[test]
    fn unknown_named_destinations_fall_back_to_first_page() {
        let (mut doc, _) = three_page_document();
        let bookmark_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal("Missing"),
            "Dest" => Object::string_literal("nowhere"),
        });
        let outlines_id = doc.add_object(dictionary! { "First" => bookmark_id });
        doc.catalog_mut().unwrap().set("Outlines", outlines_id);

        let items = import_outline(&doc).unwrap();
        assert_eq!(items[0].target_page, 1);
    }
}
