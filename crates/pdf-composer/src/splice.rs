//! Inserting generated ToC pages into a copy of a source document.

use crate::ComposerError;
use crate::copier::ObjectCopier;
use crate::pages::page_ids;
use lopdf::{Document, Object, ObjectId, dictionary};

/// Catalog entries holding named destinations. Their page references point at
/// reserved page slots, so they follow the pages into the spliced document.
const NAMED_DEST_KEYS: [&[u8]; 2] = [b"Dests", b"Names"];

/// Maps 0-based page indices of the source document to indices in the spliced
/// document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndexMap {
    insert_index: usize,
    toc_page_count: usize,
}

impl PageIndexMap {
    pub fn new(insert_index: usize, toc_page_count: usize) -> Self {
        Self {
            insert_index,
            toc_page_count,
        }
    }

    pub fn insert_index(&self) -> usize {
        self.insert_index
    }

    pub fn toc_page_count(&self) -> usize {
        self.toc_page_count
    }

    /// Indices before the cut keep their position; the rest shift right by the
    /// number of inserted pages. Negative indices are passed through.
    pub fn map(&self, original_index: i64) -> i64 {
        if original_index < self.insert_index as i64 {
            original_index
        } else {
            original_index.saturating_add(self.toc_page_count as i64)
        }
    }
}

/// Clamps a 1-based "insert before this page" number to `[1, page_count + 1]`.
pub fn clamp_insertion_page(insertion_page: i64, page_count: usize) -> usize {
    insertion_page.clamp(1, page_count as i64 + 1) as usize
}

/// The assembled page sequence of a spliced document.
#[derive(Debug, Clone)]
pub struct Splice {
    pub page_ids: Vec<ObjectId>,
    pub pages_id: ObjectId,
    pub index_map: PageIndexMap,
}

impl Splice {
    pub fn toc_page_count(&self) -> usize {
        self.index_map.toc_page_count()
    }

    pub fn final_page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Object id of the `index`-th generated ToC page.
    pub fn toc_page(&self, index: usize) -> Option<ObjectId> {
        if index >= self.toc_page_count() {
            return None;
        }
        self.page_ids.get(self.index_map.insert_index() + index).copied()
    }

    /// Final 0-based index for a 1-based source page number: mapped, then
    /// clamped into the document.
    pub fn resolve_index(&self, target_page: i64) -> usize {
        let mapped = self.index_map.map(target_page.saturating_sub(1));
        let last = self.final_page_count().saturating_sub(1) as i64;
        if mapped < 0 || mapped > last {
            log::warn!(
                "Target page {} maps to index {} outside the {}-page document, clamping",
                target_page,
                mapped,
                self.final_page_count()
            );
        }
        mapped.clamp(0, last) as usize
    }

    pub fn resolve_page(&self, target_page: i64) -> Option<ObjectId> {
        self.page_ids.get(self.resolve_index(target_page)).copied()
    }
}

/// Copies every page of `source` into `target` around the already-written
/// `toc_page_ids`, then gives `target` a fresh page tree and catalog.
///
/// `target` is expected to hold nothing but the ToC pages and their resources.
pub fn splice(
    target: &mut Document,
    source: &Document,
    toc_page_ids: &[ObjectId],
    insertion_page: i64,
) -> Result<Splice, ComposerError> {
    let source_pages = page_ids(source);
    let insertion_page = clamp_insertion_page(insertion_page, source_pages.len());
    let insert_index = insertion_page - 1;

    let mut copier = ObjectCopier::new(source, target);
    for page_id in &source_pages {
        copier.reserve(*page_id);
    }
    let mut copied = Vec::with_capacity(source_pages.len());
    for page_id in &source_pages {
        copied.push(copier.copy_page(*page_id)?);
    }
    let info = match source.trailer.get(b"Info").and_then(Object::as_reference) {
        Ok(info_id) => Some(copier.copy_object(info_id)?),
        Err(_) => None,
    };
    let mut named_dests = Vec::new();
    if let Ok(catalog) = source.catalog() {
        for key in NAMED_DEST_KEYS {
            if let Ok(value) = catalog.get(key) {
                named_dests.push((key, copier.copy_value(value)?));
            }
        }
    }
    drop(copier);

    let (before, after) = copied.split_at(insert_index);
    let page_ids: Vec<ObjectId> = before
        .iter()
        .chain(toc_page_ids)
        .chain(after)
        .copied()
        .collect();

    let pages_id = target.new_object_id();
    for page_id in &page_ids {
        match target.get_object_mut(*page_id)? {
            Object::Dictionary(page) => page.set("Parent", pages_id),
            _ => return Err(ComposerError::NotAPage(*page_id)),
        }
    }
    target.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i64,
        }
        .into(),
    );
    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    for (key, value) in named_dests {
        catalog.set(key, value);
    }
    let catalog_id = target.add_object(catalog);
    target.trailer.set("Root", catalog_id);
    if let Some(info_id) = info {
        target.trailer.set("Info", info_id);
    }

    log::debug!(
        "Spliced {} ToC page(s) before source page {} ({} pages total)",
        toc_page_ids.len(),
        insertion_page,
        page_ids.len()
    );

    Ok(Splice {
        page_ids,
        pages_id,
        index_map: PageIndexMap::new(insert_index, toc_page_ids.len()),
    })
}
