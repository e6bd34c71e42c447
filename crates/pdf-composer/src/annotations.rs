//! Binding pending ToC links to pages of the spliced document.

use crate::ComposerError;
use crate::splice::Splice;
use lopdf::{Document, Object, ObjectId, dictionary};
use tocsmith_types::PendingLink;

/// Creates one `/Link` annotation per pending link and attaches it to the ToC
/// page it was laid out on. Must run after `splice`.
///
/// Returns the number of annotations written.
pub fn resolve_links(
    doc: &mut Document,
    splice: &Splice,
    links: &[PendingLink],
) -> Result<usize, ComposerError> {
    for link in links {
        let source_page = splice
            .toc_page(link.toc_page)
            .ok_or(ComposerError::MissingTocPage {
                index: link.toc_page,
                available: splice.toc_page_count(),
            })?;
        let Some(dest_page) = splice.resolve_page(link.target_page) else {
            log::warn!("No page to link to for target {}", link.target_page);
            continue;
        };

        let rect: Vec<Object> = link.rect.to_array().into_iter().map(Object::from).collect();
        let annot_id = doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => rect,
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "Dest" => vec![Object::Reference(dest_page), "Fit".into()],
        });
        attach_annotation(doc, source_page, annot_id)?;
    }

    log::debug!("Resolved {} ToC link(s)", links.len());
    Ok(links.len())
}

/// Appends `annot_id` to the page's `/Annots`, which may be a direct array, a
/// reference to one, or missing.
pub fn attach_annotation(
    doc: &mut Document,
    page_id: ObjectId,
    annot_id: ObjectId,
) -> Result<(), ComposerError> {
    let indirect = match doc.get_dictionary(page_id)?.get(b"Annots") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };
    if let Some(array_id) = indirect
        && let Ok(Object::Array(annots)) = doc.get_object_mut(array_id)
    {
        annots.push(Object::Reference(annot_id));
        return Ok(());
    }

    let page = doc.get_dictionary_mut(page_id)?;
    match page.get_mut(b"Annots") {
        Ok(Object::Array(annots)) => annots.push(Object::Reference(annot_id)),
        _ => page.set("Annots", vec![Object::Reference(annot_id)]),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splice::PageIndexMap;

    fn doc_with_pages(count: u32) -> (Document, Vec<ObjectId>) {
        let mut doc = Document::with_version("1.7");
        let ids = (0..count)
            .map(|_| doc.add_object(dictionary! { "Type" => "Page" }))
            .collect();
        (doc, ids)
    }

    fn annots(doc: &Document, page_id: ObjectId) -> Vec<ObjectId> {
        let page = doc.get_dictionary(page_id).unwrap();
        let (_, array) = doc.dereference(page.get(b"Annots").unwrap()).unwrap();
        array
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o.as_reference().unwrap())
            .collect()
    }

    #[test]
    fn attaches_to_missing_direct_and_indirect_arrays() {
        let (mut doc, ids) = doc_with_pages(3);
        let a = doc.add_object(dictionary! {});
        let b = doc.add_object(dictionary! {});

        attach_annotation(&mut doc, ids[0], a).unwrap();
        attach_annotation(&mut doc, ids[0], b).unwrap();
        assert_eq!(annots(&doc, ids[0]), vec![a, b]);

        let existing = doc.add_object(vec![Object::Reference(a)]);
        doc.get_dictionary_mut(ids[1]).unwrap().set("Annots", existing);
        attach_annotation(&mut doc, ids[1], b).unwrap();
        assert_eq!(annots(&doc, ids[1]), vec![a, b]);
        assert_eq!(
            doc.get_dictionary(ids[1]).unwrap().get(b"Annots").unwrap().as_reference().unwrap(),
            existing
        );
    }

    #[test]
    fn links_point_at_mapped_and_clamped_pages() {
        let (mut doc, ids) = doc_with_pages(6);
        let splice = Splice {
            page_ids: ids.clone(),
            pages_id: (999, 0),
            index_map: PageIndexMap::new(1, 1),
        };
        let link = |target_page| PendingLink {
            toc_page: 0,
            rect: tocsmith_types::Rect::new(50.0, 480.0, 562.0, 498.0),
            target_page,
        };

        let written = resolve_links(&mut doc, &splice, &[link(3), link(42)]).unwrap();
        assert_eq!(written, 2);

        let annot_ids = annots(&doc, ids[1]);
        let dest_of = |id: ObjectId| {
            let annot = doc.get_dictionary(id).unwrap();
            assert_eq!(annot.get(b"Subtype").unwrap().as_name().unwrap(), b"Link");
            annot.get(b"Dest").unwrap().as_array().unwrap()[0].as_reference().unwrap()
        };
        assert_eq!(dest_of(annot_ids[0]), ids[3]);
        assert_eq!(dest_of(annot_ids[1]), ids[5]);
    }

    #[test]
    fn link_on_unknown_toc_page_is_an_error() {
        let (mut doc, ids) = doc_with_pages(2);
        let splice = Splice {
            page_ids: ids,
            pages_id: (999, 0),
            index_map: PageIndexMap::new(0, 1),
        };
        let stray = PendingLink {
            toc_page: 4,
            rect: tocsmith_types::Rect::new(0.0, 0.0, 1.0, 1.0),
            target_page: 1,
        };
        let err = resolve_links(&mut doc, &splice, &[stray]).unwrap_err();
        assert!(matches!(err, ComposerError::MissingTocPage { index: 4, available: 1 }));
    }
}
