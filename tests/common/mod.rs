#![allow(dead_code)]

pub mod font;
pub mod pdf_assertions;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Builds a `num_pages` page A4 document where page N shows "Page N".
///
/// MediaBox and Resources sit on the page tree root so copied pages must
/// pick them up through inheritance.
pub fn source_pdf(num_pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Times-Roman",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = (1..=num_pages)
        .map(|n| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(format!("Page {n}").into_bytes(), StringFormat::Literal)],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let bytes = content.encode().unwrap_or_default();
            let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => num_pages as i64,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Resources" => resources_id,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Adds a `/Link` on page `from` pointing at page `to` (both 1-based).
pub fn add_page_link(doc: &mut Document, from: u32, to: u32) {
    let pages = doc.get_pages();
    let from_id = pages[&from];
    let to_id = pages[&to];
    let annot_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![72.into(), 600.into(), 200.into(), 620.into()],
        "Dest" => vec![Object::Reference(to_id), "Fit".into()],
        "P" => from_id,
    });
    let page = doc.get_dictionary_mut(from_id).unwrap();
    page.set("Annots", vec![Object::Reference(annot_id)]);
}

/// Adds a `/Link` on page `from` that jumps to the named destination `name`,
/// registered in the catalog's `/Names` tree as page `to`.
pub fn add_named_link(doc: &mut Document, from: u32, name: &str, to: u32) {
    let pages = doc.get_pages();
    let from_id = pages[&from];
    let to_id = pages[&to];
    let annot_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![72.into(), 500.into(), 200.into(), 520.into()],
        "Dest" => Object::string_literal(name),
        "P" => from_id,
    });
    let page = doc.get_dictionary_mut(from_id).unwrap();
    page.set("Annots", vec![Object::Reference(annot_id)]);

    let dests_id = doc.add_object(dictionary! {
        "Names" => vec![
            Object::string_literal(name),
            vec![Object::Reference(to_id), "Fit".into()].into(),
        ],
    });
    let catalog = doc.catalog_mut().unwrap();
    catalog.set("Names", dictionary! { "Dests" => dests_id });
}

/// Registers `name` in the catalog's old-style `/Dests` dictionary as page `to`.
pub fn add_catalog_dest(doc: &mut Document, name: &str, to: u32) {
    let to_id = doc.get_pages()[&to];
    let catalog = doc.catalog_mut().unwrap();
    catalog.set(
        "Dests",
        dictionary! { name => vec![Object::Reference(to_id), "Fit".into()] },
    );
}

/// Saves the document and loads it back, the way a reader would see it.
pub fn reload(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).unwrap()
}

pub fn page_id(doc: &Document, page_number: u32) -> ObjectId {
    doc.get_pages()[&page_number]
}
