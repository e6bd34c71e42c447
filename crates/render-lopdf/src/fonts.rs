//! Font resource dictionaries for ToC pages.
//!
//! The regular face is always `/F1` and the bold face `/F2`. Standard faces
//! become Type1 references to the base-14 Helvetica pair with WinAnsi
//! encoding. TrueType faces are embedded whole (`FontFile2`) as Type0 fonts
//! with `Identity-H` encoding: content strings are two-byte glyph ids, and a
//! `ToUnicode` CMap maps the glyphs actually drawn back to text.

use crate::RenderError;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::{BTreeMap, BTreeSet};
use tocsmith_layout::{FontFace, FontLibrary, FontRole, TocPage, TrueTypeFace};

/// Upper bound on entries in one `beginbfchar` section.
const BFCHAR_CHUNK: usize = 100;

pub fn resource_name(role: FontRole) -> &'static str {
    match role {
        FontRole::Regular => "F1",
        FontRole::Bold => "F2",
    }
}

/// Writes one shared `/Resources` dictionary for all ToC pages.
///
/// `pages` decides which glyphs embedded faces get widths and `ToUnicode`
/// entries for.
pub fn write_font_resources(
    doc: &mut Document,
    fonts: &FontLibrary,
    pages: &[TocPage],
) -> Result<ObjectId, RenderError> {
    let mut written: Vec<(&FontFace, ObjectId)> = Vec::new();
    let mut font_dict = Dictionary::new();

    for (role, face) in fonts.faces() {
        let existing = written
            .iter()
            .find(|(other, _)| same_face(other, face))
            .map(|(_, id)| *id);
        let font_id = match existing {
            Some(id) => id,
            None => {
                let id = write_font(doc, face, &used_chars(fonts, face, pages))?;
                written.push((face, id));
                id
            }
        };
        font_dict.set(resource_name(role), font_id);
    }

    Ok(doc.add_object(dictionary! {
        "Font" => font_dict,
        "ProcSet" => vec!["PDF".into(), "Text".into()],
    }))
}

fn same_face(a: &FontFace, b: &FontFace) -> bool {
    match (a, b) {
        (FontFace::Standard(x), FontFace::Standard(y)) => x == y,
        (FontFace::TrueType(x), FontFace::TrueType(y)) => std::sync::Arc::ptr_eq(x, y),
        _ => false,
    }
}

/// Every character drawn with `face`, whichever role it was drawn under.
fn used_chars(fonts: &FontLibrary, face: &FontFace, pages: &[TocPage]) -> BTreeSet<char> {
    pages
        .iter()
        .flat_map(|page| &page.runs)
        .filter(|run| same_face(fonts.face(run.role), face))
        .flat_map(|run| run.text.chars())
        .collect()
}

fn write_font(doc: &mut Document, face: &FontFace, used: &BTreeSet<char>) -> Result<ObjectId, RenderError> {
    match face {
        FontFace::Standard(font) => Ok(doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        })),
        FontFace::TrueType(tt) => write_truetype(doc, tt, used),
    }
}

fn literal(text: &str) -> Object {
    Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
}

fn write_truetype(doc: &mut Document, tt: &TrueTypeFace, used: &BTreeSet<char>) -> Result<ObjectId, RenderError> {
    // Glyph id -> first character drawn with it.
    let mut glyphs: BTreeMap<u16, char> = BTreeMap::new();
    for &ch in used {
        if let Some(gid) = tt.glyph_id(ch) {
            glyphs.entry(gid).or_insert(ch);
        }
    }

    let data = tt.data().to_vec();
    let file_id = doc.add_object(Stream::new(
        dictionary! { "Length1" => data.len() as i64 },
        data,
    ));

    let metrics = tt.metrics();
    let name = Object::Name(tt.postscript_name().as_bytes().to_vec());
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => name.clone(),
        // Symbolic
        "Flags" => 4,
        "FontBBox" => metrics.bbox.iter().map(|v| Object::Integer(v.round() as i64)).collect::<Vec<_>>(),
        "ItalicAngle" => 0,
        "Ascent" => metrics.ascent.round() as i64,
        "Descent" => metrics.descent.round() as i64,
        "CapHeight" => metrics.cap_height.round() as i64,
        "StemV" => 80,
        "FontFile2" => file_id,
    });

    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => name.clone(),
        "CIDSystemInfo" => dictionary! {
            "Registry" => literal("Adobe"),
            "Ordering" => literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => 1000,
        "W" => cid_widths(tt, &glyphs),
        "CIDToGIDMap" => "Identity",
    });
    let to_unicode_id = doc.add_object(Stream::new(dictionary! {}, to_unicode_cmap(&glyphs).into_bytes()));

    log::debug!(
        "Embedding TrueType font '{}' with {} used glyph(s)",
        tt.postscript_name(),
        glyphs.len()
    );
    Ok(doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => name,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    }))
}

/// `/W` array in `c [w1 w2 ...]` form, one group per run of consecutive ids.
fn cid_widths(tt: &TrueTypeFace, glyphs: &BTreeMap<u16, char>) -> Vec<Object> {
    let mut result = Vec::new();
    let mut group: Option<(u16, Vec<Object>)> = None;

    for &gid in glyphs.keys() {
        let width = Object::Integer(tt.advance(gid).round() as i64);
        if let Some((start, widths)) = &mut group
            && usize::from(*start) + widths.len() == usize::from(gid)
        {
            widths.push(width);
            continue;
        }
        if let Some((start, widths)) = group.replace((gid, vec![width])) {
            result.push(Object::Integer(start.into()));
            result.push(Object::Array(widths));
        }
    }
    if let Some((start, widths)) = group {
        result.push(Object::Integer(start.into()));
        result.push(Object::Array(widths));
    }
    result
}

fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for chunk in entries.chunks(BFCHAR_CHUNK) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (gid, ch) in chunk {
            let mut units = [0u16; 2];
            let utf16: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{:04X}", u))
                .collect();
            cmap.push_str(&format!("<{:04X}> <{}>\n", gid, utf16));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
    );
    cmap
}
