//! A minimal TrueType font with printable ASCII and a handful of CJK glyphs,
//! enough for the layout and the embedding code to treat it as a real face.

/// CJK characters the font covers, in codepoint order.
const CJK: [char; 13] = [
    '一', '七', '三', '九', '二', '五', '八', '六', '十', '四', '录', '目', '零',
];

const ASCII_ADVANCE: u16 = 600;
const CJK_ADVANCE: u16 = 1000;

/// Glyph id for `ch`: 1..=95 for printable ASCII, then the CJK set; 0 otherwise.
pub fn glyph_id(ch: char) -> u16 {
    match ch {
        ' '..='~' => ch as u16 - 0x1F,
        _ => CJK
            .iter()
            .position(|&c| c == ch)
            .map(|i| 96 + i as u16)
            .unwrap_or(0),
    }
}

/// The two-byte glyph string a content stream shows for `text`.
pub fn glyph_bytes(text: &str) -> Vec<u8> {
    text.chars().flat_map(|c| glyph_id(c).to_be_bytes()).collect()
}

pub fn cjk_test_font() -> Vec<u8> {
    let num_glyphs = 1 + 95 + CJK.len() as u16;
    let tables: [(&[u8; 4], Vec<u8>); 5] = [
        (b"cmap", cmap()),
        (b"head", head()),
        (b"hhea", hhea(num_glyphs)),
        (b"hmtx", hmtx()),
        (b"maxp", maxp(num_glyphs)),
    ];

    let mut font = Vec::new();
    font.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    font.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    // searchRange, entrySelector, rangeShift for five tables
    for v in [64u16, 2, 16] {
        font.extend_from_slice(&v.to_be_bytes());
    }

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in &tables {
        font.extend_from_slice(*tag);
        font.extend_from_slice(&0u32.to_be_bytes());
        font.extend_from_slice(&(offset as u32).to_be_bytes());
        font.extend_from_slice(&(data.len() as u32).to_be_bytes());

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }
    font.extend_from_slice(&body);
    font
}

fn head() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // fontRevision
    t.extend_from_slice(&0u32.to_be_bytes()); // checkSumAdjustment
    t.extend_from_slice(&0x5F0F_3CF5u32.to_be_bytes()); // magicNumber
    t.extend_from_slice(&0u16.to_be_bytes()); // flags
    t.extend_from_slice(&1000u16.to_be_bytes()); // unitsPerEm
    t.extend_from_slice(&[0; 16]); // created, modified
    for v in [0i16, -200, 1000, 800] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&0u16.to_be_bytes()); // macStyle
    t.extend_from_slice(&8u16.to_be_bytes()); // lowestRecPPEM
    t.extend_from_slice(&2i16.to_be_bytes()); // fontDirectionHint
    t.extend_from_slice(&0i16.to_be_bytes()); // indexToLocFormat
    t.extend_from_slice(&0i16.to_be_bytes()); // glyphDataFormat
    t
}

fn hhea(num_glyphs: u16) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    for v in [800i16, -200, 0] {
        t.extend_from_slice(&v.to_be_bytes());
    }
    t.extend_from_slice(&[0; 24]);
    t.extend_from_slice(&num_glyphs.to_be_bytes()); // numberOfHMetrics
    t
}

fn hmtx() -> Vec<u8> {
    let advances = std::iter::once(500)
        .chain(std::iter::repeat_n(ASCII_ADVANCE, 95))
        .chain(std::iter::repeat_n(CJK_ADVANCE, CJK.len()));
    let mut t = Vec::new();
    for advance in advances {
        t.extend_from_slice(&advance.to_be_bytes());
        t.extend_from_slice(&0i16.to_be_bytes());
    }
    t
}

fn maxp(num_glyphs: u16) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0000_5000u32.to_be_bytes());
    t.extend_from_slice(&num_glyphs.to_be_bytes());
    t
}

/// Windows full-repertoire format 12 subtable.
fn cmap() -> Vec<u8> {
    let mut groups: Vec<(u32, u32, u32)> = vec![(0x20, 0x7E, 1)];
    groups.extend(CJK.iter().map(|&c| (c as u32, c as u32, glyph_id(c) as u32)));

    let mut t = Vec::new();
    t.extend_from_slice(&0u16.to_be_bytes()); // version
    t.extend_from_slice(&1u16.to_be_bytes()); // numTables
    t.extend_from_slice(&3u16.to_be_bytes()); // platformID
    t.extend_from_slice(&10u16.to_be_bytes()); // encodingID
    t.extend_from_slice(&12u32.to_be_bytes()); // subtable offset

    let length = 16 + 12 * groups.len() as u32;
    t.extend_from_slice(&12u16.to_be_bytes());
    t.extend_from_slice(&0u16.to_be_bytes());
    t.extend_from_slice(&length.to_be_bytes());
    t.extend_from_slice(&0u32.to_be_bytes()); // language
    t.extend_from_slice(&(groups.len() as u32).to_be_bytes());
    for (start, end, glyph) in groups {
        t.extend_from_slice(&start.to_be_bytes());
        t.extend_from_slice(&end.to_be_bytes());
        t.extend_from_slice(&glyph.to_be_bytes());
    }
    t
}
