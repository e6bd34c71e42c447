//! Font faces and metrics for ToC layout.
//!
//! A `FontLibrary` holds the regular and bold faces the ToC is set in. A face
//! is either one of the standard Helvetica pair (no font file, built-in AFM
//! widths) or a TrueType font loaded through a `ResourceProvider`.
//!
//! Standard faces are written as simple WinAnsi fonts and support exactly the
//! characters of that code page. TrueType faces are embedded as composite
//! fonts addressed by glyph id, so they support whatever the face has a glyph
//! for, CJK included.

use crate::LayoutError;
use crate::afm;
use crate::encoding::win_ansi_byte;
use std::sync::Arc;
use tocsmith_traits::{FontRole, ResourceProvider, SharedResourceData, TextMeasurer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn glyph_width(&self, ch: char) -> u16 {
        afm::helvetica_width(ch, matches!(self, StandardFont::HelveticaBold))
    }
}

/// Descriptor values in glyph space (1/1000 em), as `/FontDescriptor` wants them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
    pub bbox: [f32; 4],
}

/// A TrueType font whose bytes are embedded into the output document.
pub struct TrueTypeFace {
    data: SharedResourceData,
    postscript_name: String,
    units_per_em: f32,
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("postscript_name", &self.postscript_name)
            .field("data_len", &self.data.len())
            .finish()
    }
}

impl TrueTypeFace {
    pub fn from_bytes(name: &str, data: SharedResourceData) -> Result<Self, LayoutError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| LayoutError::FontParse {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let postscript_name = face
            .names()
            .into_iter()
            .filter(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .find_map(|n| n.to_string())
            .map(|n| n.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-').collect::<String>())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "EmbeddedFont".to_string());
        let units_per_em = face.units_per_em().max(1) as f32;

        log::debug!("Parsed TrueType font '{}' ({} bytes)", postscript_name, data.len());
        Ok(Self {
            data,
            postscript_name,
            units_per_em,
        })
    }

    /// Creates a lightweight Face view over the font data.
    pub fn as_face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, 0).ok()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    fn scale(&self, units: f32) -> f32 {
        units * 1000.0 / self.units_per_em
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.as_face()
            .and_then(|face| face.glyph_index(ch))
            .map(|g| g.0)
    }

    /// Advance width of glyph `gid` in 1/1000 em.
    pub fn advance(&self, gid: u16) -> f32 {
        self.as_face()
            .and_then(|face| face.glyph_hor_advance(ttf_parser::GlyphId(gid)))
            .map(|adv| self.scale(adv as f32))
            .unwrap_or(0.0)
    }

    /// Advance width of `ch` in 1/1000 em; 0 when the face lacks the glyph.
    pub fn glyph_width(&self, ch: char) -> f32 {
        self.glyph_id(ch).map(|gid| self.advance(gid)).unwrap_or(0.0)
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.glyph_id(ch).is_some()
    }

    pub fn metrics(&self) -> FaceMetrics {
        let Some(face) = self.as_face() else {
            return FaceMetrics {
                ascent: 800.0,
                descent: -200.0,
                cap_height: 700.0,
                bbox: [0.0, -200.0, 1000.0, 800.0],
            };
        };
        let bbox = face.global_bounding_box();
        let ascent = self.scale(face.ascender() as f32);
        FaceMetrics {
            ascent,
            descent: self.scale(face.descender() as f32),
            cap_height: face
                .capital_height()
                .map(|h| self.scale(h as f32))
                .unwrap_or(ascent),
            bbox: [
                self.scale(bbox.x_min as f32),
                self.scale(bbox.y_min as f32),
                self.scale(bbox.x_max as f32),
                self.scale(bbox.y_max as f32),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub enum FontFace {
    Standard(StandardFont),
    TrueType(Arc<TrueTypeFace>),
}

impl FontFace {
    /// Loads a TrueType face from `provider`.
    pub fn load_truetype(provider: &dyn ResourceProvider, path: &str) -> Result<Self, LayoutError> {
        log::debug!("Loading font '{}' via {}", path, provider.name());
        let data = provider.load(path).map_err(|source| LayoutError::FontLoad {
            path: path.to_string(),
            source,
        })?;
        Ok(FontFace::TrueType(Arc::new(TrueTypeFace::from_bytes(path, data)?)))
    }

    /// Width of `ch` in 1/1000 em.
    pub fn glyph_width(&self, ch: char) -> f32 {
        match self {
            FontFace::Standard(font) => font.glyph_width(ch) as f32,
            FontFace::TrueType(face) => face.glyph_width(ch),
        }
    }

    pub fn supports(&self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self {
            FontFace::Standard(_) => win_ansi_byte(ch).is_some(),
            FontFace::TrueType(face) => face.has_glyph(ch),
        }
    }
}

/// The regular/bold face pair used to draw a ToC.
#[derive(Debug, Clone)]
pub struct FontLibrary {
    regular: FontFace,
    bold: FontFace,
}

impl FontLibrary {
    pub fn new(regular: FontFace, bold: FontFace) -> Self {
        Self { regular, bold }
    }

    /// Helvetica and Helvetica-Bold; needs no font files.
    pub fn standard() -> Self {
        Self::new(
            FontFace::Standard(StandardFont::Helvetica),
            FontFace::Standard(StandardFont::HelveticaBold),
        )
    }

    /// Loads both faces from TrueType files served by `provider`.
    ///
    /// Any missing or unparsable file aborts with an error; no partial library
    /// is returned.
    pub fn from_provider(
        provider: &dyn ResourceProvider,
        regular_path: &str,
        bold_path: &str,
    ) -> Result<Self, LayoutError> {
        let regular = FontFace::load_truetype(provider, regular_path)?;
        let bold = if bold_path == regular_path {
            regular.clone()
        } else {
            FontFace::load_truetype(provider, bold_path)?
        };
        Ok(Self::new(regular, bold))
    }

    pub fn face(&self, role: FontRole) -> &FontFace {
        match role {
            FontRole::Regular => &self.regular,
            FontRole::Bold => &self.bold,
        }
    }

    /// Faces in resource order: regular first, then bold.
    pub fn faces(&self) -> [(FontRole, &FontFace); 2] {
        [(FontRole::Regular, &self.regular), (FontRole::Bold, &self.bold)]
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl TextMeasurer for FontLibrary {
    fn text_width(&self, text: &str, role: FontRole, size: f32) -> f32 {
        let face = self.face(role);
        let units: f32 = text.chars().map(|c| face.glyph_width(c)).sum();
        units * size / 1000.0
    }

    fn supports(&self, ch: char, role: FontRole) -> bool {
        self.face(role).supports(ch)
    }
}
