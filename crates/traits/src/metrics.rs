//! Text metrics consumed by the ToC layout engine.
//!
//! The layout engine never touches font files. It asks a `TextMeasurer` how
//! wide a string is and whether a glyph can be drawn at all.

/// The two faces a table of contents is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontRole {
    #[default]
    Regular,
    Bold,
}

impl FontRole {
    pub fn from_bold(bold: bool) -> Self {
        if bold { FontRole::Bold } else { FontRole::Regular }
    }
}

pub trait TextMeasurer {
    /// Advance width of `text` in points when set in `role` at `size`.
    fn text_width(&self, text: &str, role: FontRole, size: f32) -> f32;

    /// Whether `ch` can be rendered with the face behind `role`.
    fn supports(&self, ch: char, role: FontRole) -> bool;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn text_width(&self, text: &str, role: FontRole, size: f32) -> f32 {
        (**self).text_width(text, role, size)
    }

    fn supports(&self, ch: char, role: FontRole) -> bool {
        (**self).supports(ch, role)
    }
}
