//! Per-depth style configuration.
//!
//! A [`StyleTable`] maps an outline depth to a [`LevelStyle`]. Depths past the
//! end of the table reuse the last entry, so two entries (first level, other
//! levels) are enough to style an outline of any depth.

use crate::numeral::NumeralStyle;
use serde::{Deserialize, Serialize};
use tocsmith_types::Color;

/// Numbering and rendering settings for one outline depth.
///
/// Missing fields deserialize to the values of [`LevelStyle::default`], which
/// is the "other levels" body style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelStyle {
    #[serde(alias = "style")]
    pub numeral: NumeralStyle,
    pub prefix: String,
    pub suffix: String,
    pub separator: String,
    /// Prefix the label with the parent ordinals (`"2.3"`) instead of restarting (`"3"`).
    pub inherit_parent: bool,
    pub font_size: f32,
    /// Leader glyph repeated between title and page number. Empty disables the leader.
    pub dot_leader: String,
    pub color: Color,
    /// Line height as a multiple of `font_size`.
    pub line_spacing: f32,
    pub bold: bool,
}

impl LevelStyle {
    pub fn first_level() -> Self {
        Self {
            numeral: NumeralStyle::Decimal,
            prefix: String::new(),
            suffix: String::new(),
            separator: ".".to_string(),
            inherit_parent: false,
            font_size: 16.0,
            dot_leader: ".".to_string(),
            color: Color::BLACK,
            line_spacing: 1.8,
            bold: true,
        }
    }

    pub fn other_levels() -> Self {
        Self {
            numeral: NumeralStyle::Decimal,
            prefix: String::new(),
            suffix: String::new(),
            separator: ".".to_string(),
            inherit_parent: true,
            font_size: 13.0,
            dot_leader: ".".to_string(),
            color: Color::gray(0x33),
            line_spacing: 1.6,
            bold: false,
        }
    }

    /// Vertical distance consumed by one entry in this style.
    pub fn line_height(&self) -> f32 {
        self.font_size * self.line_spacing
    }

    pub fn has_leader(&self) -> bool {
        !self.dot_leader.is_empty()
    }
}

impl Default for LevelStyle {
    fn default() -> Self {
        Self::other_levels()
    }
}

/// Depth-indexed styles, saturating at the last entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<LevelStyle>", into = "Vec<LevelStyle>")]
pub struct StyleTable {
    levels: Vec<LevelStyle>,
}

impl StyleTable {
    /// Builds a table from explicit levels. An empty list yields the default table.
    pub fn new(levels: Vec<LevelStyle>) -> Self {
        if levels.is_empty() {
            return Self::default();
        }
        Self { levels }
    }

    pub fn style_for(&self, depth: usize) -> &LevelStyle {
        let idx = depth.min(self.levels.len() - 1);
        &self.levels[idx]
    }

    pub fn levels(&self) -> &[LevelStyle] {
        &self.levels
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            levels: vec![LevelStyle::first_level(), LevelStyle::other_levels()],
        }
    }
}

impl From<Vec<LevelStyle>> for StyleTable {
    fn from(levels: Vec<LevelStyle>) -> Self {
        Self::new(levels)
    }
}

impl From<StyleTable> for Vec<LevelStyle> {
    fn from(table: StyleTable) -> Self {
        table.levels
    }
}
