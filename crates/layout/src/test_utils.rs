use tocsmith_traits::{FontRole, TextMeasurer};
use tocsmith_types::OutlineItem;

/// Every glyph is half an em wide; only ASCII is drawable.
pub struct FixedWidthMeasurer;

impl TextMeasurer for FixedWidthMeasurer {
    fn text_width(&self, text: &str, _role: FontRole, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5
    }

    fn supports(&self, ch: char, _role: FontRole) -> bool {
        ch.is_ascii() && !ch.is_ascii_control()
    }
}

/// `count` top-level entries named "Entry N" pointing at page N.
pub fn flat_outline(count: usize) -> Vec<OutlineItem> {
    (1..=count)
        .map(|i| OutlineItem::new(format!("Entry {}", i), i as i64))
        .collect()
}
