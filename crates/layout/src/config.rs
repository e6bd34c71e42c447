/// Geometry of a generated ToC page, in PDF points.
///
/// The defaults reproduce the classic layout: 50pt side margins, a 23pt bold
/// heading two thirds up the first page and entries indented 20pt per level.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Text drawn above the first entry. An empty heading is skipped but the
    /// entry cursor still starts below where it would have been.
    pub heading: String,
    pub heading_font_size: f32,
    /// Baseline of the heading as a fraction of the page height.
    pub heading_start_ratio: f32,
    /// Distance from the heading baseline to the first entry cursor.
    pub heading_gap: f32,

    /// Left margin, also the right margin used by leaders and page numbers.
    pub margin_x: f32,
    /// Once the cursor drops below this, the next entry starts a new page.
    pub margin_bottom: f32,
    pub indent_per_level: f32,
    /// Extra space above every top-level entry.
    pub top_level_nudge: f32,

    /// Leader glyph size as a fraction of the entry font size.
    pub leader_size_ratio: f32,
    pub leader_step: f32,
    pub leader_gap: f32,
    pub leader_right_padding: f32,

    /// Horizontal space kept free for the page number column.
    pub title_width_reserve: f32,
    pub link_padding: f32,

    /// Added to every entry's target before it is recorded in a pending link.
    pub page_offset: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            heading: "Table of Contents".to_string(),
            heading_font_size: 23.0,
            heading_start_ratio: 2.0 / 3.0,
            heading_gap: 38.0,
            margin_x: 50.0,
            margin_bottom: 60.0,
            indent_per_level: 20.0,
            top_level_nudge: 8.0,
            leader_size_ratio: 0.6,
            leader_step: 5.0,
            leader_gap: 10.0,
            leader_right_padding: 15.0,
            title_width_reserve: 100.0,
            link_padding: 2.0,
            page_offset: 0,
        }
    }
}

impl LayoutConfig {
    pub fn with_heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    pub fn with_page_offset(mut self, offset: i64) -> Self {
        self.page_offset = offset;
        self
    }
}
