//! Output types from the layout engine.
//!
//! A `TocLayout` is a document-model-agnostic description of the ToC: pages of
//! positioned text runs plus the pending links that still need a final target.

use tocsmith_traits::FontRole;
use tocsmith_types::{Color, PendingLink, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Heading,
    Title,
    Leader,
    PageNumber,
}

/// One `Tj` worth of text at a baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub kind: RunKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub role: FontRole,
    pub color: Color,
    /// Runs wider than this are clipped by the renderer.
    pub max_width: Option<f32>,
    /// Pre-order index of the outline entry this run belongs to.
    pub item: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocPage {
    pub size: Size,
    pub runs: Vec<TextRun>,
}

impl TocPage {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            runs: Vec::new(),
        }
    }

    pub fn runs_for_item(&self, item: usize) -> impl Iterator<Item = &TextRun> {
        self.runs.iter().filter(move |r| r.item == Some(item))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocLayout {
    pub pages: Vec<TocPage>,
    /// One link per outline entry, in pre-order.
    pub links: Vec<PendingLink>,
}

impl TocLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
