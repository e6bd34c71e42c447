//! Pagination of an outline tree onto ToC pages.
//!
//! The walk is depth-first pre-order. A `Cursor` (page index, baseline) is
//! passed into every step and the updated cursor is returned, so a child always
//! continues exactly where its parent left off, across page breaks included.
//! Pages and pending links are collected in a `PageSink` owned by one
//! `layout` call.

use crate::config::LayoutConfig;
use crate::output::{RunKind, TextRun, TocLayout, TocPage};
use crate::text::sanitize_text;
use tocsmith_style::StyleTable;
use tocsmith_traits::{FontRole, TextMeasurer};
use tocsmith_types::{Color, OutlineItem, PendingLink, Rect, Size};

/// Where the next entry goes: page index into the ToC and the baseline on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

struct PageSink {
    size: Size,
    pages: Vec<TocPage>,
    links: Vec<PendingLink>,
    next_item: usize,
}

impl PageSink {
    fn new(size: Size) -> Self {
        Self {
            size,
            pages: vec![TocPage::new(size)],
            links: Vec::new(),
            next_item: 0,
        }
    }

    fn push_run(&mut self, page: usize, run: TextRun) {
        if let Some(p) = self.pages.get_mut(page) {
            p.runs.push(run);
        }
    }

    fn new_page(&mut self) -> usize {
        self.pages.push(TocPage::new(self.size));
        self.pages.len() - 1
    }
}

pub struct TocLayoutEngine<'a, M: TextMeasurer + ?Sized> {
    measurer: &'a M,
    styles: &'a StyleTable,
    config: &'a LayoutConfig,
}

impl<'a, M: TextMeasurer + ?Sized> TocLayoutEngine<'a, M> {
    pub fn new(measurer: &'a M, styles: &'a StyleTable, config: &'a LayoutConfig) -> Self {
        Self {
            measurer,
            styles,
            config,
        }
    }

    /// Lays out `items` (already numbered, if numbering is wanted) on pages of
    /// `page_size`. Always yields at least the heading page.
    pub fn layout(&self, items: &[OutlineItem], page_size: Size) -> TocLayout {
        let mut sink = PageSink::new(page_size);
        let heading_y = page_size.height * self.config.heading_start_ratio;

        if !self.config.heading.is_empty() {
            let text = sanitize_text(self.measurer, &self.config.heading, FontRole::Bold);
            sink.push_run(
                0,
                TextRun {
                    kind: RunKind::Heading,
                    text,
                    x: self.config.margin_x,
                    y: heading_y,
                    font_size: self.config.heading_font_size,
                    role: FontRole::Bold,
                    color: Color::BLACK,
                    max_width: Some((page_size.width - 2.0 * self.config.margin_x).max(0.0)),
                    item: None,
                },
            );
        }

        let start = Cursor {
            page: 0,
            y: heading_y - self.config.heading_gap,
        };
        let end = self.layout_level(items, 0, start, &mut sink);

        log::debug!(
            "Laid out {} ToC entries on {} page(s), cursor ended at y={:.1} on page {}",
            sink.links.len(),
            sink.pages.len(),
            end.y,
            end.page + 1
        );

        TocLayout {
            pages: sink.pages,
            links: sink.links,
        }
    }

    fn layout_level(
        &self,
        items: &[OutlineItem],
        depth: usize,
        cursor: Cursor,
        sink: &mut PageSink,
    ) -> Cursor {
        items.iter().fold(cursor, |cursor, item| {
            let after_self = self.place_item(item, depth, cursor, sink);
            self.layout_level(&item.children, depth + 1, after_self, sink)
        })
    }

    fn break_if_needed(&self, cursor: Cursor, sink: &mut PageSink) -> Cursor {
        if cursor.y >= self.config.margin_bottom {
            return cursor;
        }
        let page = sink.new_page();
        log::debug!("ToC overflow, starting continuation page {}", page + 1);
        Cursor {
            page,
            y: sink.size.height - self.config.margin_bottom,
        }
    }

    /// Draws one entry line and records its pending link.
    fn place_item(
        &self,
        item: &OutlineItem,
        depth: usize,
        cursor: Cursor,
        sink: &mut PageSink,
    ) -> Cursor {
        let cfg = self.config;
        let cursor = self.break_if_needed(cursor, sink);
        let style = self.styles.style_for(depth);
        let role = FontRole::from_bold(style.bold);
        let size = style.font_size;
        let page_width = sink.size.width;

        let y = if depth == 0 {
            cursor.y - cfg.top_level_nudge
        } else {
            cursor.y
        };
        let indentation = depth as f32 * cfg.indent_per_level;
        let x = cfg.margin_x + indentation;
        let right = page_width - cfg.margin_x;
        let max_width = (page_width - cfg.title_width_reserve - indentation).max(0.0);

        let index = sink.next_item;
        sink.next_item += 1;

        let title = sanitize_text(self.measurer, &item.display_title(), role);
        let title_width = self.measurer.text_width(&title, role, size).min(max_width);
        sink.push_run(
            cursor.page,
            TextRun {
                kind: RunKind::Title,
                text: title,
                x,
                y,
                font_size: size,
                role,
                color: style.color,
                max_width: Some(max_width),
                item: Some(index),
            },
        );

        if style.has_leader() && cfg.leader_step > 0.0 {
            let glyph = sanitize_text(self.measurer, &style.dot_leader, FontRole::Regular);
            let leader_end = right - cfg.leader_right_padding;
            let mut lx = x + title_width + cfg.leader_gap;
            while lx < leader_end {
                sink.push_run(
                    cursor.page,
                    TextRun {
                        kind: RunKind::Leader,
                        text: glyph.clone(),
                        x: lx,
                        y,
                        font_size: size * cfg.leader_size_ratio,
                        role: FontRole::Regular,
                        color: style.color,
                        max_width: None,
                        item: Some(index),
                    },
                );
                lx += cfg.leader_step;
            }
        }

        let number = sanitize_text(self.measurer, &item.target_page.to_string(), role);
        let number_width = self.measurer.text_width(&number, role, size);
        sink.push_run(
            cursor.page,
            TextRun {
                kind: RunKind::PageNumber,
                text: number,
                x: right - number_width,
                y,
                font_size: size,
                role,
                color: style.color,
                max_width: None,
                item: Some(index),
            },
        );

        sink.links.push(PendingLink {
            toc_page: cursor.page,
            rect: Rect::new(x, y - cfg.link_padding, right, y + size),
            target_page: item.target_page.saturating_add(cfg.page_offset),
        });

        Cursor {
            page: cursor.page,
            y: y - style.line_height(),
        }
    }
}
