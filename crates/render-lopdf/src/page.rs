// Page drawing context: turns text runs into content-stream operations,
// tracking font and fill color so redundant Tf/rg operators are skipped.

use crate::fonts::resource_name;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use tocsmith_layout::encoding::encode_win_ansi;
use tocsmith_layout::{FontFace, FontLibrary, FontRole, TextMeasurer, TextRun};
use tocsmith_types::Color;

/// Clip box extent below the baseline, as a fraction of the font size.
const CLIP_DESCENT: f32 = 0.3;

#[derive(Default, Clone, PartialEq)]
struct PageRenderState {
    font: Option<(FontRole, f32)>,
    fill_color: Option<Color>,
}

pub(crate) struct PageContext<'a> {
    fonts: &'a FontLibrary,
    content: Content,
    state: PageRenderState,
}

impl<'a> PageContext<'a> {
    pub(crate) fn new(fonts: &'a FontLibrary) -> Self {
        Self {
            fonts,
            content: Content { operations: vec![] },
            state: Default::default(),
        }
    }

    pub(crate) fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_font(&mut self, role: FontRole, size: f32) {
        if self.state.font != Some((role, size)) {
            self.push(
                "Tf",
                vec![Object::Name(resource_name(role).as_bytes().to_vec()), size.into()],
            );
            self.state.font = Some((role, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.unit_rgb();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    /// Standard faces take WinAnsi bytes; embedded faces take big-endian
    /// glyph ids, with unmapped characters drawn as glyph 0.
    fn encode(&self, text: &str, role: FontRole) -> Object {
        match self.fonts.face(role) {
            FontFace::Standard(_) => Object::String(encode_win_ansi(text), StringFormat::Literal),
            FontFace::TrueType(tt) => Object::String(
                text.chars()
                    .flat_map(|c| tt.glyph_id(c).unwrap_or(0).to_be_bytes())
                    .collect(),
                StringFormat::Hexadecimal,
            ),
        }
    }

    pub(crate) fn draw_run(&mut self, run: &TextRun) {
        if run.text.trim().is_empty() {
            return;
        }

        let clip = run.max_width.filter(|max| {
            self.fonts.text_width(&run.text, run.role, run.font_size) > *max
        });

        if let Some(width) = clip {
            self.push("q", vec![]);
            self.push(
                "re",
                vec![
                    run.x.into(),
                    (run.y - run.font_size * CLIP_DESCENT).into(),
                    width.into(),
                    (run.font_size * (1.0 + CLIP_DESCENT)).into(),
                ],
            );
            self.push("W", vec![]);
            self.push("n", vec![]);
        }

        self.push("BT", vec![]);
        self.set_font(run.role, run.font_size);
        self.set_fill_color(run.color);
        self.push("Td", vec![run.x.into(), run.y.into()]);
        let shown = self.encode(&run.text, run.role);
        self.push("Tj", vec![shown]);
        self.push("ET", vec![]);

        if clip.is_some() {
            self.push("Q", vec![]);
            // Font and color set inside q/Q are gone after Q.
            self.state = PageRenderState::default();
        }
    }
}
