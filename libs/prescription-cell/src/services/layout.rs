// libs/prescription-cell/src/services/layout.rs
use crate::models::{DocumentDefinition, ResolvedStyle};

pub const PT_TO_MM: f32 = 25.4 / 72.0;
/// Courier is monospaced: every glyph advances 0.6 em.
pub const COURIER_ADVANCE_EM: f32 = 0.6;
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
}

impl Default for PageGeometry {
    /// A4 with 20 mm margins.
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 20.0,
        }
    }
}

/// A piece of text at its final position. `y_mm` is the baseline measured
/// from the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub page: usize,
    pub x_mm: f32,
    pub y_mm: f32,
    pub text: String,
    pub style: ResolvedStyle,
}

pub fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * COURIER_ADVANCE_EM * font_size * PT_TO_MM
}

struct Fragment {
    x_mm: f32,
    text: String,
    style: ResolvedStyle,
}

struct Cursor<'g> {
    geometry: &'g PageGeometry,
    page: usize,
    top_mm: f32,
    x_mm: f32,
    line: Vec<Fragment>,
    placed: Vec<PlacedText>,
}

impl<'g> Cursor<'g> {
    fn new(geometry: &'g PageGeometry) -> Self {
        Self {
            geometry,
            page: 0,
            top_mm: geometry.height_mm - geometry.margin_mm,
            x_mm: geometry.margin_mm,
            line: Vec::new(),
            placed: Vec::new(),
        }
    }

    fn right_edge(&self) -> f32 {
        self.geometry.width_mm - self.geometry.margin_mm
    }

    fn push(&mut self, piece: &str, style: ResolvedStyle) {
        let visible = text_width_mm(piece.trim_end(), style.font_size);
        if !self.line.is_empty() && self.x_mm + visible > self.right_edge() {
            self.break_line(style.font_size);
        }

        let width = text_width_mm(piece, style.font_size);
        match self.line.last_mut() {
            Some(last) if last.style == style => last.text.push_str(piece),
            _ => self.line.push(Fragment {
                x_mm: self.x_mm,
                text: piece.to_string(),
                style,
            }),
        }
        self.x_mm += width;
    }

    /// Ends the current line. An empty line still advances by the height of
    /// `fallback_size`.
    fn break_line(&mut self, fallback_size: f32) {
        let tallest = self
            .line
            .iter()
            .map(|f| f.style.font_size)
            .fold(0.0_f32, f32::max);
        let font_size = if tallest > 0.0 { tallest } else { fallback_size };
        let line_height = LINE_HEIGHT_FACTOR * font_size * PT_TO_MM;

        if self.top_mm - line_height < self.geometry.margin_mm {
            self.page += 1;
            self.top_mm = self.geometry.height_mm - self.geometry.margin_mm;
        }

        let baseline = self.top_mm - font_size * PT_TO_MM;
        for fragment in self.line.drain(..) {
            let text = fragment.text.trim_end().to_string();
            if text.is_empty() {
                continue;
            }
            self.placed.push(PlacedText {
                page: self.page,
                x_mm: fragment.x_mm,
                y_mm: baseline,
                text,
                style: fragment.style,
            });
        }

        self.top_mm -= line_height;
        self.x_mm = self.geometry.margin_mm;
    }
}

/// Flows every paragraph top to bottom. Runs wrap at word boundaries,
/// `\n` forces a break and a full page continues on the next one.
/// A single word wider than the text area is not split and runs past the
/// right margin.
pub fn layout(definition: &DocumentDefinition, geometry: &PageGeometry) -> Vec<PlacedText> {
    let mut cursor = Cursor::new(geometry);

    for paragraph in &definition.content {
        let mut last_size = definition.resolve(paragraph, &Default::default()).font_size;

        for run in &paragraph.runs {
            let style = definition.resolve(paragraph, run);
            last_size = style.font_size;

            for (index, segment) in run.text.split('\n').enumerate() {
                if index > 0 {
                    cursor.break_line(style.font_size);
                }
                for piece in segment.split_inclusive(' ') {
                    cursor.push(piece, style);
                }
            }
        }

        if !cursor.line.is_empty() {
            cursor.break_line(last_size);
        }
    }

    cursor.placed
}
