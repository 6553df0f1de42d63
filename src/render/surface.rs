//! The drawing capability consumed by the PDF layout
//!
//! Coordinates are points with a top-left origin; `y` grows down the page.
//! Backends translate to their own coordinate systems.
//!
//! [`DrawList`] is an in-memory surface that records every call as a
//! [`DrawOp`]. It backs the preview command and the renderer tests.

use crate::error::{ReportError, ReportResult};
use crate::models::Color;

use super::metrics::text_width;

/// Line advance relative to the font size
pub const LINE_HEIGHT: f32 = 1.2;

/// A4 in points
pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

/// The base-14 Helvetica faces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Optional box width and alignment for a text run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextOptions {
    pub width: Option<f32>,
    pub align: TextAlign,
}

impl TextOptions {
    pub fn left(width: f32) -> Self {
        Self {
            width: Some(width),
            align: TextAlign::Left,
        }
    }

    pub fn centered(width: f32) -> Self {
        Self {
            width: Some(width),
            align: TextAlign::Center,
        }
    }

    pub fn right(width: f32) -> Self {
        Self {
            width: Some(width),
            align: TextAlign::Right,
        }
    }

    /// Horizontal start of a run of `measured` width placed at `x`
    pub fn aligned_x(&self, x: f32, measured: f32) -> f32 {
        match (self.align, self.width) {
            (TextAlign::Center, Some(width)) => x + (width - measured) / 2.0,
            (TextAlign::Right, Some(width)) => x + width - measured,
            _ => x,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A page-oriented drawing target
///
/// The fill color applies to both filled rectangles and text, as in PDF.
pub trait DrawingSurface {
    fn set_fill_color(&mut self, color: Color) -> ReportResult<()>;
    fn set_stroke_color(&mut self, color: Color) -> ReportResult<()>;
    fn fill_rect(&mut self, rect: Rect) -> ReportResult<()>;
    fn stroke_rect(&mut self, rect: Rect) -> ReportResult<()>;
    fn set_font(&mut self, font: Font) -> ReportResult<()>;
    fn set_font_size(&mut self, size: f32) -> ReportResult<()>;
    /// Draw a single line with its top edge at `y`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, options: TextOptions)
        -> ReportResult<()>;
    fn new_page(&mut self) -> ReportResult<()>;

    fn page_width(&self) -> f32;
    fn page_height(&self) -> f32;
    /// Bottom of the last text line drawn on the current page
    fn cursor_y(&self) -> f32;
    fn fill_color(&self) -> Color;
}

/// Run `draw` with the fill color set to `color`, restoring the previous
/// fill color afterwards whether or not `draw` succeeded
pub fn with_fill_color<S, T, F>(surface: &mut S, color: Color, draw: F) -> ReportResult<T>
where
    S: DrawingSurface + ?Sized,
    F: FnOnce(&mut S) -> ReportResult<T>,
{
    let previous = surface.fill_color();
    surface.set_fill_color(color)?;
    let result = draw(surface);
    let restored = surface.set_fill_color(previous);
    let value = result?;
    restored?;
    Ok(value)
}

/// A single recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillColor(Color),
    StrokeColor(Color),
    FillRect(Rect),
    StrokeRect(Rect),
    Font(Font),
    FontSize(f32),
    Text {
        text: String,
        x: f32,
        y: f32,
        options: TextOptions,
    },
    NewPage,
}

/// A text run resolved against the drawing state at the time it was drawn
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub page: usize,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: Color,
    pub font: Font,
    pub size: f32,
}

/// A filled rectangle with the page and color it was drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRect {
    pub page: usize,
    pub rect: Rect,
    pub color: Color,
}

/// Recording surface
#[derive(Debug, Clone)]
pub struct DrawList {
    width: f32,
    height: f32,
    ops: Vec<DrawOp>,
    fill: Color,
    font: Font,
    font_size: f32,
    cursor_y: f32,
    fail_after: Option<usize>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            fill: Color::BLACK,
            font: Font::Regular,
            font_size: 12.0,
            cursor_y: 0.0,
            fail_after: None,
        }
    }

    pub fn a4() -> Self {
        Self::new(A4_WIDTH, A4_HEIGHT)
    }

    /// A surface that fails every call once `ops` calls have been recorded
    pub fn failing_after(width: f32, height: f32, ops: usize) -> Self {
        Self {
            fail_after: Some(ops),
            ..Self::new(width, height)
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn page_count(&self) -> usize {
        1 + self
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::NewPage))
            .count()
    }

    /// Replay the recording and return every text run with its state
    pub fn text_runs(&self) -> Vec<TextRun> {
        let mut runs = Vec::new();
        self.replay(|state, op| {
            if let DrawOp::Text { text, x, y, .. } = op {
                runs.push(TextRun {
                    page: state.page,
                    text: text.clone(),
                    x: *x,
                    y: *y,
                    color: state.fill,
                    font: state.font,
                    size: state.size,
                });
            }
        });
        runs
    }

    /// Replay the recording and return every filled rectangle
    pub fn filled_rects(&self) -> Vec<FilledRect> {
        let mut rects = Vec::new();
        self.replay(|state, op| {
            if let DrawOp::FillRect(rect) = op {
                rects.push(FilledRect {
                    page: state.page,
                    rect: *rect,
                    color: state.fill,
                });
            }
        });
        rects
    }

    fn replay<F: FnMut(&ReplayState, &DrawOp)>(&self, mut visit: F) {
        let mut state = ReplayState {
            page: 1,
            fill: Color::BLACK,
            font: Font::Regular,
            size: 12.0,
        };
        for op in &self.ops {
            match op {
                DrawOp::FillColor(color) => state.fill = *color,
                DrawOp::Font(font) => state.font = *font,
                DrawOp::FontSize(size) => state.size = *size,
                DrawOp::NewPage => state.page += 1,
                _ => {}
            }
            visit(&state, op);
        }
    }

    fn record(&mut self, op: DrawOp) -> ReportResult<()> {
        if let Some(limit) = self.fail_after {
            if self.ops.len() >= limit {
                return Err(ReportError::pdf_backend(format!(
                    "surface refused call after {} operations",
                    limit
                )));
            }
        }
        self.ops.push(op);
        Ok(())
    }
}

struct ReplayState {
    page: usize,
    fill: Color,
    font: Font,
    size: f32,
}

impl DrawingSurface for DrawList {
    fn set_fill_color(&mut self, color: Color) -> ReportResult<()> {
        self.record(DrawOp::FillColor(color))?;
        self.fill = color;
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Color) -> ReportResult<()> {
        self.record(DrawOp::StrokeColor(color))
    }

    fn fill_rect(&mut self, rect: Rect) -> ReportResult<()> {
        self.record(DrawOp::FillRect(rect))
    }

    fn stroke_rect(&mut self, rect: Rect) -> ReportResult<()> {
        self.record(DrawOp::StrokeRect(rect))
    }

    fn set_font(&mut self, font: Font) -> ReportResult<()> {
        self.record(DrawOp::Font(font))?;
        self.font = font;
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) -> ReportResult<()> {
        self.record(DrawOp::FontSize(size))?;
        self.font_size = size;
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        options: TextOptions,
    ) -> ReportResult<()> {
        let x = options.aligned_x(x, text_width(text, self.font, self.font_size));
        self.record(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            options,
        })?;
        self.cursor_y = y + self.font_size * LINE_HEIGHT;
        Ok(())
    }

    fn new_page(&mut self) -> ReportResult<()> {
        self.record(DrawOp::NewPage)?;
        self.cursor_y = 0.0;
        Ok(())
    }

    fn page_width(&self) -> f32 {
        self.width
    }

    fn page_height(&self) -> f32 {
        self.height
    }

    fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    fn fill_color(&self) -> Color {
        self.fill
    }
}
