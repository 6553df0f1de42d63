//! PDF backend built on pdf-writer
//!
//! Text uses the base-14 Helvetica faces with WinAnsi encoding,
//! so no font files are embedded. Each page's content stream is buffered and
//! the document is assembled in [`PdfSurface::finish`].

use pdf_writer::{Content, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};

use crate::error::{ReportError, ReportResult};
use crate::models::Color;
use crate::render::metrics::text_width;
use crate::render::surface::{DrawingSurface, Font, Rect, TextOptions, LINE_HEIGHT};

/// Upper bound on pages per document
pub const MAX_PAGES: usize = 10_000;

/// Baseline position below the top of a line, relative to the font size
const ASCENT: f32 = 0.8;
const LINE_WIDTH: f32 = 0.5;

/// Resource names and base fonts, in object order
const FONTS: [(&[u8], &[u8]); 2] = [(b"F1", b"Helvetica"), (b"F2", b"Helvetica-Bold")];

fn font_resource(font: Font) -> Name<'static> {
    let index = match font {
        Font::Regular => 0,
        Font::Bold => 1,
    };
    Name(FONTS[index].0)
}

/// A [`DrawingSurface`] producing PDF bytes
pub struct PdfSurface {
    width: f32,
    height: f32,
    pages: Vec<Vec<u8>>,
    content: Content,
    fill: Color,
    stroke: Color,
    font: Font,
    font_size: f32,
    cursor_y: f32,
    title: Option<String>,
}

impl std::fmt::Debug for PdfSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pages", &self.pages.len())
            .field("fill", &self.fill)
            .field("stroke", &self.stroke)
            .field("font", &self.font)
            .field("font_size", &self.font_size)
            .field("cursor_y", &self.cursor_y)
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

impl PdfSurface {
    /// Create a surface with one empty page of the given size in points
    pub fn new(width: f32, height: f32) -> ReportResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ReportError::pdf_backend(format!(
                "invalid page size {}x{}",
                width, height
            )));
        }

        let mut surface = Self {
            width,
            height,
            pages: Vec::new(),
            content: Content::new(),
            fill: Color::BLACK,
            stroke: Color::BLACK,
            font: Font::Regular,
            font_size: 12.0,
            cursor_y: 0.0,
            title: None,
        };
        surface.reset_graphics_state();
        Ok(surface)
    }

    /// Set the document title stored in the info dictionary
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    /// Assemble the document
    pub fn finish(self) -> ReportResult<Vec<u8>> {
        let PdfSurface {
            width,
            height,
            mut pages,
            content,
            title,
            ..
        } = self;
        pages.push(content.finish().to_vec());

        let catalog_id = Ref::new(1);
        let tree_id = Ref::new(2);
        let info_id = Ref::new(3);
        let font_ids: Vec<Ref> = (0..FONTS.len() as i32).map(|i| Ref::new(4 + i)).collect();
        let first_page = 4 + FONTS.len() as i32;
        let page_ids: Vec<(Ref, Ref)> = (0..pages.len() as i32)
            .map(|i| (Ref::new(first_page + 2 * i), Ref::new(first_page + 2 * i + 1)))
            .collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().map(|(page, _)| *page))
            .count(page_ids.len() as i32);

        for ((_, base), id) in FONTS.iter().zip(&font_ids) {
            pdf.type1_font(*id)
                .base_font(Name(*base))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        for ((page_id, content_id), stream) in page_ids.iter().zip(&pages) {
            let mut page = pdf.page(*page_id);
            page.media_box(PdfRect::new(0.0, 0.0, width, height));
            page.parent(tree_id);
            page.contents(*content_id);
            {
                let mut resources = page.resources();
                let mut fonts = resources.fonts();
                for ((name, _), id) in FONTS.iter().zip(&font_ids) {
                    fonts.pair(Name(*name), *id);
                }
            }
            drop(page);
            pdf.stream(*content_id, stream);
        }

        let mut info = pdf.document_info(info_id);
        if let Some(title) = &title {
            info.title(TextStr(title));
        }
        info.producer(TextStr("unireport"));
        drop(info);

        Ok(pdf.finish())
    }

    /// Flip a top-left `y` into PDF user space
    fn flip(&self, y: f32) -> f32 {
        self.height - y
    }

    fn reset_graphics_state(&mut self) {
        let (r, g, b) = self.fill.to_unit_rgb();
        self.content.set_fill_rgb(r, g, b);
        let (r, g, b) = self.stroke.to_unit_rgb();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(LINE_WIDTH);
    }

    fn check_rect(rect: &Rect) -> ReportResult<()> {
        let values = [rect.x, rect.y, rect.width, rect.height];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ReportError::pdf_backend(format!(
                "non-finite rectangle {:?}",
                rect
            )));
        }
        Ok(())
    }
}

impl DrawingSurface for PdfSurface {
    fn set_fill_color(&mut self, color: Color) -> ReportResult<()> {
        let (r, g, b) = color.to_unit_rgb();
        self.content.set_fill_rgb(r, g, b);
        self.fill = color;
        Ok(())
    }

    fn set_stroke_color(&mut self, color: Color) -> ReportResult<()> {
        let (r, g, b) = color.to_unit_rgb();
        self.content.set_stroke_rgb(r, g, b);
        self.stroke = color;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect) -> ReportResult<()> {
        Self::check_rect(&rect)?;
        let y = self.flip(rect.bottom());
        self.content.rect(rect.x, y, rect.width, rect.height);
        self.content.fill_nonzero();
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect) -> ReportResult<()> {
        Self::check_rect(&rect)?;
        let y = self.flip(rect.bottom());
        self.content.rect(rect.x, y, rect.width, rect.height);
        self.content.stroke();
        Ok(())
    }

    fn set_font(&mut self, font: Font) -> ReportResult<()> {
        self.font = font;
        Ok(())
    }

    fn set_font_size(&mut self, size: f32) -> ReportResult<()> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ReportError::pdf_backend(format!("invalid font size {}", size)));
        }
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
        if !x.is_finite() || !y.is_finite() {
            return Err(ReportError::pdf_backend("non-finite text position"));
        }

        let x = options.aligned_x(x, text_width(text, self.font, self.font_size));
        let baseline = self.flip(y + self.font_size * ASCENT);
        let encoded = encode_win_ansi(text);

        self.content
            .begin_text()
            .set_font(font_resource(self.font), self.font_size)
            .next_line(x, baseline)
            .show(Str(&encoded))
            .end_text();

        self.cursor_y = y + self.font_size * LINE_HEIGHT;
        Ok(())
    }

    fn new_page(&mut self) -> ReportResult<()> {
        if self.page_count() >= MAX_PAGES {
            return Err(ReportError::pdf_backend(format!(
                "cannot allocate more than {} pages",
                MAX_PAGES
            )));
        }

        let finished = std::mem::replace(&mut self.content, Content::new());
        self.pages.push(finished.finish().to_vec());
        self.reset_graphics_state();
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

/// Encode text as WinAnsi (Windows-1252) bytes, replacing unmappable
/// characters with `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            '\t' | '\n' | '\r' => b' ',
            '€' => 0x80,
            '…' => 0x85,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '\u{A0}'..='\u{FF}' => ch as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Fee: $10"), b"Fee: $10".to_vec());
        assert_eq!(encode_win_ansi("€5"), vec![0x80, b'5']);
        assert_eq!(encode_win_ansi("José"), vec![b'J', b'o', b's', 0xE9]);
        assert_eq!(encode_win_ansi("学"), b"?".to_vec());
    }

    #[test]
    fn test_finish_produces_pdf() {
        let mut surface = PdfSurface::new(595.28, 841.89).unwrap();
        surface.set_title("Students Report");
        surface.set_fill_color(Color::hex(0x336699)).unwrap();
        surface.fill_rect(Rect::new(50.0, 50.0, 100.0, 20.0)).unwrap();
        surface
            .draw_text("Hello", 50.0, 50.0, TextOptions::default())
            .unwrap();
        surface.new_page().unwrap();
        assert_eq!(surface.page_count(), 2);

        let bytes = surface.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/Count 2"));
    }

    #[test]
    fn test_invalid_page_size() {
        assert!(PdfSurface::new(0.0, 100.0).unwrap_err().is_capability());
    }

    #[test]
    fn test_cursor_tracks_text() {
        let mut surface = PdfSurface::new(600.0, 800.0).unwrap();
        surface.set_font_size(10.0).unwrap();
        surface
            .draw_text("Line", 0.0, 100.0, TextOptions::default())
            .unwrap();
        assert!((surface.cursor_y() - 112.0).abs() < 1e-4);
    }
}
