//! Text measurement for the standard PDF fonts
//!
//! Widths are the AFM advance widths of the base-14 Helvetica faces in
//! thousandths of an em, indexed from U+0020 to U+007E. Characters outside
//! the table measure as a digit.

use super::surface::Font;

const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :;<=>?@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [\]^_`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {|}~
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

/// Ellipsis appended to truncated cell text
pub const ELLIPSIS: &str = "...";

fn glyph_width(ch: char, font: Font) -> u16 {
    let table = match font {
        Font::Regular => &HELVETICA,
        Font::Bold => &HELVETICA_BOLD,
    };
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        table[(code - 0x20) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Width of `text` in points at `size`
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| u32::from(glyph_width(ch, font))).sum();
    units as f32 * size / 1000.0
}

/// Shorten `text` with an ellipsis until it fits `max_width`
///
/// Returns the text unchanged when it already fits, and an empty string when
/// not even the ellipsis fits.
pub fn truncate_to_width(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if text_width(text, font, size) <= max_width {
        return text.to_string();
    }

    let ellipsis_width = text_width(ELLIPSIS, font, size);
    if ellipsis_width > max_width {
        return String::new();
    }

    let mut used = ellipsis_width;
    let mut kept = String::new();
    for ch in text.chars() {
        let advance = f32::from(glyph_width(ch, font)) * size / 1000.0;
        if used + advance > max_width {
            break;
        }
        used += advance;
        kept.push(ch);
    }

    let mut truncated = kept.trim_end().to_string();
    truncated.push_str(ELLIPSIS);
    truncated
}
