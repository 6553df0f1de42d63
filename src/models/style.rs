//! Colors and status styling rules
//!
//! A [`StyleRule`] maps a row's status label (for example a payment status)
//! to the color its status cell is drawn in. Rules always carry a default, so
//! every label, including ones nobody anticipated, resolves to a color.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xFFFFFF);

    /// Create a color from a `0xRRGGBB` literal
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as u8,
            g: ((rgb >> 8) & 0xFF) as u8,
            b: (rgb & 0xFF) as u8,
        }
    }

    /// The color as a `0xRRGGBB` value
    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channels scaled to `0.0..=1.0`, as PDF color operators expect
    pub fn to_unit_rgb(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Fixed report palette
pub mod palette {
    use super::Color;

    /// Body text
    pub const TEXT: Color = Color::hex(0x111827);
    /// PDF header row background
    pub const HEADER_FILL: Color = Color::hex(0xE5E7EB);
    /// PDF row background for even input indices
    pub const ROW_EVEN: Color = Color::WHITE;
    /// PDF row background for odd input indices
    pub const ROW_ODD: Color = Color::hex(0xF9FAFB);
    /// Cell and header outlines
    pub const BORDER: Color = Color::hex(0xD1D5DB);
    /// Timestamp and footer text
    pub const MUTED: Color = Color::hex(0x6B7280);

    /// Excel header row fill
    pub const SHEET_HEADER_FILL: Color = Color::hex(0xD9E1F2);
    /// Excel fill for data rows at even sheet positions
    pub const SHEET_STRIPE_FILL: Color = Color::hex(0xF2F2F2);

    pub const STATUS_GREEN: Color = Color::hex(0x16A34A);
    pub const STATUS_AMBER: Color = Color::hex(0xD97706);
    pub const STATUS_RED: Color = Color::hex(0xDC2626);
    pub const STATUS_DEFAULT: Color = Color::hex(0x6B7280);
}

/// A total mapping from status label to display color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    rules: Vec<(String, Color)>,
    default: Color,
}

impl StyleRule {
    /// Create a rule that maps every label to `default`
    pub fn new(default: Color) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    /// Add a label mapping (matched case-insensitively, surrounding
    /// whitespace ignored)
    pub fn with(mut self, label: impl Into<String>, color: Color) -> Self {
        let label = label.into().trim().to_ascii_uppercase();
        self.rules.retain(|(existing, _)| *existing != label);
        self.rules.push((label, color));
        self
    }

    /// The payment status rule used by payment reports and statements
    pub fn payment_status() -> Self {
        Self::new(palette::STATUS_DEFAULT)
            .with("PAID", palette::STATUS_GREEN)
            .with("PENDING", palette::STATUS_AMBER)
            .with("DUE", palette::STATUS_RED)
    }

    /// Resolve the color for a status label
    pub fn color_for(&self, status: &str) -> Color {
        let status = status.trim();
        self.rules
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(status))
            .map(|(_, color)| *color)
            .unwrap_or(self.default)
    }

    /// The fallback color for unrecognized labels
    pub fn default_color(&self) -> Color {
        self.default
    }
}
