//! User settings for unireport
//!
//! Manages rendering preferences: currency and date presentation, the PDF
//! page geometry, the footer line and the default output format.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::paths::ReportPaths;
use crate::error::ReportError;
use crate::render::{
    LayoutOptions, OutputFormat, PageSize, RenderOptions, DEFAULT_EXCEL_COLUMN_WIDTH,
    DEFAULT_FOOTER,
};

/// PDF page geometry, in points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub row_height: f32,
    pub header_height: f32,
    pub font_size: f32,
    /// Share the printable width equally, ignoring explicit column widths
    pub uniform_widths: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        let page = PageSize::default();
        let layout = LayoutOptions::default();
        Self {
            width: page.width,
            height: page.height,
            margin: layout.margin,
            row_height: layout.row_height,
            header_height: layout.header_height,
            font_size: layout.font_size,
            uniform_widths: layout.uniform_widths,
        }
    }
}

/// User settings for unireport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol for monetary cells
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for date cells (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Format of the PDF generation timestamp (strftime format)
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Footer on the last PDF page; empty disables it
    #[serde(default = "default_footer")]
    pub footer_text: String,

    #[serde(default)]
    pub page: PageSettings,

    /// Excel column width in character units, for columns without one
    #[serde(default = "default_excel_column_width")]
    pub excel_column_width: f64,

    /// Format used when `render` is called without `--format`
    #[serde(default)]
    pub default_format: OutputFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%m/%d/%Y".to_string()
}

fn default_timestamp_format() -> String {
    "%m/%d/%Y %H:%M".to_string()
}

fn default_footer() -> String {
    DEFAULT_FOOTER.to_string()
}

fn default_excel_column_width() -> f64 {
    DEFAULT_EXCEL_COLUMN_WIDTH
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            timestamp_format: default_timestamp_format(),
            footer_text: default_footer(),
            page: PageSettings::default(),
            excel_column_width: default_excel_column_width(),
            default_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, ReportError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ReportError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ReportError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), ReportError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ReportError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            ReportError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Build the options for one render
    pub fn render_options(&self, sheet_name: &str, generated_at: NaiveDateTime) -> RenderOptions {
        RenderOptions {
            currency_symbol: self.currency_symbol.clone(),
            date_format: self.date_format.clone(),
            timestamp_format: self.timestamp_format.clone(),
            generated_at,
            footer_text: self.footer_text.clone(),
            sheet_name: sheet_name.to_string(),
            excel_column_width: self.excel_column_width,
            page: PageSize {
                width: self.page.width,
                height: self.page.height,
            },
            layout: LayoutOptions {
                margin: self.page.margin,
                row_height: self.page.row_height,
                header_height: self.page.header_height,
                font_size: self.page.font_size,
                uniform_widths: self.page.uniform_widths,
                continuation_top: self.page.margin,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.default_format, OutputFormat::Pdf);
        assert_eq!(settings.footer_text, DEFAULT_FOOTER);
        assert_eq!(settings.page.margin, 50.0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".into();
        settings.default_format = OutputFormat::Excel;
        settings.page.uniform_widths = true;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.default_format, OutputFormat::Excel);
        assert!(loaded.page.uniform_widths);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"currency_symbol": "£", "page": {"margin": 36}}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "£");
        assert_eq!(loaded.page.margin, 36.0);
        assert_eq!(loaded.page.row_height, LayoutOptions::default().row_height);
        assert_eq!(loaded.date_format, "%m/%d/%Y");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_render_options() {
        let mut settings = Settings::default();
        settings.page.margin = 40.0;
        let at = NaiveDate::from_ymd_opt(2024, 9, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();

        let options = settings.render_options("Students", at);
        assert_eq!(options.sheet_name, "Students");
        assert_eq!(options.generated_at, at);
        assert_eq!(options.layout.margin, 40.0);
        assert_eq!(options.layout.continuation_top, 40.0);
    }
}
