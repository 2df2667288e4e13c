use std::fs;
use std::io;
use std::path::Path;

use flow_core::{cm, inch, mm, Color, LayoutConfig, Margins, PageGeometry};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("theme file could not be read: {0}")]
    Io(#[from] io::Error),

    #[error("theme is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Branding and typography for the invoice. Every field is optional in
/// JSON; missing ones keep the built-in Paramount Clothing look.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub light: Color,
    pub grid: Color,
    pub inner_grid: Color,

    pub title_size: f64,
    pub header_size: f64,
    pub body_size: f64,
    pub table_size: f64,
    pub small_size: f64,

    /// Height of the spacers between invoice sections.
    pub section_gap: f64,
    /// Extra gap the engine adds between consecutive blocks.
    pub block_spacing: f64,
    /// Left and right page margin. The line items table needs a frame
    /// at least 19.5cm wide.
    pub side_margin: f64,

    pub company_name: String,
    pub tagline: String,
    pub website: String,
    pub contact_line: String,
    /// Drawn on the placeholder when the logo file is missing.
    pub logo_initials: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary: Color::rgb(44.0 / 255.0, 62.0 / 255.0, 80.0 / 255.0),
            secondary: Color::rgb(127.0 / 255.0, 140.0 / 255.0, 141.0 / 255.0),
            light: Color::rgb(236.0 / 255.0, 240.0 / 255.0, 241.0 / 255.0),
            grid: Color::GREY,
            inner_grid: Color::LIGHT_GREY,
            title_size: 16.0,
            header_size: 10.0,
            body_size: 8.0,
            table_size: 7.5,
            small_size: 7.5,
            section_gap: 8.0,
            block_spacing: 0.0,
            side_margin: cm(0.7),
            company_name: "Paramount Clothing".to_string(),
            tagline: "GST Registered Company".to_string(),
            website: "www.paramountclothing.com".to_string(),
            contact_line: "Email: info@paramountclothing.com \u{2022} Phone: +65 9876 5432"
                .to_string(),
            logo_initials: "PC".to_string(),
        }
    }
}

impl Theme {
    pub fn from_json(json: &str) -> Result<Self, ThemeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        Theme::from_json(&fs::read_to_string(path)?)
    }

    /// A4 with 1 inch top/bottom margins and 10mm bands above and below
    /// the frame for the footer.
    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::a4()
            .with_margins(Margins {
                left: self.side_margin,
                right: self.side_margin,
                top: inch(1.0),
                bottom: inch(1.0),
            })
            .with_reserves(mm(10.0), mm(10.0))
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::default().with_block_spacing(self.block_spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let theme = Theme::from_json(r##"{"primary": "#FF0000", "company_name": "Acme"}"##).unwrap();
        assert_eq!(theme.primary, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(theme.company_name, "Acme");
        assert_eq!(theme.title_size, 16.0);
        assert_eq!(theme.light, Theme::default().light);
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = Theme::from_json(r#"{"primary": "navy"}"#).unwrap_err();
        assert!(err.to_string().contains("navy"));
    }

    #[test]
    fn default_frame_fits_the_items_table() {
        let frame = Theme::default().geometry().frame();
        assert!(frame.width >= cm(19.5));
        assert!((frame.bottom() - (inch(1.0) + mm(10.0))).abs() < 1e-9);
    }
}
