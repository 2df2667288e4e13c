use serde::Deserialize;

use crate::error::ConfigError;

/// Points per millimetre.
const PT_PER_MM: f64 = 72.0 / 25.4;

/// Convert millimetres to points.
pub fn mm(v: f64) -> f64 {
    v * PT_PER_MM
}

/// Convert centimetres to points.
pub fn cm(v: f64) -> f64 {
    v * PT_PER_MM * 10.0
}

/// Convert inches to points.
pub fn inch(v: f64) -> f64 {
    v * 72.0
}

/// Tolerance used when comparing accumulated heights and widths.
pub(crate) const EPSILON: f64 = 1e-6;

/// Pass `v` through if it is a finite, non-negative vertical measure.
pub(crate) fn non_negative(what: &str, v: f64) -> Result<f64, ConfigError> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(ConfigError::InvalidHeight(format!(
            "{} must be a non-negative number, got {}",
            what, v
        )))
    }
}

/// A rectangle on the page.
/// (x, y) is the upper-left corner in PDF page coordinates
/// (origin bottom-left). Content flows top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Y coordinate of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y - self.height
    }

    /// X coordinate of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn uniform(v: f64) -> Self {
        Margins {
            left: v,
            right: v,
            top: v,
            bottom: v,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::uniform(72.0)
    }
}

/// Page size, margins, and the extra bands reserved for running
/// header/footer furniture. The content frame is whatever is left.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub margins: Margins,
    /// Band below the top margin kept free of flowed content.
    #[serde(default)]
    pub header_reserve: f64,
    /// Band above the bottom margin kept free of flowed content.
    #[serde(default)]
    pub footer_reserve: f64,
}

impl PageGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        PageGeometry {
            width,
            height,
            margins: Margins::default(),
            header_reserve: 0.0,
            footer_reserve: 0.0,
        }
    }

    /// ISO A4 portrait (595.28 x 841.89 pt) with 1 inch margins.
    pub fn a4() -> Self {
        PageGeometry::new(mm(210.0), mm(297.0))
    }

    /// US Letter portrait with 1 inch margins.
    pub fn letter() -> Self {
        PageGeometry::new(612.0, 792.0)
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_uniform_margins(self, v: f64) -> Self {
        self.with_margins(Margins::uniform(v))
    }

    pub fn with_reserves(mut self, header: f64, footer: f64) -> Self {
        self.header_reserve = header;
        self.footer_reserve = footer;
        self
    }

    /// The region available for flowed content.
    pub fn frame(&self) -> Rect {
        let m = &self.margins;
        Rect {
            x: m.left,
            y: self.height - m.top - self.header_reserve,
            width: self.width - m.left - m.right,
            height: self.height
                - m.top
                - m.bottom
                - self.header_reserve
                - self.footer_reserve,
        }
    }

    /// Reject geometry whose frame would be empty or inverted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.margins;
        let offsets = [
            ("left margin", m.left),
            ("right margin", m.right),
            ("top margin", m.top),
            ("bottom margin", m.bottom),
            ("header reserve", self.header_reserve),
            ("footer reserve", self.footer_reserve),
        ];
        if let Some((name, v)) = offsets.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::InvalidGeometry(format!(
                "{} must be a non-negative number, got {}",
                name, v
            )));
        }
        let frame = self.frame();
        if !(frame.width > 0.0) {
            return Err(ConfigError::InvalidGeometry(format!(
                "frame width {} is not positive (page width {})",
                frame.width, self.width
            )));
        }
        if !(frame.height > 0.0) {
            return Err(ConfigError::InvalidGeometry(format!(
                "frame height {} is not positive (page height {})",
                frame.height, self.height
            )));
        }
        Ok(())
    }
}
