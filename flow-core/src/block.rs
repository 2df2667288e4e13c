use std::sync::Arc;

use crate::error::ConfigError;
use crate::geometry::{non_negative, EPSILON};
use crate::graphics::Color;
use crate::images::ImageData;
use crate::tables::TableBlock;
use crate::text::{Align, Paragraph, ParagraphStyle};

/// A unit of flowed content. Every block reports a deterministic height
/// once it is given a width.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Spacer(f64),
    Image(ImageBlock),
    Table(TableBlock),
    Rule(RuleBlock),
}

impl Block {
    /// Paragraph from light markup (see `Paragraph::markup`).
    pub fn text(markup: &str, style: ParagraphStyle) -> Self {
        Block::Paragraph(Paragraph::markup(markup, style))
    }

    pub fn spacer(height: f64) -> Self {
        Block::Spacer(height)
    }

    /// Height this block needs when laid out `width` points wide.
    pub fn measure(&self, width: f64) -> Result<f64, ConfigError> {
        match self {
            Block::Paragraph(p) => {
                non_negative("font size", p.style.font_size)?;
                non_negative("paragraph leading", p.style.leading())?;
                Ok(p.height(width))
            }
            Block::Spacer(h) => Ok(h.max(0.0)),
            Block::Image(img) => {
                let (w, h) = img.dimensions()?;
                if w > width + EPSILON {
                    return Err(ConfigError::InvalidImageSize(format!(
                        "image is {}pt wide but only {}pt are available",
                        w, width
                    )));
                }
                Ok(h)
            }
            Block::Table(t) => t.measure(width),
            Block::Rule(r) => {
                non_negative("rule thickness", r.thickness)?;
                non_negative("space before rule", r.space_before)?;
                non_negative("space after rule", r.space_after)?;
                Ok(r.height())
            }
        }
    }

    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }
}

impl From<Paragraph> for Block {
    fn from(p: Paragraph) -> Self {
        Block::Paragraph(p)
    }
}

impl From<TableBlock> for Block {
    fn from(t: TableBlock) -> Self {
        Block::Table(t)
    }
}

impl From<ImageBlock> for Block {
    fn from(i: ImageBlock) -> Self {
        Block::Image(i)
    }
}

impl From<RuleBlock> for Block {
    fn from(r: RuleBlock) -> Self {
        Block::Rule(r)
    }
}

/// What an image block paints.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Decoded image bytes, shared between the block and its placements.
    Data(Arc<ImageData>),
    /// Stand-in for a missing asset: a filled box with a centred label.
    Placeholder {
        fill: Color,
        label: String,
        label_color: Color,
    },
}

impl ImageSource {
    /// Height divided by width; placeholders are square.
    fn aspect(&self) -> f64 {
        match self {
            ImageSource::Data(data) => data.aspect(),
            ImageSource::Placeholder { .. } => 1.0,
        }
    }
}

/// Target size of an image block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageSize {
    Explicit { width: f64, height: f64 },
    /// Width given, height follows the aspect ratio.
    Width(f64),
    /// Height given, width follows the aspect ratio.
    Height(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub source: ImageSource,
    pub size: ImageSize,
    pub align: Align,
}

impl ImageBlock {
    pub fn new(source: ImageSource, size: ImageSize) -> Self {
        ImageBlock {
            source,
            size,
            align: Align::Left,
        }
    }

    pub fn placeholder(label: &str, fill: Color, size: ImageSize) -> Self {
        ImageBlock::new(
            ImageSource::Placeholder {
                fill,
                label: label.to_string(),
                label_color: Color::WHITE,
            },
            size,
        )
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Resolved (width, height) in points.
    pub fn dimensions(&self) -> Result<(f64, f64), ConfigError> {
        let aspect = self.source.aspect();
        let (w, h) = match self.size {
            ImageSize::Explicit { width, height } => (width, height),
            ImageSize::Width(w) => (w, w * aspect),
            ImageSize::Height(h) => (h / aspect, h),
        };
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ConfigError::InvalidImageSize(format!(
                "{}x{} is not a positive size",
                w, h
            )));
        }
        Ok((w, h))
    }
}

/// A horizontal line across part of the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBlock {
    pub thickness: f64,
    pub color: Color,
    /// Line length as a percentage of the available width.
    pub width_pct: f64,
    pub space_before: f64,
    pub space_after: f64,
    pub align: Align,
}

impl RuleBlock {
    pub fn new(thickness: f64, color: Color) -> Self {
        RuleBlock {
            thickness,
            color,
            width_pct: 100.0,
            space_before: 1.0,
            space_after: 1.0,
            align: Align::Center,
        }
    }

    pub fn with_width_pct(mut self, pct: f64) -> Self {
        self.width_pct = pct;
        self
    }

    pub fn with_spacing(mut self, before: f64, after: f64) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn height(&self) -> f64 {
        self.space_before + self.thickness + self.space_after
    }

    /// Line length inside `avail` points.
    pub fn length(&self, avail: f64) -> f64 {
        avail * self.width_pct.clamp(0.0, 100.0) / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_locked_width() {
        let data = Arc::new(ImageData {
            width: 200,
            height: 100,
            format: crate::images::ImageFormat::Png,
            color_space: crate::images::ColorSpace::DeviceGray,
            data: vec![0; 200 * 100],
            alpha: None,
        });
        let img = ImageBlock::new(ImageSource::Data(data), ImageSize::Width(50.0));
        assert_eq!(img.dimensions().unwrap(), (50.0, 25.0));
        let img = ImageBlock { size: ImageSize::Height(50.0), ..img };
        assert_eq!(img.dimensions().unwrap(), (100.0, 50.0));
    }

    #[test]
    fn placeholder_is_square() {
        let img = ImageBlock::placeholder("PC", Color::BLACK, ImageSize::Height(70.0));
        assert_eq!(img.dimensions().unwrap(), (70.0, 70.0));
        assert_eq!(Block::from(img).measure(100.0).unwrap(), 70.0);
    }

    #[test]
    fn image_wider_than_frame_is_rejected() {
        let img = ImageBlock::placeholder("X", Color::BLACK, ImageSize::Width(120.0));
        assert!(matches!(
            Block::from(img).measure(100.0),
            Err(ConfigError::InvalidImageSize(_))
        ));
    }

    #[test]
    fn zero_size_image_is_rejected() {
        let img = ImageBlock::placeholder(
            "X",
            Color::BLACK,
            ImageSize::Explicit {
                width: 0.0,
                height: 10.0,
            },
        );
        assert!(img.dimensions().is_err());
    }

    #[test]
    fn rule_height_and_length() {
        let rule = RuleBlock::new(0.5, Color::GREY)
            .with_width_pct(50.0)
            .with_spacing(2.0, 3.0);
        assert_eq!(Block::from(rule.clone()).measure(400.0).unwrap(), 5.5);
        assert_eq!(rule.length(400.0), 200.0);
    }

    #[test]
    fn negative_rule_spacing_is_rejected() {
        let rule = RuleBlock::new(0.5, Color::GREY).with_spacing(-20.0, 0.0);
        assert!(matches!(
            Block::from(rule).measure(100.0),
            Err(ConfigError::InvalidHeight(_))
        ));
    }

    #[test]
    fn spacer_height_is_fixed() {
        assert_eq!(Block::spacer(8.0).measure(1.0).unwrap(), 8.0);
    }
}
