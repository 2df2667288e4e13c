use crate::fonts::BuiltinFont;
use crate::geometry::{PageGeometry, Rect};
use crate::graphics::{Color, LineStyle};

/// What a decorator knows about the page it is painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageInfo {
    /// 1-based page number.
    pub number: usize,
    pub geometry: PageGeometry,
}

/// Which point of the text `x` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Left,
    Center,
    Right,
}

/// A furniture drawing operation, in page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: LineStyle,
    },
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<LineStyle>,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        anchor: TextAnchor,
        font: BuiltinFont,
        size: f64,
        color: Color,
    },
}

/// Drawing surface handed to a decorator. Covers the whole page, margins
/// included, and only records operations; the renderer paints them on
/// top of the page content.
#[derive(Debug, Clone, PartialEq)]
pub struct PageCanvas {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl PageCanvas {
    pub fn new(geometry: &PageGeometry) -> Self {
        PageCanvas {
            width: geometry.width,
            height: geometry.height,
            ops: Vec::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: LineStyle) -> &mut Self {
        self.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            style,
        });
        self
    }

    /// Rectangle with (x, y) at its upper-left corner.
    pub fn rect(&mut self, rect: Rect, fill: Option<Color>, stroke: Option<LineStyle>) -> &mut Self {
        self.ops.push(DrawOp::Rect { rect, fill, stroke });
        self
    }

    /// Single-line text with its baseline at `y`.
    #[allow(clippy::too_many_arguments)]
    pub fn text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        anchor: TextAnchor,
        font: BuiltinFont,
        size: f64,
        color: Color,
    ) -> &mut Self {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            anchor,
            font,
            size,
            color,
        });
        self
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

/// Paints static page furniture (running headers, footers, page numbers).
///
/// Called exactly once per page, after the page's content is fixed and
/// before the next page starts filling, with a fresh canvas each time.
pub trait PageDecorator {
    fn decorate(&self, page: &PageInfo, canvas: &mut PageCanvas);
}

impl<F> PageDecorator for F
where
    F: Fn(&PageInfo, &mut PageCanvas),
{
    fn decorate(&self, page: &PageInfo, canvas: &mut PageCanvas) {
        self(page, canvas)
    }
}

/// Decorator that paints nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDecoration;

impl PageDecorator for NoDecoration {
    fn decorate(&self, _page: &PageInfo, _canvas: &mut PageCanvas) {}
}
