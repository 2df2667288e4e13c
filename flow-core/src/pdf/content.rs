use crate::fonts::{encode_win_ansi, BuiltinFont};
use crate::graphics::Color;

use super::writer::{escape_string, format_real};

/// Builder for a page content stream. Coordinates are PDF user space
/// (origin bottom-left, points).
#[derive(Debug, Default, Clone)]
pub struct ContentStream {
    ops: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        ContentStream::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.ops
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.ops
    }

    fn op(&mut self, operands: &[f64], operator: &str) -> &mut Self {
        for v in operands {
            self.ops.extend_from_slice(format_real(*v).as_bytes());
            self.ops.push(b' ');
        }
        self.ops.extend_from_slice(operator.as_bytes());
        self.ops.push(b'\n');
        self
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.op(&[], "q")
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.op(&[], "Q")
    }

    pub fn set_fill_color(&mut self, c: Color) -> &mut Self {
        self.op(&[c.r, c.g, c.b], "rg")
    }

    pub fn set_stroke_color(&mut self, c: Color) -> &mut Self {
        self.op(&[c.r, c.g, c.b], "RG")
    }

    pub fn set_line_width(&mut self, w: f64) -> &mut Self {
        self.op(&[w], "w")
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(&[x, y], "m")
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(&[x, y], "l")
    }

    /// Rectangle path from its lower-left corner.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.op(&[x, y, w, h], "re")
    }

    pub fn fill(&mut self) -> &mut Self {
        self.op(&[], "f")
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.op(&[], "S")
    }

    pub fn fill_stroke(&mut self) -> &mut Self {
        self.op(&[], "B")
    }

    /// Stroke a single straight segment.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.move_to(x1, y1).line_to(x2, y2).stroke()
    }

    /// Show `text` with its baseline starting at (x, y).
    pub fn text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        font: BuiltinFont,
        font_size: f64,
    ) -> &mut Self {
        self.ops.extend_from_slice(b"BT\n/");
        self.ops.extend_from_slice(font.resource_name().as_bytes());
        self.ops.push(b' ');
        self.op(&[font_size], "Tf");
        self.op(&[x, y], "Td");
        self.ops.push(b'(');
        self.ops
            .extend_from_slice(&escape_string(&encode_win_ansi(text)));
        self.ops.extend_from_slice(b") Tj\nET\n");
        self
    }

    /// Paint image XObject `name` scaled into the given rectangle
    /// (lower-left corner at x, y).
    pub fn image(&mut self, name: &str, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.save_state();
        self.op(&[w, 0.0, 0.0, h, x, y], "cm");
        self.ops.push(b'/');
        self.ops.extend_from_slice(name.as_bytes());
        self.ops.extend_from_slice(b" Do\n");
        self.restore_state()
    }
}
