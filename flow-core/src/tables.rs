use crate::block::Block;
use crate::error::ConfigError;
use crate::fonts::{default_leading, FontFamily};
use crate::geometry::{non_negative, EPSILON};
use crate::graphics::{Color, LineStyle};
use crate::text::{Align, Paragraph, ParagraphStyle};

// -------------------------------------------------------
// Cells and rows
// -------------------------------------------------------

/// What a table cell holds.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    Empty,
    /// Text styled by the table's style rules (light markup allowed).
    Text(String),
    /// A nested block: paragraph, image, sub-table, spacer or rule.
    Block(Box<Block>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub content: CellContent,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Cell {
            content: CellContent::Text(text.into()),
        }
    }

    pub fn block(block: impl Into<Block>) -> Self {
        Cell {
            content: CellContent::Block(Box::new(block.into())),
        }
    }

    pub fn empty() -> Self {
        Cell {
            content: CellContent::Empty,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::text(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::text(text)
    }
}

/// A row of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Fixed row height in points. When `None`, the row grows to fit
    /// its tallest cell.
    pub height: Option<f64>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row {
            cells,
            height: None,
        }
    }

    /// Row of text cells.
    pub fn texts<S: AsRef<str>>(texts: &[S]) -> Self {
        Row::new(texts.iter().map(|t| Cell::text(t.as_ref())).collect())
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }
}

// -------------------------------------------------------
// Style rules
// -------------------------------------------------------

/// Vertical alignment of cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// A rectangular block of cells addressed as `(column, row)`.
/// Negative indices count from the end: `-1` is the last column/row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl CellRange {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        CellRange { start, end }
    }

    pub fn all() -> Self {
        CellRange::new((0, 0), (-1, -1))
    }

    /// Every cell of one row.
    pub fn row(row: i32) -> Self {
        CellRange::new((0, row), (-1, row))
    }

    /// Every cell of one column.
    pub fn col(col: i32) -> Self {
        CellRange::new((col, 0), (col, -1))
    }

    /// Absolute `(c0, r0, c1, r1)` bounds, or `None` when the range
    /// selects nothing in a `cols` x `rows` table.
    pub fn resolve(&self, cols: usize, rows: usize) -> Option<(usize, usize, usize, usize)> {
        let fix = |v: i32, n: usize| -> i64 {
            if v < 0 {
                n as i64 + v as i64
            } else {
                v as i64
            }
        };
        let c0 = fix(self.start.0, cols).max(0);
        let r0 = fix(self.start.1, rows).max(0);
        let c1 = fix(self.end.0, cols).min(cols as i64 - 1);
        let r1 = fix(self.end.1, rows).min(rows as i64 - 1);
        if c0 > c1 || r0 > r1 {
            return None;
        }
        Some((c0 as usize, r0 as usize, c1 as usize, r1 as usize))
    }

    fn contains(&self, col: usize, row: usize, cols: usize, rows: usize) -> bool {
        self.resolve(cols, rows)
            .map_or(false, |(c0, r0, c1, r1)| {
                (c0..=c1).contains(&col) && (r0..=r1).contains(&row)
            })
    }
}

/// One styling property applied to a cell range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StyleProp {
    Background(Color),
    TextColor(Color),
    Font { family: FontFamily, bold: bool },
    FontSize(f64),
    Leading(f64),
    Align(Align),
    VAlign(VAlign),
    /// Same padding on all four sides.
    Padding(f64),
    TopPadding(f64),
    BottomPadding(f64),
    LeftPadding(f64),
    RightPadding(f64),
    /// Box plus inner grid.
    Grid(LineStyle),
    /// Outline around the range.
    Box(LineStyle),
    /// Lines between the cells of the range.
    InnerGrid(LineStyle),
    LineAbove(LineStyle),
    LineBelow(LineStyle),
}

/// Ordered style rules. Later rules override earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableStyle {
    pub rules: Vec<(CellRange, StyleProp)>,
}

impl TableStyle {
    pub fn new() -> Self {
        TableStyle::default()
    }

    pub fn with(mut self, range: CellRange, prop: StyleProp) -> Self {
        self.rules.push((range, prop));
        self
    }

    pub fn extend(mut self, other: &TableStyle) -> Self {
        self.rules.extend(other.rules.iter().copied());
        self
    }
}

/// Cell padding in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// The effective style of one cell after applying every matching rule.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub background: Option<Color>,
    pub text_color: Color,
    pub family: FontFamily,
    pub bold: bool,
    pub font_size: f64,
    pub leading: Option<f64>,
    pub align: Align,
    pub valign: VAlign,
    pub padding: Padding,
}

impl Default for CellStyle {
    fn default() -> Self {
        CellStyle {
            background: None,
            text_color: Color::BLACK,
            family: FontFamily::Helvetica,
            bold: false,
            font_size: 10.0,
            leading: Some(12.0),
            align: Align::Left,
            valign: VAlign::Top,
            padding: Padding {
                top: 3.0,
                bottom: 3.0,
                left: 6.0,
                right: 6.0,
            },
        }
    }
}

impl CellStyle {
    fn apply(&mut self, prop: &StyleProp) {
        match *prop {
            StyleProp::Background(c) => self.background = Some(c),
            StyleProp::TextColor(c) => self.text_color = c,
            StyleProp::Font { family, bold } => {
                self.family = family;
                self.bold = bold;
            }
            StyleProp::FontSize(s) => {
                self.font_size = s;
                self.leading = None;
            }
            StyleProp::Leading(l) => self.leading = Some(l),
            StyleProp::Align(a) => self.align = a,
            StyleProp::VAlign(v) => self.valign = v,
            StyleProp::Padding(p) => {
                self.padding = Padding {
                    top: p,
                    bottom: p,
                    left: p,
                    right: p,
                }
            }
            StyleProp::TopPadding(p) => self.padding.top = p,
            StyleProp::BottomPadding(p) => self.padding.bottom = p,
            StyleProp::LeftPadding(p) => self.padding.left = p,
            StyleProp::RightPadding(p) => self.padding.right = p,
            StyleProp::Grid(_)
            | StyleProp::Box(_)
            | StyleProp::InnerGrid(_)
            | StyleProp::LineAbove(_)
            | StyleProp::LineBelow(_) => {}
        }
    }

    pub fn leading(&self) -> f64 {
        self.leading.unwrap_or_else(|| default_leading(self.font_size))
    }

    /// Paragraph style for text cells.
    pub fn paragraph_style(&self) -> ParagraphStyle {
        ParagraphStyle {
            family: self.family,
            font_size: self.font_size,
            color: self.text_color,
            align: self.align,
            leading: Some(self.leading()),
        }
    }
}

// -------------------------------------------------------
// Table
// -------------------------------------------------------

/// A table with fixed column widths. The first `repeat_rows` rows are
/// headers, re-emitted at the top of every page the table continues on.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBlock {
    pub columns: Vec<f64>,
    pub rows: Vec<Row>,
    pub repeat_rows: usize,
    pub style: TableStyle,
    /// Placement of the table inside the frame.
    pub align: Align,
}

impl TableBlock {
    pub fn new(columns: Vec<f64>, rows: Vec<Row>) -> Self {
        TableBlock {
            columns,
            rows,
            repeat_rows: 0,
            style: TableStyle::default(),
            align: Align::Center,
        }
    }

    pub fn with_repeat_rows(mut self, n: usize) -> Self {
        self.repeat_rows = n;
        self
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn total_width(&self) -> f64 {
        self.columns.iter().sum()
    }

    /// Number of header rows actually present.
    pub fn header_count(&self) -> usize {
        self.repeat_rows.min(self.rows.len())
    }

    /// Left edge of every column plus the right edge of the last one,
    /// relative to the table's left side.
    pub fn column_edges(&self) -> Vec<f64> {
        let mut edges = Vec::with_capacity(self.columns.len() + 1);
        let mut x = 0.0;
        edges.push(x);
        for w in &self.columns {
            x += w;
            edges.push(x);
        }
        edges
    }

    /// Check the table against the width it will be laid out in.
    pub fn validate(&self, avail_width: f64) -> Result<(), ConfigError> {
        let total = self.total_width();
        if total > avail_width + EPSILON || self.columns.iter().any(|w| !(*w >= 0.0)) {
            return Err(ConfigError::ColumnsExceedWidth {
                total,
                available: avail_width,
            });
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.cells.len() > self.columns.len() {
                return Err(ConfigError::TooManyCells {
                    row: i,
                    cells: row.cells.len(),
                    columns: self.columns.len(),
                });
            }
        }
        Ok(())
    }

    /// Resolved style of the cell at (col, row).
    pub fn cell_style(&self, col: usize, row: usize) -> CellStyle {
        let (cols, rows) = (self.columns.len(), self.rows.len());
        let mut style = CellStyle::default();
        for (range, prop) in &self.style.rules {
            if range.contains(col, row, cols, rows) {
                style.apply(prop);
            }
        }
        style
    }

    /// The paragraph a text cell lays out as.
    pub fn cell_paragraph(&self, text: &str, style: &CellStyle) -> Paragraph {
        let mut p = Paragraph::markup(text, style.paragraph_style());
        if style.bold {
            for span in &mut p.spans {
                span.bold = true;
            }
        }
        p
    }

    fn content_height(
        &self,
        content: &CellContent,
        style: &CellStyle,
        inner_width: f64,
    ) -> Result<f64, ConfigError> {
        match content {
            CellContent::Empty => Ok(style.leading()),
            CellContent::Text(text) => {
                let lines = self.cell_paragraph(text, style).wrap(inner_width).len();
                Ok(lines.max(1) as f64 * style.leading())
            }
            CellContent::Block(block) => block.measure(inner_width),
        }
    }

    /// Height of each row, in row order.
    pub fn row_heights(&self) -> Result<Vec<f64>, ConfigError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                if let Some(h) = row.height {
                    return non_negative(&format!("row {} height", r), h);
                }
                let mut tallest = 0.0_f64;
                for (c, &col_width) in self.columns.iter().enumerate() {
                    let style = self.cell_style(c, r);
                    let pad = style.padding;
                    for v in [pad.top, pad.bottom, pad.left, pad.right] {
                        non_negative(&format!("cell ({}, {}) padding", c, r), v)?;
                    }
                    non_negative(&format!("cell ({}, {}) leading", c, r), style.leading())?;
                    let inner = (col_width - pad.left - pad.right).max(0.0);
                    let content = row
                        .cells
                        .get(c)
                        .map_or(&CellContent::Empty, |cell| &cell.content);
                    let h = self.content_height(content, &style, inner)?;
                    tallest = tallest.max(h + pad.top + pad.bottom);
                }
                Ok(tallest)
            })
            .collect()
    }

    /// Validate against `avail_width` and return the full table height.
    pub fn measure(&self, avail_width: f64) -> Result<f64, ConfigError> {
        self.validate(avail_width)?;
        Ok(self.row_heights()?.iter().sum())
    }

    /// Rule lines for a run of placed rows.
    ///
    /// `placed` lists `(row index, top y, height)` in the order the rows
    /// appear on the page; `x` is the table's left edge. Lines belonging
    /// to a range are clipped to the rows of that range present here, so
    /// a boxed table that splits is closed on every page.
    pub fn line_segments(&self, placed: &[(usize, f64, f64)], x: f64) -> Vec<Segment> {
        let (cols, rows) = (self.columns.len(), self.rows.len());
        let edges: Vec<f64> = self.column_edges().iter().map(|e| x + e).collect();
        let mut segments: Vec<Segment> = Vec::new();
        let mut push = |s: Segment| {
            if !segments.contains(&s) {
                segments.push(s);
            }
        };

        for (range, prop) in &self.style.rules {
            let (outer, inner, above, below) = match *prop {
                StyleProp::Grid(l) => (Some(l), Some(l), None, None),
                StyleProp::Box(l) => (Some(l), None, None, None),
                StyleProp::InnerGrid(l) => (None, Some(l), None, None),
                StyleProp::LineAbove(l) => (None, None, Some(l), None),
                StyleProp::LineBelow(l) => (None, None, None, Some(l)),
                _ => continue,
            };
            let Some((c0, r0, c1, r1)) = range.resolve(cols, rows) else {
                continue;
            };
            let visible: Vec<&(usize, f64, f64)> = placed
                .iter()
                .filter(|(r, _, _)| (r0..=r1).contains(r))
                .collect();
            let (left, right) = (edges[c0], edges[c1 + 1]);
            let last = visible.len().saturating_sub(1);

            for (j, &&(_, top, h)) in visible.iter().enumerate() {
                let bottom = top - h;
                let horizontal = |y: f64, style: LineStyle| Segment {
                    x1: left,
                    y1: y,
                    x2: right,
                    y2: y,
                    style,
                };
                let vertical = |vx: f64, style: LineStyle| Segment {
                    x1: vx,
                    y1: top,
                    x2: vx,
                    y2: bottom,
                    style,
                };
                if let Some(l) = above {
                    push(horizontal(top, l));
                }
                if let Some(l) = below {
                    push(horizontal(bottom, l));
                }
                if let Some(l) = outer {
                    if j == 0 {
                        push(horizontal(top, l));
                    }
                    if j == last {
                        push(horizontal(bottom, l));
                    }
                    push(vertical(left, l));
                    push(vertical(right, l));
                }
                if let Some(l) = inner {
                    if j > 0 {
                        push(horizontal(top, l));
                    }
                    for &vx in &edges[c0 + 1..=c1] {
                        push(vertical(vx, l));
                    }
                }
            }
        }
        segments
    }
}

/// A straight stroked segment in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub style: LineStyle,
}
