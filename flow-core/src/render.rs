use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use log::info;

use crate::block::{Block, ImageBlock, ImageSource, RuleBlock};
use crate::decorator::{DrawOp, PageDecorator, TextAnchor};
use crate::error::RenderError;
use crate::fonts::BuiltinFont;
use crate::geometry::{PageGeometry, Rect};
use crate::images::ImageData;
use crate::layout::{layout, LayoutConfig, PlacedContent, RenderedPage, TableFragment};
use crate::pdf::{ContentStream, ImageHandle, PdfDocument};
use crate::tables::{CellContent, TableBlock, VAlign};
use crate::text::Paragraph;

/// Output settings for the PDF backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Flate-compress content streams and image samples.
    pub compress: bool,
    /// Document title written to the info dictionary.
    pub title: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            compress: true,
            title: None,
        }
    }
}

/// Lay out `blocks` and render them to PDF bytes.
pub fn render<D: PageDecorator + ?Sized>(
    geometry: &PageGeometry,
    config: &LayoutConfig,
    blocks: &[Block],
    decorator: &D,
) -> Result<Vec<u8>, RenderError> {
    render_to(
        Vec::new(),
        geometry,
        config,
        blocks,
        decorator,
        &RenderOptions::default(),
    )
}

/// Lay out `blocks` and write the PDF to `writer`. Layout runs to
/// completion first, so a configuration error leaves `writer` untouched.
pub fn render_to<W: Write, D: PageDecorator + ?Sized>(
    writer: W,
    geometry: &PageGeometry,
    config: &LayoutConfig,
    blocks: &[Block],
    decorator: &D,
    options: &RenderOptions,
) -> Result<W, RenderError> {
    let pages = layout(geometry, config, blocks, decorator)?;

    let mut doc = PdfDocument::new(writer)?;
    doc.set_compression(options.compress);
    doc.set_info("Producer", concat!("flow-core ", env!("CARGO_PKG_VERSION")));
    if let Some(title) = &options.title {
        doc.set_info("Title", title);
    }

    let mut painter = Painter {
        doc,
        images: HashMap::new(),
    };
    for page in &pages {
        painter.page(geometry, page)?;
    }
    let page_count = painter.doc.page_count();
    let out = painter.doc.finish()?;
    info!("rendered {} page(s), {} image(s)", page_count, painter.images.len());
    Ok(out)
}

/// Paints rendered pages into a `PdfDocument`, writing each distinct
/// image only once.
struct Painter<W: Write> {
    doc: PdfDocument<W>,
    images: HashMap<*const ImageData, ImageHandle>,
}

/// Per-page drawing state.
#[derive(Default)]
struct PageOps {
    content: ContentStream,
    images: Vec<ImageHandle>,
}

impl<W: Write> Painter<W> {
    fn page(&mut self, geometry: &PageGeometry, page: &RenderedPage) -> Result<(), RenderError> {
        let mut ops = PageOps::default();
        for item in &page.items {
            match &item.content {
                PlacedContent::Block(block) => self.block(&mut ops, block, item.rect)?,
                PlacedContent::Table(fragment) => self.fragment(&mut ops, fragment, item.rect)?,
            }
        }
        for op in &page.furniture {
            furniture(&mut ops.content, op);
        }
        self.doc
            .add_page(geometry.width, geometry.height, ops.content, &ops.images)?;
        Ok(())
    }

    /// Paint a block whose box has its upper-left corner at (rect.x, rect.y).
    fn block(&mut self, ops: &mut PageOps, block: &Block, rect: Rect) -> Result<(), RenderError> {
        match block {
            Block::Paragraph(p) => paragraph(&mut ops.content, p, rect.x, rect.y, rect.width),
            Block::Spacer(_) => {}
            Block::Image(img) => self.image(ops, img, rect)?,
            Block::Rule(rule) => paint_rule(&mut ops.content, rule, rect),
            Block::Table(table) => {
                let heights = table.row_heights()?;
                let placed: Vec<(usize, f64)> = heights.iter().copied().enumerate().collect();
                self.table_rows(ops, table, &placed, rect)?;
            }
        }
        Ok(())
    }

    fn image(&mut self, ops: &mut PageOps, img: &ImageBlock, rect: Rect) -> Result<(), RenderError> {
        let (w, h) = img.dimensions()?;
        let x = rect.x + img.align.offset(rect.width, w);
        let y = rect.y - h;
        match &img.source {
            ImageSource::Data(data) => {
                let key = Arc::as_ptr(data);
                let handle = match self.images.get(&key) {
                    Some(handle) => handle.clone(),
                    None => {
                        let handle = self.doc.add_image(data)?;
                        self.images.insert(key, handle.clone());
                        handle
                    }
                };
                ops.content.image(&handle.name, x, y, w, h);
                if !ops.images.contains(&handle) {
                    ops.images.push(handle);
                }
            }
            ImageSource::Placeholder {
                fill,
                label,
                label_color,
            } => {
                let c = &mut ops.content;
                c.save_state().set_fill_color(*fill).rect(x, y, w, h).fill();
                let font = BuiltinFont::HelveticaBold;
                let mut size = h * 0.4;
                let measured = font.measure(label, size);
                if measured > w * 0.8 {
                    size *= w * 0.8 / measured;
                }
                let tw = font.measure(label, size);
                c.set_fill_color(*label_color).text(
                    label,
                    x + (w - tw) / 2.0,
                    y + h / 2.0 - size * 0.35,
                    font,
                    size,
                );
                c.restore_state();
            }
        }
        Ok(())
    }

    fn fragment(
        &mut self,
        ops: &mut PageOps,
        fragment: &TableFragment,
        rect: Rect,
    ) -> Result<(), RenderError> {
        let placed: Vec<(usize, f64)> = fragment
            .rows()
            .zip(fragment.row_heights.iter().copied())
            .collect();
        self.table_rows(ops, fragment.table, &placed, rect)
    }

    /// Paint `(row, height)` pairs stacked from the top of `rect`.
    fn table_rows(
        &mut self,
        ops: &mut PageOps,
        table: &TableBlock,
        placed: &[(usize, f64)],
        rect: Rect,
    ) -> Result<(), RenderError> {
        let x = rect.x + table.align.offset(rect.width, table.total_width());
        let edges = table.column_edges();

        let mut top = rect.y;
        let mut stacked = Vec::with_capacity(placed.len());
        for &(row, height) in placed {
            stacked.push((row, top, height));
            top -= height;
        }

        // Backgrounds first so content and lines sit on top.
        for &(row, top, height) in &stacked {
            for col in 0..table.columns.len() {
                if let Some(bg) = table.cell_style(col, row).background {
                    ops.content
                        .save_state()
                        .set_fill_color(bg)
                        .rect(x + edges[col], top - height, table.columns[col], height)
                        .fill()
                        .restore_state();
                }
            }
        }

        for &(row, top, height) in &stacked {
            for (col, cell) in table.rows[row].cells.iter().enumerate() {
                let style = table.cell_style(col, row);
                let pad = style.padding;
                let inner = Rect {
                    x: x + edges[col] + pad.left,
                    y: top - pad.top,
                    width: (table.columns[col] - pad.left - pad.right).max(0.0),
                    height: (height - pad.top - pad.bottom).max(0.0),
                };
                match &cell.content {
                    CellContent::Empty => {}
                    CellContent::Text(text) => {
                        let p = table.cell_paragraph(text, &style);
                        let content_h = p.height(inner.width);
                        let y = inner.y - valign_offset(style.valign, inner.height, content_h);
                        paragraph(&mut ops.content, &p, inner.x, y, inner.width);
                    }
                    CellContent::Block(block) => {
                        let content_h = block.measure(inner.width)?;
                        let y = inner.y - valign_offset(style.valign, inner.height, content_h);
                        self.block(ops, block, Rect { y, ..inner })?;
                    }
                }
            }
        }

        for seg in table.line_segments(&stacked, x) {
            ops.content
                .save_state()
                .set_stroke_color(seg.style.color)
                .set_line_width(seg.style.width)
                .line(seg.x1, seg.y1, seg.x2, seg.y2)
                .restore_state();
        }
        Ok(())
    }
}

fn valign_offset(valign: VAlign, avail: f64, used: f64) -> f64 {
    match valign {
        VAlign::Top => 0.0,
        VAlign::Middle => (avail - used) / 2.0,
        VAlign::Bottom => avail - used,
    }
}

/// Paint a wrapped paragraph whose first line box starts at `top`.
fn paragraph(c: &mut ContentStream, p: &Paragraph, x: f64, top: f64, width: f64) {
    let size = p.style.font_size;
    let leading = p.style.leading();
    let mut baseline = top - size;
    c.save_state().set_fill_color(p.style.color);
    for line in p.wrap(width) {
        let mut lx = x + p.style.align.offset(width, line.width);
        for run in &line.runs {
            c.text(&run.text, lx, baseline, run.font, size);
            lx += run.width;
        }
        baseline -= leading;
    }
    c.restore_state();
}

fn paint_rule(c: &mut ContentStream, rule: &RuleBlock, rect: Rect) {
    let len = rule.length(rect.width);
    let x = rect.x + rule.align.offset(rect.width, len);
    let y = rect.y - rule.space_before - rule.thickness / 2.0;
    c.save_state()
        .set_stroke_color(rule.color)
        .set_line_width(rule.thickness)
        .line(x, y, x + len, y)
        .restore_state();
}

fn furniture(c: &mut ContentStream, op: &DrawOp) {
    c.save_state();
    match op {
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            style,
        } => {
            c.set_stroke_color(style.color)
                .set_line_width(style.width)
                .line(*x1, *y1, *x2, *y2);
        }
        DrawOp::Rect { rect, fill, stroke } => {
            if let Some(f) = fill {
                c.set_fill_color(*f);
            }
            if let Some(s) = stroke {
                c.set_stroke_color(s.color).set_line_width(s.width);
            }
            match (fill, stroke) {
                (Some(_), Some(_)) => {
                    c.rect(rect.x, rect.bottom(), rect.width, rect.height).fill_stroke();
                }
                (Some(_), None) => {
                    c.rect(rect.x, rect.bottom(), rect.width, rect.height).fill();
                }
                (None, Some(_)) => {
                    c.rect(rect.x, rect.bottom(), rect.width, rect.height).stroke();
                }
                (None, None) => {}
            }
        }
        DrawOp::Text {
            text,
            x,
            y,
            anchor,
            font,
            size,
            color,
        } => {
            let w = font.measure(text, *size);
            let x = match anchor {
                TextAnchor::Left => *x,
                TextAnchor::Center => x - w / 2.0,
                TextAnchor::Right => x - w,
            };
            c.set_fill_color(*color).text(text, x, *y, *font, *size);
        }
    }
    c.restore_state();
}
