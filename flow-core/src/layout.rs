use std::ops::Range;

use log::debug;
use serde::Deserialize;

use crate::block::Block;
use crate::decorator::{DrawOp, PageCanvas, PageDecorator, PageInfo};
use crate::error::ConfigError;
use crate::geometry::{PageGeometry, Rect, EPSILON};
use crate::tables::TableBlock;

/// Engine settings that are not part of the page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical gap between consecutive blocks on the same page. Never
    /// applied at the top of a page.
    pub block_spacing: f64,
}

impl LayoutConfig {
    pub fn with_block_spacing(mut self, spacing: f64) -> Self {
        self.block_spacing = spacing;
        self
    }
}

/// A run of table rows placed on one page: the repeated header rows
/// followed by a contiguous range of body rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFragment<'a> {
    pub table: &'a TableBlock,
    pub header: Range<usize>,
    pub body: Range<usize>,
    /// Heights of the rows in `rows()` order.
    pub row_heights: Vec<f64>,
}

impl<'a> TableFragment<'a> {
    /// Row indices in the order they are painted.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.header.clone().chain(self.body.clone())
    }

    pub fn height(&self) -> f64 {
        self.row_heights.iter().sum()
    }
}

/// What a placement paints.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedContent<'a> {
    Block(&'a Block),
    Table(TableFragment<'a>),
}

/// A block (or table fragment) positioned in the frame. `rect` spans the
/// frame width; (x, y) is its upper-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<'a> {
    pub rect: Rect,
    pub content: PlacedContent<'a>,
}

/// A finalized page: its content placements and the furniture the
/// decorator recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage<'a> {
    pub number: usize,
    pub items: Vec<Placement<'a>>,
    pub furniture: Vec<DrawOp>,
}

impl<'a> RenderedPage<'a> {
    /// Sum of the heights of the placed items (spacing excluded).
    pub fn content_height(&self) -> f64 {
        self.items.iter().map(|p| p.rect.height).sum()
    }
}

/// Result of trying to fit the next table rows on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FitResult {
    /// Rows up to the end of the table were placed.
    Stop,
    /// Some rows were placed but more remain.
    BoxFull,
    /// Nothing could be placed.
    BoxEmpty,
}

/// Where the next block goes inside the current page's frame.
#[derive(Debug, Clone, Copy)]
struct FrameCursor {
    frame: Rect,
    /// Top of the next block (PDF absolute coordinates).
    current_y: f64,
    /// True when nothing has been placed on the current page yet.
    first_item: bool,
}

impl FrameCursor {
    fn new(frame: Rect) -> Self {
        FrameCursor {
            frame,
            current_y: frame.y,
            first_item: true,
        }
    }

    fn reset(&mut self) {
        self.current_y = self.frame.y;
        self.first_item = true;
    }

    fn gap(&self, spacing: f64) -> f64 {
        if self.first_item {
            0.0
        } else {
            spacing
        }
    }

    fn remaining(&self) -> f64 {
        self.current_y - self.frame.bottom()
    }

    /// Claim `height` points below a gap and return the claimed rect.
    fn claim(&mut self, gap: f64, height: f64) -> Rect {
        let rect = Rect {
            x: self.frame.x,
            y: self.current_y - gap,
            width: self.frame.width,
            height,
        };
        self.current_y -= gap + height;
        self.first_item = false;
        rect
    }
}

/// State of one layout pass.
pub struct FlowLayout<'a, 'd, D: PageDecorator + ?Sized> {
    geometry: PageGeometry,
    config: LayoutConfig,
    decorator: &'d D,
    cursor: FrameCursor,
    number: usize,
    items: Vec<Placement<'a>>,
    pages: Vec<RenderedPage<'a>>,
}

impl<'a, 'd, D: PageDecorator + ?Sized> FlowLayout<'a, 'd, D> {
    pub fn new(
        geometry: &PageGeometry,
        config: &LayoutConfig,
        decorator: &'d D,
    ) -> Result<Self, ConfigError> {
        geometry.validate()?;
        Ok(FlowLayout {
            geometry: *geometry,
            config: *config,
            decorator,
            cursor: FrameCursor::new(geometry.frame()),
            number: 1,
            items: Vec::new(),
            pages: Vec::new(),
        })
    }

    fn frame(&self) -> Rect {
        self.cursor.frame
    }

    /// Finalize the current page and open the next one.
    fn close_page(&mut self) {
        let info = PageInfo {
            number: self.number,
            geometry: self.geometry,
        };
        let mut canvas = PageCanvas::new(&self.geometry);
        self.decorator.decorate(&info, &mut canvas);
        debug!(
            "page {} closed with {} item(s)",
            self.number,
            self.items.len()
        );
        self.pages.push(RenderedPage {
            number: self.number,
            items: std::mem::take(&mut self.items),
            furniture: canvas.into_ops(),
        });
        self.number += 1;
        self.cursor.reset();
    }

    /// Place the block at `index` in the flow.
    pub fn push(&mut self, index: usize, block: &'a Block) -> Result<(), ConfigError> {
        match block {
            Block::Table(table) => self.push_table(table),
            _ => self.push_atomic(index, block),
        }
    }

    fn push_atomic(&mut self, index: usize, block: &'a Block) -> Result<(), ConfigError> {
        let frame = self.frame();
        let height = block.measure(frame.width)?;
        if height > frame.height + EPSILON {
            return Err(ConfigError::BlockTooTall {
                index,
                height,
                frame_height: frame.height,
            });
        }
        let mut gap = self.cursor.gap(self.config.block_spacing);
        if gap + height > self.cursor.remaining() + EPSILON {
            self.close_page();
            gap = 0.0;
        }
        let rect = self.cursor.claim(gap, height);
        self.items.push(Placement {
            rect,
            content: PlacedContent::Block(block),
        });
        Ok(())
    }

    fn push_table(&mut self, table: &'a TableBlock) -> Result<(), ConfigError> {
        let frame = self.frame();
        table.validate(frame.width)?;
        let heights = table.row_heights()?;
        let header_count = table.header_count();
        let header_height: f64 = heights[..header_count].iter().sum();
        if header_height > frame.height + EPSILON {
            return Err(ConfigError::HeaderTooTall {
                height: header_height,
                frame_height: frame.height,
            });
        }

        let mut next = header_count;
        loop {
            match self.fit_rows(table, &heights, header_count, &mut next) {
                FitResult::Stop => return Ok(()),
                FitResult::BoxFull => {
                    debug!(
                        "table split on page {}, continuing at row {}",
                        self.number, next
                    );
                    self.close_page();
                }
                FitResult::BoxEmpty => {
                    if self.cursor.first_item {
                        return Err(ConfigError::RowTooTall {
                            row: next,
                            height: header_height + heights.get(next).copied().unwrap_or(0.0),
                            frame_height: frame.height,
                        });
                    }
                    self.close_page();
                }
            }
        }
    }

    /// Place the header plus as many body rows from `*next` as fit.
    fn fit_rows(
        &mut self,
        table: &'a TableBlock,
        heights: &[f64],
        header_count: usize,
        next: &mut usize,
    ) -> FitResult {
        let gap = self.cursor.gap(self.config.block_spacing);
        let avail = self.cursor.remaining() - gap;
        let mut used: f64 = heights[..header_count].iter().sum();
        let mut end = *next;
        while end < heights.len() && used + heights[end] <= avail + EPSILON {
            used += heights[end];
            end += 1;
        }

        let done = end == heights.len();
        // A header with no body row under it is never emitted on its own,
        // unless the table has no body at all.
        let header_only = end == *next;
        if (header_only && !done) || used > avail + EPSILON {
            return FitResult::BoxEmpty;
        }

        let rect = self.cursor.claim(gap, used);
        let row_heights = heights[..header_count]
            .iter()
            .chain(&heights[*next..end])
            .copied()
            .collect();
        self.items.push(Placement {
            rect,
            content: PlacedContent::Table(TableFragment {
                table,
                header: 0..header_count,
                body: *next..end,
                row_heights,
            }),
        });
        *next = end;
        if done {
            FitResult::Stop
        } else {
            FitResult::BoxFull
        }
    }

    /// Close the last page (even if it is empty) and return every page.
    pub fn finish(mut self) -> Vec<RenderedPage<'a>> {
        self.close_page();
        self.pages
    }
}

/// Paginate `blocks` into pages of `geometry`, calling `decorator` once
/// per finalized page.
pub fn layout<'a, D: PageDecorator + ?Sized>(
    geometry: &PageGeometry,
    config: &LayoutConfig,
    blocks: &'a [Block],
    decorator: &D,
) -> Result<Vec<RenderedPage<'a>>, ConfigError> {
    let mut flow = FlowLayout::new(geometry, config, decorator)?;
    for (index, block) in blocks.iter().enumerate() {
        flow.push(index, block)?;
    }
    Ok(flow.finish())
}
