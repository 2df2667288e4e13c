pub mod assets;
pub mod block;
pub mod decorator;
pub mod error;
pub mod fonts;
pub mod geometry;
pub mod graphics;
pub mod images;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod tables;
pub mod text;

pub use block::{Block, ImageBlock, ImageSize, ImageSource, RuleBlock};
pub use decorator::{DrawOp, NoDecoration, PageCanvas, PageDecorator, PageInfo, TextAnchor};
pub use error::{ConfigError, ImageError, RenderError};
pub use fonts::{BuiltinFont, FontFamily};
pub use geometry::{cm, inch, mm, Margins, PageGeometry, Rect};
pub use graphics::{Color, LineStyle};
pub use layout::{layout, LayoutConfig, PlacedContent, Placement, RenderedPage, TableFragment};
pub use render::{render, render_to, RenderOptions};
pub use tables::{Cell, CellContent, CellRange, Row, StyleProp, TableBlock, TableStyle, VAlign};
pub use text::{Align, Paragraph, ParagraphStyle, Span};
