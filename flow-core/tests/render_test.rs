use std::io::{self, Write};
use std::sync::Arc;

use flow_core::images::load_image;
use flow_core::{
    render, render_to, Align, Block, BuiltinFont, Cell, CellRange, Color, ImageBlock, ImageSize,
    ImageSource, LayoutConfig, LineStyle, NoDecoration, PageCanvas, PageGeometry, PageInfo,
    ParagraphStyle, RenderError, RenderOptions, Row, RuleBlock, StyleProp, TableBlock, TableStyle,
    TextAnchor,
};

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

fn geometry() -> PageGeometry {
    PageGeometry::new(300.0, 600.0).with_uniform_margins(50.0)
}

fn uncompressed() -> RenderOptions {
    RenderOptions {
        compress: false,
        title: Some("Test".to_string()),
    }
}

fn render_plain(blocks: &[Block]) -> Vec<u8> {
    let deco = |page: &PageInfo, canvas: &mut PageCanvas| {
        canvas.text(
            &format!("Page {}", page.number),
            250.0,
            30.0,
            TextAnchor::Right,
            BuiltinFont::Helvetica,
            8.0,
            Color::BLACK,
        );
    };
    render_to(
        Vec::new(),
        &geometry(),
        &LayoutConfig::default(),
        blocks,
        &deco,
        &uncompressed(),
    )
    .unwrap()
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let data = vec![200u8; (width * height * 3) as usize];
        writer.write_image_data(&data).unwrap();
    }
    out
}

fn items_table(rows: usize) -> Block {
    let mut all = vec![Row::texts(&["Item", "Qty"]).with_height(30.0)];
    all.extend((0..rows).map(|i| Row::texts(&[format!("Shirt {}", i), "2".to_string()]).with_height(40.0)));
    let style = TableStyle::new()
        .with(CellRange::row(0), StyleProp::Background(Color::rgb(0.17, 0.24, 0.31)))
        .with(CellRange::all(), StyleProp::Grid(LineStyle::new(0.5, Color::GREY)));
    Block::Table(
        TableBlock::new(vec![120.0, 80.0], all)
            .with_repeat_rows(1)
            .with_style(style),
    )
}

#[test]
fn paragraph_text_reaches_the_page() {
    let bytes = render_plain(&[Block::text(
        "Hello <b>world</b>",
        ParagraphStyle::sized(12.0),
    )]);
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(contains(&bytes, b"(Hello) Tj"));
    assert!(contains(&bytes, b"/F2 12 Tf"));
    assert!(contains(&bytes, b"( world) Tj"));
    assert!(contains(&bytes, b"(Page 1) Tj"));
    assert!(contains(&bytes, b"/Title (Test)"));
}

#[test]
fn header_row_repeats_on_every_page() {
    let bytes = render_plain(&[items_table(30)]);
    assert!(contains(&bytes, b"/Count 3"));
    assert_eq!(count(&bytes, b"(Item) Tj"), 3);
    for i in 0..30 {
        let needle = format!("(Shirt {}) Tj", i);
        assert_eq!(count(&bytes, needle.as_bytes()), 1, "row {}", i);
    }
    assert!(contains(&bytes, b"(Page 3) Tj"));
    assert!(contains(&bytes, b"0.17 0.24 0.31 rg"));
}

#[test]
fn shared_image_is_written_once() {
    let data = Arc::new(load_image(png(8, 4)).unwrap());
    let img = ImageBlock::new(ImageSource::Data(data), ImageSize::Width(80.0));
    let blocks = vec![
        Block::Image(img.clone()),
        Block::spacer(460.0),
        Block::Image(img.with_align(Align::Right)),
    ];
    let bytes = render_plain(&blocks);
    assert!(contains(&bytes, b"/Count 2"));
    assert_eq!(count(&bytes, b"/Subtype /Image"), 1);
    assert_eq!(count(&bytes, b"/Im1 Do"), 2);
    // Right aligned on page 2: x = 50 + 200 - 80.
    assert!(contains(&bytes, b"80 0 0 40 170 510 cm"));
}

#[test]
fn placeholder_paints_box_and_label() {
    let img = ImageBlock::placeholder("PC", Color::rgb(0.5, 0.5, 0.5), ImageSize::Height(50.0));
    let bytes = render_plain(&[Block::Image(img)]);
    assert!(contains(&bytes, b"50 500 50 50 re"));
    assert!(contains(&bytes, b"(PC) Tj"));
    assert!(!contains(&bytes, b"/XObject"));
}

#[test]
fn rule_is_stroked_across_part_of_the_frame() {
    let rule = RuleBlock::new(1.0, Color::BLACK).with_width_pct(50.0).with_spacing(0.0, 0.0);
    let bytes = render_plain(&[Block::Rule(rule)]);
    // Centred half-width line at the frame top.
    assert!(contains(&bytes, b"100 549.5 m\n200 549.5 l\nS"));
}

#[test]
fn nested_table_in_cell_is_painted() {
    let inner = TableBlock::new(
        vec![40.0, 40.0],
        vec![Row::texts(&["Name:", "Alice"]), Row::texts(&["City:", "Lyon"])],
    )
    .with_align(Align::Left);
    let outer = TableBlock::new(
        vec![100.0, 100.0],
        vec![Row::new(vec![Cell::text("<b>Bill To</b>"), Cell::block(inner)])],
    );
    let bytes = render_plain(&[Block::Table(outer)]);
    assert!(contains(&bytes, b"(Bill To) Tj"));
    assert!(contains(&bytes, b"(Alice) Tj"));
    assert!(contains(&bytes, b"(Lyon) Tj"));
}

#[test]
fn output_is_byte_identical_across_runs() {
    let blocks = vec![
        Block::text("Tax Invoice", ParagraphStyle::sized(18.0)),
        items_table(25),
    ];
    let a = render(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    let b = render(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    assert_eq!(a, b);
}

#[test]
fn configuration_errors_surface_as_render_errors() {
    let blocks = vec![Block::Table(TableBlock::new(vec![150.0, 150.0], vec![]))];
    let err = render(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap_err();
    assert!(matches!(err, RenderError::Config(_)));
    assert!(err.to_string().contains("300pt"));
}

/// Accepts `limit` bytes, then fails every write.
#[derive(Debug)]
struct FailingWriter {
    written: usize,
    limit: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failures_surface_as_backend_errors() {
    let blocks = vec![items_table(30)];
    for limit in [0, 200, 4000] {
        let writer = FailingWriter { written: 0, limit };
        let err = render_to(
            writer,
            &geometry(),
            &LayoutConfig::default(),
            &blocks,
            &NoDecoration,
            &uncompressed(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Backend(_)), "limit {}", limit);
        assert!(err.to_string().contains("disk full"));
    }
}
