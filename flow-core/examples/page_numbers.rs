/// Example: a long table flowed across pages with a footer decorator.
///
/// The header row repeats on every page and the decorator stamps
/// "Page N" plus a rule at the bottom of each page.
///
/// Run with:
///   cargo run -p flow-core --example page_numbers
///
/// Writes output/flow-page-numbers.pdf
use std::fs::File;
use std::io::BufWriter;

use flow_core::{
    mm, render_to, Block, BuiltinFont, CellRange, Color, LayoutConfig, LineStyle, PageCanvas,
    PageGeometry, PageInfo, ParagraphStyle, RenderOptions, Row, StyleProp, TableBlock, TableStyle,
    TextAnchor,
};

fn footer(page: &PageInfo, canvas: &mut PageCanvas) {
    let m = page.geometry.margins;
    let right = canvas.width() - m.right;
    canvas.line(
        m.left,
        m.bottom + mm(10.0),
        right,
        m.bottom + mm(10.0),
        LineStyle::new(0.5, Color::GREY),
    );
    canvas.text(
        &format!("Page {}", page.number),
        right,
        m.bottom + mm(6.0),
        TextAnchor::Right,
        BuiltinFont::Helvetica,
        8.0,
        Color::GREY,
    );
}

fn main() {
    env_logger::init();

    let geometry = PageGeometry::a4()
        .with_uniform_margins(mm(20.0))
        .with_reserves(0.0, mm(12.0));

    let mut rows = vec![Row::texts(&["#", "Description", "Qty", "Amount"])];
    for i in 1..=120 {
        rows.push(Row::texts(&[
            i.to_string(),
            format!("Line item number {}", i),
            (i % 7 + 1).to_string(),
            format!("{:.2}", i as f64 * 12.5),
        ]));
    }
    let style = TableStyle::new()
        .with(CellRange::row(0), StyleProp::Background(Color::rgb(0.17, 0.24, 0.31)))
        .with(CellRange::row(0), StyleProp::TextColor(Color::WHITE))
        .with(CellRange::col(-1), StyleProp::Align(flow_core::Align::Right))
        .with(CellRange::all(), StyleProp::Grid(LineStyle::new(0.25, Color::LIGHT_GREY)));
    let table = TableBlock::new(vec![40.0, 280.0, 60.0, 100.0], rows)
        .with_repeat_rows(1)
        .with_style(style);

    let blocks = vec![
        Block::text("<b>Line items</b>", ParagraphStyle::sized(16.0)),
        Block::Table(table),
    ];

    std::fs::create_dir_all("output").unwrap();
    let file = BufWriter::new(File::create("output/flow-page-numbers.pdf").expect("create PDF"));
    let options = RenderOptions {
        compress: true,
        title: Some("Page numbering example".to_string()),
    };
    let config = LayoutConfig::default().with_block_spacing(8.0);
    render_to(file, &geometry, &config, &blocks, &footer, &options).expect("render");
    println!("Written to output/flow-page-numbers.pdf");
}
