use std::path::Path;

use flow_core::assets::resolve_image;
use flow_core::{
    cm, Align, Block, Cell, CellRange, Color, FontFamily, ImageBlock, ImageSize, LineStyle,
    ParagraphStyle, Row, StyleProp, TableBlock, TableStyle, VAlign,
};

use crate::data::{Field, InvoiceData};
use crate::theme::Theme;

const ITEM_HEADERS: [&str; 10] = [
    "Sl. No.",
    "Description",
    "HSN/SAC",
    "Qty",
    "Unit",
    "Rate",
    "Amount",
    "GST%",
    "GST Amt",
    "Total",
];

/// The logo at `path`, or a square with the theme's initials when the
/// file is missing or unreadable.
pub fn logo(path: Option<&Path>, theme: &Theme) -> Block {
    let side = cm(2.5);
    let fallback =
        ImageBlock::placeholder(&theme.logo_initials, theme.primary, ImageSize::Height(side));
    match path {
        Some(path) => Block::Image(resolve_image(
            path,
            ImageSize::Explicit {
                width: side,
                height: side,
            },
            fallback,
        )),
        None => Block::Image(fallback),
    }
}

fn bold(range: CellRange) -> (CellRange, StyleProp) {
    (
        range,
        StyleProp::Font {
            family: FontFamily::Helvetica,
            bold: true,
        },
    )
}

fn with_rules(rules: Vec<(CellRange, StyleProp)>) -> TableStyle {
    TableStyle { rules }
}

/// Label/value sub-table used inside the Bill To and Ship To cells.
fn address_table(fields: &[Field], theme: &Theme) -> TableBlock {
    let rows = fields
        .iter()
        .map(|f| Row::texts(&[f.label.as_str(), f.value.as_str()]))
        .collect();
    TableBlock::new(vec![cm(2.2), cm(6.9)], rows).with_style(with_rules(vec![
        (CellRange::all(), StyleProp::Align(Align::Left)),
        (CellRange::all(), StyleProp::FontSize(theme.body_size)),
        bold(CellRange::col(0)),
        (CellRange::all(), StyleProp::BottomPadding(2.0)),
        (CellRange::all(), StyleProp::TopPadding(1.0)),
    ]))
}

fn company_table(data: &InvoiceData, theme: &Theme, logo: Block) -> Block {
    let header = ParagraphStyle::sized(theme.header_size).with_color(theme.primary);
    let meta = format!(
        "Invoice #: {}<br/>Date: {}<br/>Our Ref: {}<br/>Your Ref: {}",
        data.number, data.date, data.our_ref, data.your_ref
    );
    let row = Row::new(vec![
        Cell::block(logo),
        Cell::block(Block::text(&format!("<b>{}</b>", theme.company_name), header)),
        Cell::block(Block::text(&meta, ParagraphStyle::sized(theme.body_size))),
    ]);
    TableBlock::new(vec![cm(2.5), cm(6.2), cm(10.0)], vec![row])
        .with_style(with_rules(vec![
            (CellRange::col(0), StyleProp::LeftPadding(0.0)),
            (CellRange::col(0), StyleProp::RightPadding(0.0)),
        ]))
        .into()
}

fn contact_table(data: &InvoiceData, theme: &Theme) -> Block {
    let header = ParagraphStyle::sized(theme.header_size).with_color(theme.primary);
    let rows = vec![
        Row::new(vec![
            Cell::block(Block::text("<b>Bill To</b>", header.clone())),
            Cell::block(Block::text("<b>Ship To</b>", header)),
        ]),
        Row::new(vec![
            Cell::block(address_table(&data.bill_to, theme)),
            Cell::block(address_table(&data.ship_to, theme)),
        ]),
    ];
    TableBlock::new(vec![cm(9.55), cm(9.55)], rows)
        .with_style(with_rules(vec![
            (CellRange::row(0), StyleProp::Background(theme.light)),
            (CellRange::all(), StyleProp::Box(LineStyle::new(0.3, theme.grid))),
            (CellRange::all(), StyleProp::InnerGrid(LineStyle::new(0.2, theme.inner_grid))),
            (CellRange::row(0), StyleProp::BottomPadding(4.0)),
        ]))
        .into()
}

fn items_table(data: &InvoiceData, theme: &Theme) -> Block {
    let mut rows = vec![Row::texts(&ITEM_HEADERS)];
    for (i, item) in data.items.iter().enumerate() {
        let sl = (i + 1).to_string();
        rows.push(Row::texts(&[
            sl.as_str(),
            item.description.as_str(),
            item.hsn.as_str(),
            item.qty.as_str(),
            item.unit.as_str(),
            item.rate.as_str(),
            item.amount.as_str(),
            item.gst_pct.as_str(),
            item.gst_amount.as_str(),
            item.total.as_str(),
        ]));
    }
    let columns = [1.2, 4.0, 2.2, 1.2, 1.4, 1.6, 2.1, 1.4, 2.1, 2.3]
        .into_iter()
        .map(cm)
        .collect();
    TableBlock::new(columns, rows)
        .with_repeat_rows(1)
        .with_style(with_rules(vec![
            (CellRange::row(0), StyleProp::Background(theme.primary)),
            (CellRange::row(0), StyleProp::TextColor(Color::WHITE)),
            (CellRange::all(), StyleProp::Align(Align::Center)),
            bold(CellRange::row(0)),
            (CellRange::all(), StyleProp::Grid(LineStyle::new(0.3, theme.grid))),
            (CellRange::all(), StyleProp::FontSize(theme.table_size)),
            (CellRange::all(), StyleProp::BottomPadding(3.0)),
            (CellRange::all(), StyleProp::TopPadding(3.0)),
        ]))
        .into()
}

fn summary_table(data: &InvoiceData, theme: &Theme) -> Block {
    let rows = data
        .summary
        .iter()
        .map(|line| Row::texts(&[line.label.as_str(), line.amount.as_str()]))
        .collect();
    let grey = LineStyle::new(0.5, theme.grid);
    TableBlock::new(vec![cm(15.5), cm(3.6)], rows)
        .with_style(with_rules(vec![
            bold(CellRange::row(-1)),
            (CellRange::all(), StyleProp::FontSize(theme.body_size)),
            (CellRange::all(), StyleProp::Align(Align::Right)),
            (CellRange::all(), StyleProp::RightPadding(8.0)),
            (CellRange::all(), StyleProp::LeftPadding(8.0)),
            (CellRange::all(), StyleProp::BottomPadding(5.0)),
            (CellRange::all(), StyleProp::TopPadding(5.0)),
            (CellRange::row(-1), StyleProp::Background(theme.light)),
            (CellRange::row(-1), StyleProp::LineAbove(grey)),
            (CellRange::row(-1), StyleProp::LineBelow(grey)),
        ]))
        .into()
}

/// Bank fields laid out two per row as label/value pairs.
fn bank_table(data: &InvoiceData, theme: &Theme) -> Block {
    let small = ParagraphStyle::sized(theme.small_size);
    let rows = data
        .bank
        .chunks(2)
        .map(|pair| {
            let mut cells = Vec::with_capacity(4);
            for field in pair {
                cells.push(Cell::block(Block::text(
                    &format!("<b>{}</b>", field.label),
                    small.clone(),
                )));
                cells.push(Cell::block(Block::text(&field.value, small.clone())));
            }
            Row::new(cells)
        })
        .collect();
    TableBlock::new(vec![cm(3.2), cm(6.5), cm(3.2), cm(6.5)], rows)
        .with_style(with_rules(vec![
            (CellRange::all(), StyleProp::VAlign(VAlign::Top)),
            (CellRange::all(), StyleProp::BottomPadding(2.0)),
            (CellRange::all(), StyleProp::TopPadding(1.0)),
            (CellRange::all(), StyleProp::LineBelow(LineStyle::new(0.1, theme.inner_grid))),
        ]))
        .into()
}

/// Build the invoice as a flat list of blocks, top to bottom.
pub fn assemble(data: &InvoiceData, theme: &Theme, logo: Block) -> Vec<Block> {
    let gap = Block::spacer(theme.section_gap);
    vec![
        Block::text(
            "TAX INVOICE",
            ParagraphStyle::sized(theme.title_size)
                .with_color(theme.primary)
                .with_align(Align::Center),
        ),
        gap.clone(),
        company_table(data, theme, logo),
        gap.clone(),
        contact_table(data, theme),
        gap.clone(),
        items_table(data, theme),
        gap.clone(),
        summary_table(data, theme),
        gap.clone(),
        Block::text(
            &format!("Amount in Words: {}", data.amount_in_words),
            ParagraphStyle::sized(theme.small_size),
        ),
        gap.clone(),
        Block::text(
            "Bank Details",
            ParagraphStyle::sized(theme.small_size + 1.0).with_color(theme.primary),
        ),
        bank_table(data, theme),
        Block::spacer(theme.section_gap * 0.75),
        Block::text(
            &format!(
                "For {}<br/><br/><br/>Authorized Signatory",
                theme.company_name
            ),
            ParagraphStyle::sized(theme.body_size).with_align(Align::Right),
        ),
    ]
}
