use flow_core::{
    layout, Block, Cell, ConfigError, LayoutConfig, NoDecoration, PageGeometry, Paragraph,
    ParagraphStyle, PlacedContent, RenderedPage, Row, TableBlock, TableFragment,
};

/// 300 x 600 page with 50pt margins: the frame is 200 wide and 500 tall.
fn geometry() -> PageGeometry {
    PageGeometry::new(300.0, 600.0).with_uniform_margins(50.0)
}

fn fixed_table(header: usize, header_height: f64, body: usize, body_height: f64) -> Block {
    let mut rows: Vec<Row> = (0..header)
        .map(|i| Row::texts(&[format!("H{}", i)]).with_height(header_height))
        .collect();
    rows.extend((0..body).map(|i| Row::texts(&[format!("R{}", i)]).with_height(body_height)));
    Block::Table(TableBlock::new(vec![100.0, 100.0], rows).with_repeat_rows(header))
}

fn fragments<'a>(pages: &'a [RenderedPage<'a>]) -> Vec<(usize, &'a TableFragment<'a>)> {
    pages
        .iter()
        .flat_map(|page| {
            page.items.iter().filter_map(move |p| match &p.content {
                PlacedContent::Table(f) => Some((page.number, f)),
                _ => None,
            })
        })
        .collect()
}

fn assert_pages_within_frame(pages: &[RenderedPage], spacing: f64) {
    let frame = geometry().frame();
    for page in pages {
        let gaps = page.items.len().saturating_sub(1) as f64 * spacing;
        assert!(
            page.content_height() + gaps <= frame.height + 1e-6,
            "page {} overflows: {} + {}",
            page.number,
            page.content_height(),
            gaps
        );
        for item in &page.items {
            assert!(item.rect.y <= frame.y + 1e-6);
            assert!(item.rect.y - item.rect.height >= frame.bottom() - 1e-6);
        }
    }
}

// -------------------------------------------------------
// Scenarios
// -------------------------------------------------------

#[test]
fn block_and_table_share_one_page() {
    // 100 + 2x30 + 8x40 = 480 <= 500
    let blocks = vec![Block::spacer(100.0), fixed_table(2, 30.0, 8, 40.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].items.len(), 2);
    let frags = fragments(&pages);
    assert_eq!(frags[0].1.header, 0..2);
    assert_eq!(frags[0].1.body, 2..10);
    assert_eq!(pages[0].items[1].rect.y, 450.0);
}

#[test]
fn exact_fit_is_inclusive() {
    let blocks = vec![
        Block::spacer(100.0),
        fixed_table(2, 30.0, 8, 40.0),
        Block::spacer(20.0),
    ];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].content_height(), 500.0);
}

#[test]
fn one_point_over_moves_to_next_page() {
    let blocks = vec![Block::spacer(480.0), Block::spacer(21.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].items[0].rect.y, 550.0);
}

#[test]
fn block_taller_than_frame_is_an_error() {
    let blocks = vec![Block::spacer(10.0), Block::spacer(501.0)];
    let err = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap_err();
    assert_eq!(
        err,
        ConfigError::BlockTooTall {
            index: 1,
            height: 501.0,
            frame_height: 500.0
        }
    );
}

#[test]
fn long_paragraph_taller_than_frame_is_an_error() {
    let text = vec!["word"; 2000].join(" ");
    let blocks = vec![Block::Paragraph(Paragraph::plain(&text, ParagraphStyle::sized(12.0)))];
    let err = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration);
    assert!(matches!(err, Err(ConfigError::BlockTooTall { index: 0, .. })));
}

// -------------------------------------------------------
// Table splitting
// -------------------------------------------------------

#[test]
fn split_table_reproduces_every_row_once() {
    // Header 30, rows 40: (500 - 30) / 40 = 11 rows per page.
    let blocks = vec![fixed_table(1, 30.0, 30, 40.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    assert_eq!(pages.len(), 3);

    let frags = fragments(&pages);
    let bodies: Vec<_> = frags.iter().map(|(_, f)| f.body.clone()).collect();
    assert_eq!(bodies, vec![1..12, 12..23, 23..31]);
    for (_, frag) in &frags {
        assert_eq!(frag.header, 0..1);
        assert_eq!(frag.rows().next(), Some(0));
    }
    let body_rows: Vec<usize> = frags.iter().flat_map(|(_, f)| f.body.clone()).collect();
    assert_eq!(body_rows, (1..31).collect::<Vec<_>>());
    assert_pages_within_frame(&pages, 0.0);
}

#[test]
fn two_header_rows_repeat_on_every_continuation() {
    // Headers 2x25, rows 40: (500 - 50) / 40 = 11 rows per page.
    let blocks = vec![fixed_table(2, 25.0, 30, 40.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    assert_eq!(pages.len(), 3);

    let frags = fragments(&pages);
    assert_eq!(frags.len(), 3);
    for (_, frag) in &frags {
        assert_eq!(frag.header, 0..2);
        assert_eq!(frag.rows().take(2).collect::<Vec<_>>(), vec![0, 1]);
    }
    let bodies: Vec<_> = frags.iter().map(|(_, f)| f.body.clone()).collect();
    assert_eq!(bodies, vec![2..13, 13..24, 24..32]);
    let body_rows: Vec<usize> = frags.iter().flat_map(|(_, f)| f.body.clone()).collect();
    assert_eq!(body_rows, (2..32).collect::<Vec<_>>());
    assert_pages_within_frame(&pages, 0.0);
}

#[test]
fn table_continues_below_preceding_content() {
    let blocks = vec![Block::spacer(400.0), fixed_table(1, 30.0, 5, 40.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    let frags = fragments(&pages);
    // 100pt left: header + 1 row on page 1, the rest on page 2.
    assert_eq!(frags[0].0, 1);
    assert_eq!(frags[0].1.body, 1..2);
    assert_eq!(frags[1].0, 2);
    assert_eq!(frags[1].1.body, 2..6);
    assert_eq!(frags[1].1.height(), 30.0 + 4.0 * 40.0);
}

#[test]
fn table_without_headers_splits_by_rows() {
    let blocks = vec![fixed_table(0, 0.0, 26, 40.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    let frags = fragments(&pages);
    assert_eq!(frags.len(), 3);
    assert!(frags.iter().all(|(_, f)| f.header.is_empty()));
    assert_eq!(frags[2].1.body, 24..26);
}

#[test]
fn zero_row_table_takes_no_space() {
    let blocks = vec![
        Block::Table(TableBlock::new(vec![100.0], vec![])),
        Block::spacer(10.0),
    ];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].items[0].rect.height, 0.0);
    assert_eq!(pages[0].items[1].rect.y, 550.0);
}

#[test]
fn text_rows_measure_from_content() {
    // Default cell style: 12pt leading + 6pt padding.
    let rows = vec![
        Row::new(vec![Cell::text("Item"), Cell::text("Qty")]),
        Row::new(vec![Cell::text("Shirt<br/>Blue"), Cell::text("2")]),
    ];
    let blocks = vec![Block::Table(TableBlock::new(vec![100.0, 100.0], rows))];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    assert_eq!(pages[0].items[0].rect.height, 18.0 + 30.0);
}

#[test]
fn negative_row_height_is_an_error() {
    let blocks = vec![
        Block::Table(TableBlock::new(
            vec![100.0],
            vec![Row::texts(&["x"]).with_height(-200.0)],
        )),
        Block::spacer(100.0),
    ];
    let err = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration);
    assert!(matches!(err, Err(ConfigError::InvalidHeight(_))));
}

#[test]
fn negative_leading_is_an_error() {
    let style = ParagraphStyle::sized(10.0).with_leading(-300.0);
    let blocks = vec![
        Block::Paragraph(Paragraph::plain("Heading", style)),
        Block::spacer(100.0),
    ];
    let err = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration);
    assert!(matches!(err, Err(ConfigError::InvalidHeight(_))));
}

// -------------------------------------------------------
// Properties
// -------------------------------------------------------

#[test]
fn spacing_is_counted_against_the_frame() {
    let config = LayoutConfig::default().with_block_spacing(12.0);
    let blocks: Vec<Block> = (0..40).map(|i| Block::spacer(10.0 + (i % 7) as f64 * 9.0)).collect();
    let pages = layout(&geometry(), &config, &blocks, &NoDecoration).unwrap();
    assert!(pages.len() > 1);
    assert_pages_within_frame(&pages, 12.0);
}

#[test]
fn page_numbers_are_consecutive() {
    let blocks: Vec<Block> = (0..25).map(|_| Block::spacer(90.0)).collect();
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &NoDecoration).unwrap();
    let numbers: Vec<usize> = pages.iter().map(|p| p.number).collect();
    assert_eq!(numbers, (1..=pages.len()).collect::<Vec<_>>());
    assert_eq!(pages.len(), 5);
}

#[test]
fn layout_is_deterministic() {
    let blocks = vec![
        Block::text("<b>Heading</b>", ParagraphStyle::sized(14.0)),
        fixed_table(1, 30.0, 20, 35.0),
        Block::spacer(60.0),
        fixed_table(2, 20.0, 12, 25.0),
    ];
    let config = LayoutConfig::default().with_block_spacing(6.0);
    let a = layout(&geometry(), &config, &blocks, &NoDecoration).unwrap();
    let b = layout(&geometry(), &config, &blocks, &NoDecoration).unwrap();
    assert_eq!(a, b);
}
