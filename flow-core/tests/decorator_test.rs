use std::cell::RefCell;

use flow_core::{
    layout, Block, BuiltinFont, Color, DrawOp, LayoutConfig, LineStyle, PageCanvas, PageDecorator,
    PageGeometry, PageInfo, Rect, TextAnchor,
};

fn geometry() -> PageGeometry {
    PageGeometry::new(300.0, 600.0).with_uniform_margins(50.0)
}

fn footer(page: &PageInfo, canvas: &mut PageCanvas) {
    let m = page.geometry.margins;
    let y = m.bottom - 20.0;
    canvas.line(
        m.left,
        y + 10.0,
        canvas.width() - m.right,
        y + 10.0,
        LineStyle::new(0.5, Color::GREY),
    );
    canvas.text(
        &format!("Page {}", page.number),
        canvas.width() - m.right,
        y,
        TextAnchor::Right,
        BuiltinFont::Helvetica,
        8.0,
        Color::BLACK,
    );
}

#[test]
fn called_once_per_page_in_order() {
    let seen = RefCell::new(Vec::new());
    let deco = |page: &PageInfo, _canvas: &mut PageCanvas| seen.borrow_mut().push(page.number);
    let blocks = vec![Block::spacer(400.0), Block::spacer(400.0), Block::spacer(400.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &deco).unwrap();
    assert_eq!(pages.len(), 3);
    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
}

#[test]
fn fires_for_an_empty_document() {
    let seen = RefCell::new(Vec::new());
    let deco = |page: &PageInfo, _canvas: &mut PageCanvas| seen.borrow_mut().push(page.number);
    let pages = layout(&geometry(), &LayoutConfig::default(), &[], &deco).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(*seen.borrow(), vec![1]);
}

#[test]
fn not_called_when_layout_fails() {
    let seen = RefCell::new(Vec::new());
    let deco = |page: &PageInfo, _canvas: &mut PageCanvas| seen.borrow_mut().push(page.number);
    let blocks = vec![Block::spacer(600.0)];
    assert!(layout(&geometry(), &LayoutConfig::default(), &blocks, &deco).is_err());
    assert!(seen.borrow().is_empty());
}

#[test]
fn furniture_is_recorded_per_page() {
    let blocks = vec![Block::spacer(300.0), Block::spacer(300.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, &footer).unwrap();
    assert_eq!(pages.len(), 2);
    for page in &pages {
        // A fresh canvas per page: nothing leaks from the previous call.
        assert_eq!(page.furniture.len(), 2);
        let label = page.furniture.iter().find_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.clone()),
            _ => None,
        });
        assert_eq!(label, Some(format!("Page {}", page.number)));
    }
}

#[test]
fn canvas_covers_the_whole_page() {
    let deco = |page: &PageInfo, canvas: &mut PageCanvas| {
        assert_eq!(canvas.width(), page.geometry.width);
        assert_eq!(canvas.height(), page.geometry.height);
        canvas.rect(
            Rect {
                x: 0.0,
                y: canvas.height(),
                width: canvas.width(),
                height: 20.0,
            },
            Some(Color::LIGHT_GREY),
            None,
        );
    };
    let pages = layout(&geometry(), &LayoutConfig::default(), &[], &deco).unwrap();
    assert!(matches!(pages[0].furniture[0], DrawOp::Rect { .. }));
}

struct Stamp(&'static str);

impl PageDecorator for Stamp {
    fn decorate(&self, page: &PageInfo, canvas: &mut PageCanvas) {
        canvas.text(
            self.0,
            page.geometry.width / 2.0,
            page.geometry.height - 20.0,
            TextAnchor::Center,
            BuiltinFont::HelveticaBold,
            10.0,
            Color::BLACK,
        );
    }
}

#[test]
fn trait_objects_work_as_decorators() {
    let deco: Box<dyn PageDecorator> = Box::new(Stamp("DRAFT"));
    let blocks = vec![Block::spacer(10.0)];
    let pages = layout(&geometry(), &LayoutConfig::default(), &blocks, deco.as_ref()).unwrap();
    assert_eq!(pages[0].furniture.len(), 1);
}
