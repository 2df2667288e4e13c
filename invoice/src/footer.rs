use flow_core::{mm, BuiltinFont, LineStyle, PageCanvas, PageInfo, TextAnchor};

use crate::theme::Theme;

/// Footer decorator: a rule just below the frame, the company line,
/// website and page number under it, and the contact line at the bottom.
pub fn footer(theme: &Theme) -> impl Fn(&PageInfo, &mut PageCanvas) {
    let theme = theme.clone();
    move |page: &PageInfo, canvas: &mut PageCanvas| {
        let m = page.geometry.margins;
        let left = m.left;
        let right = canvas.width() - m.right;
        let center = canvas.width() / 2.0;
        let rule_y = m.bottom + mm(10.0);
        let line_y = m.bottom + mm(6.0);
        let contact_y = m.bottom + mm(2.0);
        let (font, size, color) = (BuiltinFont::Helvetica, 8.0, theme.secondary);

        canvas
            .line(left, rule_y, right, rule_y, LineStyle::new(0.5, theme.primary))
            .text(
                &format!("{} \u{2022} {}", theme.company_name, theme.tagline),
                left,
                line_y,
                TextAnchor::Left,
                font,
                size,
                color,
            )
            .text(&theme.website, center, line_y, TextAnchor::Center, font, size, color)
            .text(
                &format!("Page {}", page.number),
                right,
                line_y,
                TextAnchor::Right,
                font,
                size,
                color,
            )
            .text(&theme.contact_line, center, contact_y, TextAnchor::Center, font, size, color);
    }
}
