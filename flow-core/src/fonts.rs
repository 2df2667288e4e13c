use serde::Deserialize;

/// The fixed font set. These are standard PDF fonts, available in
/// every viewer without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
}

impl BuiltinFont {
    pub const ALL: [BuiltinFont; 6] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::HelveticaOblique,
        BuiltinFont::HelveticaBoldOblique,
        BuiltinFont::Courier,
        BuiltinFont::CourierBold,
    ];

    /// Resource name used in content streams (e.g. "F1").
    pub fn resource_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
            BuiltinFont::HelveticaOblique => "F3",
            BuiltinFont::HelveticaBoldOblique => "F4",
            BuiltinFont::Courier => "F5",
            BuiltinFont::CourierBold => "F6",
        }
    }

    /// The PDF BaseFont name.
    pub fn base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
        }
    }

    /// Width of a character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> u16 {
        let table = match self {
            BuiltinFont::Courier | BuiltinFont::CourierBold => return COURIER_WIDTH,
            BuiltinFont::Helvetica | BuiltinFont::HelveticaOblique => &HELVETICA_WIDTHS,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique => {
                &HELVETICA_BOLD_WIDTHS
            }
        };
        match ch {
            ' '..='~' => table[ch as usize - 32],
            '\u{2022}' => 350,
            '\u{2013}' => 556,
            '\u{2014}' => 1000,
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of `text` in points at `font_size`.
    pub fn measure(&self, text: &str, font_size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| self.char_width(ch) as u32).sum();
        units as f64 * font_size / 1000.0
    }
}

/// A font family whose variants are picked by weight and slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Courier,
}

impl FontFamily {
    pub fn variant(&self, bold: bool, italic: bool) -> BuiltinFont {
        match (self, bold, italic) {
            (FontFamily::Helvetica, false, false) => BuiltinFont::Helvetica,
            (FontFamily::Helvetica, true, false) => BuiltinFont::HelveticaBold,
            (FontFamily::Helvetica, false, true) => BuiltinFont::HelveticaOblique,
            (FontFamily::Helvetica, true, true) => BuiltinFont::HelveticaBoldOblique,
            // No Courier oblique in the fixed set.
            (FontFamily::Courier, false, _) => BuiltinFont::Courier,
            (FontFamily::Courier, true, _) => BuiltinFont::CourierBold,
        }
    }
}

/// Default leading for a font size (1.2x).
pub fn default_leading(font_size: f64) -> f64 {
    font_size * 1.2
}

/// Encode text for a WinAnsiEncoding simple font. Characters outside the
/// encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u8,
            '\u{20ac}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

/// Courier is monospaced.
const COURIER_WIDTH: u16 = 600;

/// Width for characters without metrics.
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica widths for ASCII 32..=126 (Adobe AFM), 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold widths for ASCII 32..=126 (Adobe AFM), 1/1000 em.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_widths() {
        let f = BuiltinFont::Helvetica;
        assert_eq!(f.char_width(' '), 278);
        assert_eq!(f.char_width('A'), 667);
        assert_eq!(f.char_width('i'), 222);
        assert_eq!(f.char_width('~'), 584);
        // "Hi" = 722 + 222 at 10pt
        assert!((f.measure("Hi", 10.0) - 9.44).abs() < 1e-9);
    }

    #[test]
    fn bold_is_wider() {
        let text = "Paramount Clothing";
        assert!(
            BuiltinFont::HelveticaBold.measure(text, 10.0)
                > BuiltinFont::Helvetica.measure(text, 10.0)
        );
    }

    #[test]
    fn courier_is_monospaced() {
        let f = BuiltinFont::CourierBold;
        assert_eq!(f.measure("iiii", 10.0), f.measure("MMMM", 10.0));
        assert_eq!(f.measure("ab", 10.0), 12.0);
    }

    #[test]
    fn family_variants() {
        assert_eq!(
            FontFamily::Helvetica.variant(true, true),
            BuiltinFont::HelveticaBoldOblique
        );
        assert_eq!(FontFamily::Courier.variant(false, true), BuiltinFont::Courier);
    }

    #[test]
    fn win_ansi_maps_bullet_and_unknowns() {
        assert_eq!(encode_win_ansi("a\u{2022}b"), vec![b'a', 0x95, b'b']);
        assert_eq!(encode_win_ansi("\u{e9}"), vec![0xe9]);
        assert_eq!(encode_win_ansi("\u{4e2d}"), vec![b'?']);
    }

    #[test]
    fn resource_names_are_unique() {
        let mut names: Vec<_> = BuiltinFont::ALL.iter().map(|f| f.resource_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), BuiltinFont::ALL.len());
    }
}
