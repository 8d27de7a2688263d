//! Word styles generated from the style sheet.

use super::{alignment_type, half_points, twips};
use crate::style::{Color, StyleDef, StyleName, StyleSheet};
use docx_rs::{Docx, RunFonts, Style, StyleType};

/// Character style applied to hyperlink runs.
pub const HYPERLINK_STYLE: &str = "Hyperlink";

/// Word highlight colors with their sRGB values.
const HIGHLIGHTS: [(&str, Color); 8] = [
    ("lightGray", Color::rgb(0xc0, 0xc0, 0xc0)),
    ("darkGray", Color::rgb(0x80, 0x80, 0x80)),
    ("yellow", Color::rgb(0xff, 0xff, 0x00)),
    ("green", Color::rgb(0x00, 0xff, 0x00)),
    ("cyan", Color::rgb(0x00, 0xff, 0xff)),
    ("magenta", Color::rgb(0xff, 0x00, 0xff)),
    ("blue", Color::rgb(0x00, 0x00, 0xff)),
    ("red", Color::rgb(0xff, 0x00, 0x00)),
];

/// Nearest Word highlight color; background panels are drawn with it.
pub fn highlight_name(color: Color) -> &'static str {
    let distance = |other: Color| {
        let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2);
        d(color.r, other.r) + d(color.g, other.g) + d(color.b, other.b)
    };
    HIGHLIGHTS
        .iter()
        .min_by_key(|(_, c)| distance(*c))
        .map(|(name, _)| *name)
        .unwrap_or("lightGray")
}

fn run_fonts(name: &str) -> RunFonts {
    RunFonts::new()
        .ascii(name)
        .hi_ansi(name)
        .east_asia(name)
        .cs(name)
}

fn paragraph_style(name: StyleName, def: &StyleDef) -> Style {
    let mut style = Style::new(name.docx_style_id(), StyleType::Paragraph)
        .name(name.display_name())
        .fonts(run_fonts(def.font.docx_name()))
        .size(half_points(def.size))
        .color(&def.color.to_hex())
        .align(alignment_type(def.alignment));

    if def.bold {
        style = style.bold();
    }
    if def.italic {
        style = style.italic();
    }
    if def.left_indent > 0.0 || def.right_indent > 0.0 {
        style = style.indent(
            Some(twips(def.left_indent)),
            None,
            Some(twips(def.right_indent)),
            None,
        );
    }
    if let Some(fill) = def.background {
        style = style.highlight(highlight_name(fill));
    }
    style
}

/// Add one paragraph style per sheet entry plus the hyperlink style.
pub fn add_styles(docx: Docx, sheet: &StyleSheet) -> Docx {
    let hyperlink = Style::new(HYPERLINK_STYLE, StyleType::Character)
        .name("Hyperlink")
        .underline("single");

    sheet
        .iter()
        .fold(docx, |docx, (name, def)| {
            docx.add_style(paragraph_style(name, &def))
        })
        .add_style(hyperlink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_name() {
        assert_eq!(highlight_name(Color::rgb(0xf3, 0xf4, 0xf6)), "lightGray");
        assert_eq!(highlight_name(Color::rgb(0xff, 0xee, 0x00)), "yellow");
        assert_eq!(highlight_name(Color::rgb(0x25, 0x63, 0xeb)), "blue");
    }
}
