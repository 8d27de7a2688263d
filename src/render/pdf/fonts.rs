//! Base-14 font metrics and WinAnsi text encoding.

use crate::style::FontFamily;
use unicode_normalization::UnicodeNormalization;

/// A concrete font face: family plus weight and slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontKey {
    pub family: FontFamily,
    pub bold: bool,
    pub italic: bool,
}

impl FontKey {
    pub fn new(family: FontFamily, bold: bool, italic: bool) -> Self {
        Self {
            family,
            bold,
            italic,
        }
    }

    /// PDF base font name.
    pub fn base_font(&self) -> &'static str {
        self.family.base_font(self.bold, self.italic)
    }

    /// Advance width of one WinAnsi byte in 1/1000 em.
    pub fn char_width(&self, byte: u8) -> u16 {
        match self.family {
            FontFamily::Courier => 600,
            FontFamily::Helvetica => helvetica_width(byte, self.bold),
        }
    }

    /// Width of encoded text in points.
    pub fn text_width(&self, bytes: &[u8], size: f32) -> f32 {
        let units: u32 = bytes.iter().map(|&b| self.char_width(b) as u32).sum();
        units as f32 * size / 1000.0
    }
}

/// Helvetica widths for 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold widths for 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn helvetica_width(byte: u8, bold: bool) -> u16 {
    if (0x20..=0x7E).contains(&byte) {
        let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
        return table[(byte - 0x20) as usize];
    }
    match (byte, bold) {
        (0x95, _) => 350,
        (0x85 | 0x97 | 0x99 | 0x89, _) => 1000,
        (0x91 | 0x92 | 0x82, false) => 222,
        (0x91 | 0x92 | 0x82, true) => 278,
        (0x93 | 0x94 | 0x84, false) => 333,
        (0x93 | 0x94 | 0x84, true) => 500,
        (0xA9 | 0xAE, _) => 737,
        (0xA0, _) => 278,
        (0xB0, _) => 400,
        (_, false) => 556,
        (_, true) => 611,
    }
}

/// Map a character to its WinAnsiEncoding byte.
pub fn encode_char(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        0x09 => Some(b' '),
        _ => Some(match c {
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => return None,
        }),
    }
}

/// Encode text to WinAnsi, dropping characters the encoding cannot express.
pub fn encode(text: &str) -> Vec<u8> {
    text.nfc().filter_map(encode_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_ascii_and_specials() {
        assert_eq!(encode("Hi"), b"Hi".to_vec());
        assert_eq!(encode("• © –"), vec![0x95, b' ', 0xA9, b' ', 0x96]);
    }

    #[test]
    fn test_encode_drops_emoji() {
        assert_eq!(encode("Welcome! 🎉"), b"Welcome! ".to_vec());
        assert_eq!(encode("✅"), Vec::<u8>::new());
    }

    #[test]
    fn test_encode_normalizes() {
        // "e" + combining acute accent composes to é (0xE9)
        assert_eq!(encode("e\u{301}"), vec![0xE9]);
    }

    #[test]
    fn test_widths() {
        let regular = FontKey::new(FontFamily::Helvetica, false, false);
        let bold = FontKey::new(FontFamily::Helvetica, true, false);
        let mono = FontKey::new(FontFamily::Courier, false, false);

        assert_eq!(regular.char_width(b'i'), 222);
        assert_eq!(bold.char_width(b'i'), 278);
        assert_eq!(mono.char_width(b'i'), 600);
        assert_eq!(mono.text_width(b"abcd", 10.0), 24.0);
        assert!(bold.text_width(b"Sync Now", 11.0) > regular.text_width(b"Sync Now", 11.0));
    }

    #[test]
    fn test_base_font() {
        let key = FontKey::new(FontFamily::Helvetica, true, true);
        assert_eq!(key.base_font(), "Helvetica-BoldOblique");
    }
}
