//! Named paragraph styles shared by the PDF and DOCX renderers.
//!
//! Content blocks only carry a [`StyleName`] label. The [`StyleSheet`]
//! resolves that label to concrete formatting (font, size, color,
//! spacing), so both output formats agree on what a "heading" looks like.

use crate::error::{Error, Result};
use crate::model::Alignment;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Style label attached to every paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleName {
    /// Large centered document title
    Title,
    /// Centered line under the title
    Subtitle,
    /// Section heading
    Heading,
    /// Step heading inside a section
    Subheading,
    /// Bold lead-in line ("iPhone Users:")
    Label,
    /// Running text
    #[default]
    Body,
    /// Monospaced panel for URLs
    Code,
    /// Small print
    Fine,
}

impl StyleName {
    /// All style names, in the order they are declared in `styles.xml`.
    pub const ALL: [StyleName; 8] = [
        StyleName::Body,
        StyleName::Title,
        StyleName::Subtitle,
        StyleName::Heading,
        StyleName::Subheading,
        StyleName::Label,
        StyleName::Code,
        StyleName::Fine,
    ];

    /// Word style identifier.
    pub fn docx_style_id(self) -> &'static str {
        match self {
            StyleName::Title => "Title",
            StyleName::Subtitle => "Subtitle",
            StyleName::Heading => "Heading1",
            StyleName::Subheading => "Heading2",
            StyleName::Label => "Heading3",
            StyleName::Body => "Normal",
            StyleName::Code => "Code",
            StyleName::Fine => "Fine",
        }
    }

    /// Human-readable style name shown in Word's style gallery.
    pub fn display_name(self) -> &'static str {
        match self {
            StyleName::Title => "Title",
            StyleName::Subtitle => "Subtitle",
            StyleName::Heading => "heading 1",
            StyleName::Subheading => "heading 2",
            StyleName::Label => "heading 3",
            StyleName::Body => "Normal",
            StyleName::Code => "Code",
            StyleName::Fine => "Fine Print",
        }
    }

    /// Whether paragraphs with this style count as headings.
    pub fn is_heading(self) -> bool {
        matches!(
            self,
            StyleName::Title | StyleName::Heading | StyleName::Subheading | StyleName::Label
        )
    }
}

/// Font families available as PDF base-14 fonts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Proportional sans-serif
    #[default]
    Helvetica,
    /// Monospace
    Courier,
}

impl FontFamily {
    /// PDF base font name for the given weight and slant.
    pub fn base_font(self, bold: bool, italic: bool) -> &'static str {
        match (self, bold, italic) {
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }

    /// Font name used in Word documents.
    pub fn docx_name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Courier => "Courier New",
        }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component
    pub r: u8,
    /// Green component
    pub g: u8,
    /// Blue component
    pub b: u8,
}

impl Color {
    /// Create a color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase hex without the leading `#`, as Word expects.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Components scaled to 0.0..=1.0 for PDF color operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Concrete formatting for one named style. All lengths are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDef {
    /// Font family
    pub font: FontFamily,
    /// Bold weight
    pub bold: bool,
    /// Italic slant
    pub italic: bool,
    /// Font size
    pub size: f32,
    /// Baseline-to-baseline distance
    pub leading: f32,
    /// Text color
    pub color: Color,
    /// Paragraph alignment
    pub alignment: Alignment,
    /// Space above the paragraph (dropped at the top of a page)
    pub space_before: f32,
    /// Space below the paragraph
    pub space_after: f32,
    /// Left indent
    pub left_indent: f32,
    /// Right indent
    pub right_indent: f32,
    /// Panel color drawn behind the paragraph
    pub background: Option<Color>,
    /// Padding between the panel edge and the text
    pub border_padding: f32,
}

impl StyleDef {
    /// Body text defaults.
    pub fn body() -> Self {
        Self {
            font: FontFamily::Helvetica,
            bold: false,
            italic: false,
            size: 11.0,
            leading: 16.0,
            color: Color::rgb(0x2a, 0x2a, 0x2a),
            alignment: Alignment::Left,
            space_before: 0.0,
            space_after: 6.0,
            left_indent: 0.0,
            right_indent: 0.0,
            background: None,
            border_padding: 0.0,
        }
    }
}

/// Maps style labels to their formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSheet {
    styles: HashMap<StyleName, StyleDef>,
}

impl StyleSheet {
    /// Look up a style. Labels missing from the sheet fall back to body text.
    pub fn get(&self, name: StyleName) -> StyleDef {
        self.styles
            .get(&name)
            .or_else(|| self.styles.get(&StyleName::Body))
            .cloned()
            .unwrap_or_else(StyleDef::body)
    }

    /// Replace the definition of a style.
    pub fn set(&mut self, name: StyleName, def: StyleDef) {
        self.styles.insert(name, def);
    }

    /// Iterate styles in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (StyleName, StyleDef)> + '_ {
        StyleName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        let body = StyleDef::body();
        let ink = Color::rgb(0x1a, 0x1a, 0x1a);
        let accent = Color::rgb(0x25, 0x63, 0xeb);

        let mut styles = HashMap::new();
        styles.insert(
            StyleName::Title,
            StyleDef {
                bold: true,
                size: 28.0,
                leading: 34.0,
                color: ink,
                alignment: Alignment::Center,
                space_after: 12.0,
                ..body.clone()
            },
        );
        styles.insert(
            StyleName::Subtitle,
            StyleDef {
                size: 16.0,
                leading: 20.0,
                color: Color::rgb(0x4a, 0x4a, 0x4a),
                alignment: Alignment::Center,
                space_after: 20.0,
                ..body.clone()
            },
        );
        styles.insert(
            StyleName::Heading,
            StyleDef {
                bold: true,
                size: 18.0,
                leading: 22.0,
                color: accent,
                space_before: 20.0,
                space_after: 12.0,
                ..body.clone()
            },
        );
        styles.insert(
            StyleName::Subheading,
            StyleDef {
                bold: true,
                size: 14.0,
                leading: 18.0,
                color: ink,
                space_before: 12.0,
                space_after: 8.0,
                ..body.clone()
            },
        );
        styles.insert(
            StyleName::Label,
            StyleDef {
                bold: true,
                ..body.clone()
            },
        );
        styles.insert(
            StyleName::Code,
            StyleDef {
                font: FontFamily::Courier,
                size: 9.0,
                color: accent,
                left_indent: 20.0,
                right_indent: 20.0,
                background: Some(Color::rgb(0xf3, 0xf4, 0xf6)),
                border_padding: 10.0,
                ..body.clone()
            },
        );
        styles.insert(
            StyleName::Fine,
            StyleDef {
                size: 9.0,
                leading: 12.0,
                color: Color::rgb(0x4a, 0x4a, 0x4a),
                alignment: Alignment::Center,
                ..body.clone()
            },
        );
        styles.insert(StyleName::Body, body);

        Self { styles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse() {
        let c = Color::from_hex("#2563eb").unwrap();
        assert_eq!(c, Color::rgb(0x25, 0x63, 0xeb));
        assert_eq!(c.to_hex(), "2563EB");
        assert_eq!(c.to_string(), "#2563eb");

        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 16)).unwrap();
        assert_eq!(json, "\"#ff0010\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(255, 0, 16));
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(FontFamily::Helvetica.base_font(true, false), "Helvetica-Bold");
        assert_eq!(FontFamily::Courier.base_font(false, true), "Courier-Oblique");
    }

    #[test]
    fn test_default_sheet() {
        let sheet = StyleSheet::default();
        let title = sheet.get(StyleName::Title);
        assert_eq!(title.size, 28.0);
        assert_eq!(title.alignment, Alignment::Center);

        let code = sheet.get(StyleName::Code);
        assert_eq!(code.font, FontFamily::Courier);
        assert!(code.background.is_some());

        assert_eq!(sheet.iter().count(), StyleName::ALL.len());
    }
}
