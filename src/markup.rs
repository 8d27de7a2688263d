//! Inline mini-markup for literal content.
//!
//! Content is written with a tiny tag vocabulary so a line like
//! `Tap <b>"Sync Now"</b>` stays readable in source:
//!
//! - `<b>…</b>` bold, `<i>…</i>` italic (nestable)
//! - `<a href="…">…</a>` hyperlink
//! - `&nbsp; &amp; &lt; &gt; &quot;` entities
//!
//! Anything else is kept as literal text.

use crate::model::{InlineContent, TextRun, TextStyle};
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Parses markup strings into inline content.
#[derive(Debug)]
pub struct MarkupParser {
    token_regex: Regex,
}

impl MarkupParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            token_regex: Regex::new(
                r#"<(/?)(b|i|a)(?:\s+href\s*=\s*"([^"]*)")?\s*>|&(nbsp|amp|lt|gt|quot);"#,
            )
            .unwrap(),
        }
    }

    /// Parse markup into inline content.
    pub fn parse(&self, source: &str) -> Vec<InlineContent> {
        let mut state = ParseState::default();
        let mut last = 0;

        for caps in self.token_regex.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            state.text.push_str(&source[last..whole.start()]);
            last = whole.end();

            if let Some(entity) = caps.get(4) {
                state.text.push(match entity.as_str() {
                    "nbsp" => '\u{a0}',
                    "amp" => '&',
                    "lt" => '<',
                    "gt" => '>',
                    _ => '"',
                });
                continue;
            }

            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let tag = caps.get(2).map_or("", |m| m.as_str());
            match (tag, closing) {
                ("b", false) => {
                    state.flush();
                    state.bold += 1;
                }
                ("b", true) => {
                    state.flush();
                    state.bold = state.bold.saturating_sub(1);
                }
                ("i", false) => {
                    state.flush();
                    state.italic += 1;
                }
                ("i", true) => {
                    state.flush();
                    state.italic = state.italic.saturating_sub(1);
                }
                ("a", false) => {
                    state.flush();
                    state.href = caps.get(3).map(|m| m.as_str().to_string());
                }
                ("a", true) => {
                    state.flush();
                    state.href = None;
                }
                _ => state.text.push_str(whole.as_str()),
            }
        }

        state.text.push_str(&source[last..]);
        state.flush();
        state.content
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct ParseState {
    content: Vec<InlineContent>,
    text: String,
    bold: u32,
    italic: u32,
    href: Option<String>,
}

impl ParseState {
    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        match self.href {
            Some(ref url) => self.content.push(InlineContent::Link {
                text,
                url: url.clone(),
            }),
            None => self.content.push(InlineContent::Text(TextRun {
                text,
                style: TextStyle {
                    bold: self.bold > 0,
                    italic: self.italic > 0,
                    ..Default::default()
                },
            })),
        }
    }
}

/// Escape `&`, `<` and `>` so that `text` parses back as literal text.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Parse markup with a shared parser instance.
pub fn parse(source: &str) -> Vec<InlineContent> {
    static PARSER: OnceLock<MarkupParser> = OnceLock::new();
    PARSER.get_or_init(MarkupParser::new).parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(content: &[InlineContent]) -> Vec<(String, bool, bool)> {
        content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => (run.text.clone(), run.style.bold, run.style.italic),
                InlineContent::Link { text, .. } => (text.clone(), false, false),
                InlineContent::LineBreak => ("\n".into(), false, false),
            })
            .collect()
    }

    #[test]
    fn test_plain_text() {
        let content = parse("Install the app (it's free)");
        assert_eq!(
            runs(&content),
            vec![("Install the app (it's free)".to_string(), false, false)]
        );
    }

    #[test]
    fn test_bold_and_italic() {
        let content = parse("1. Open the <b>App Store</b> <i>now</i>");
        assert_eq!(
            runs(&content),
            vec![
                ("1. Open the ".to_string(), false, false),
                ("App Store".to_string(), true, false),
                (" ".to_string(), false, false),
                ("now".to_string(), false, true),
            ]
        );
    }

    #[test]
    fn test_nested_tags() {
        let content = parse("<b>bold <i>both</i></b>");
        assert_eq!(
            runs(&content),
            vec![
                ("bold ".to_string(), true, false),
                ("both".to_string(), true, true),
            ]
        );
    }

    #[test]
    fn test_entities() {
        let content = parse("&nbsp;&nbsp;Privacy &amp; Data &lt;3&gt; &quot;hi&quot;");
        assert_eq!(
            runs(&content),
            vec![("\u{a0}\u{a0}Privacy & Data <3> \"hi\"".to_string(), false, false)]
        );
    }

    #[test]
    fn test_link() {
        let content = parse(r#"Visit <a href="https://example.com">example.com</a> today"#);
        assert_eq!(content.len(), 3);
        assert_eq!(
            content[1],
            InlineContent::Link {
                text: "example.com".into(),
                url: "https://example.com".into(),
            }
        );
    }

    #[test]
    fn test_escape_reads_back_literally() {
        assert!(matches!(escape("Expo Go"), Cow::Borrowed("Expo Go")));

        let raw = "R&D <b>team</b> &lt;3";
        let content = parse(&format!("<b>{}</b>", escape(raw)));
        assert_eq!(runs(&content), vec![(raw.to_string(), true, false)]);
    }

    #[test]
    fn test_unknown_tags_are_literal() {
        let content = parse("a <u>b</u> c");
        assert_eq!(runs(&content), vec![("a <u>b</u> c".to_string(), false, false)]);
    }
}
