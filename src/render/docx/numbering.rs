//! List numbering definitions.
//!
//! Bulleted items share one numbering instance. Every ordered list gets its
//! own abstract numbering so that its counter starts where the list does.

use super::twips;
use crate::model::ListInfo;
use docx_rs::{
    AbstractNumbering, Docx, Level, LevelJc, LevelText, NumberFormat, Numbering,
    SpecialIndentType, Start,
};

const LIST_LEVELS: usize = 3;
/// Deepest list level declared per numbering instance.
pub const MAX_LIST_LEVEL: usize = LIST_LEVELS - 1;

const BULLETS: [&str; LIST_LEVELS] = ["\u{2022}", "\u{25e6}", "\u{25aa}"];

#[derive(Debug)]
pub struct ListNumbering {
    indent: f32,
    next_id: usize,
    bullets: Option<usize>,
    current_ordered: Option<usize>,
    definitions: Vec<(AbstractNumbering, Numbering)>,
}

impl ListNumbering {
    /// `indent` is the indent per nesting level, in points.
    pub fn new(indent: f32) -> Self {
        Self {
            indent,
            next_id: 1,
            bullets: None,
            current_ordered: None,
            definitions: Vec::new(),
        }
    }

    fn level(&self, level: usize, start: u32, format: &str, text: &str) -> Level {
        Level::new(
            level,
            Start::new(start as usize),
            NumberFormat::new(format),
            LevelText::new(text),
            LevelJc::new("left"),
        )
        .indent(
            Some(twips(self.indent * (level as f32 + 1.0))),
            Some(SpecialIndentType::Hanging(twips(self.indent))),
            None,
            None,
        )
    }

    fn define(&mut self, levels: Vec<Level>) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        let abstract_numbering = levels
            .into_iter()
            .fold(AbstractNumbering::new(id), |numbering, level| {
                numbering.add_level(level)
            });
        self.definitions
            .push((abstract_numbering, Numbering::new(id, id)));
        id
    }

    /// Numbering instance for a list item. Ordered items numbered 1 start a
    /// new list; later numbers continue the current one, or start a list at
    /// that number when none is open.
    pub fn num_id(&mut self, info: &ListInfo) -> usize {
        if !info.is_ordered() {
            if let Some(id) = self.bullets {
                return id;
            }
            let levels = (0..LIST_LEVELS)
                .map(|i| self.level(i, 1, "bullet", BULLETS[i]))
                .collect();
            let id = self.define(levels);
            self.bullets = Some(id);
            return id;
        }

        let start = info.item_number.unwrap_or(1);
        match self.current_ordered {
            Some(id) if start != 1 => id,
            _ => {
                let levels = (0..LIST_LEVELS)
                    .map(|i| {
                        let first = if i == 0 { start } else { 1 };
                        self.level(i, first, "decimal", &format!("%{}.", i + 1))
                    })
                    .collect();
                let id = self.define(levels);
                self.current_ordered = Some(id);
                id
            }
        }
    }

    /// Number of numbering instances defined so far.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn add_to(self, docx: Docx) -> Docx {
        self.definitions
            .into_iter()
            .fold(docx, |docx, (abstract_numbering, numbering)| {
                docx.add_abstract_numbering(abstract_numbering)
                    .add_numbering(numbering)
            })
    }
}
