//! A single line of the document with its rendered and highlighted forms

use std::ops::Range;

use crate::syntax::{highlight_line, Highlight, SyntaxRules};
use crate::util::{char_to_render, expand_tabs, render_to_char};

/// One line of text.
///
/// `render` is `text` with tabs expanded and `highlight` classifies each byte
/// of `render`; both are rebuilt by the owning [`Buffer`](super::Buffer)
/// whenever `text` changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub(super) index: usize,
    pub(super) text: Vec<u8>,
    render: Vec<u8>,
    highlight: Vec<Highlight>,
    /// Block comment state this row was last highlighted with
    pub(super) open_comment_at_start: bool,
    /// Block comment state left open for the next row
    pub(super) open_comment_at_end: bool,
}

impl Row {
    pub(super) fn new(index: usize, text: Vec<u8>) -> Self {
        Self {
            index,
            text,
            ..Self::default()
        }
    }

    /// Position of this row in the buffer
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw bytes (no line terminator)
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Bytes as displayed, tabs expanded
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Highlight class per rendered byte
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether a block comment is still open after this row
    pub fn open_comment(&self) -> bool {
        self.open_comment_at_end
    }

    pub fn char_to_render(&self, column: usize, tab_stop: usize) -> usize {
        char_to_render(&self.text, column, tab_stop)
    }

    pub fn render_to_char(&self, render_col: usize, tab_stop: usize) -> usize {
        render_to_char(&self.text, render_col, tab_stop)
    }

    pub(super) fn update_render(&mut self, tab_stop: usize) {
        self.render = expand_tabs(&self.text, tab_stop);
    }

    /// Re-classify the rendered bytes; returns the exit comment state
    pub(super) fn update_highlight(
        &mut self,
        starts_in_comment: bool,
        rules: Option<&SyntaxRules>,
    ) -> bool {
        self.open_comment_at_start = starts_in_comment;
        match rules {
            Some(rules) => {
                let (highlight, open) = highlight_line(&self.render, starts_in_comment, rules);
                self.highlight = highlight;
                self.open_comment_at_end = open;
            }
            None => {
                self.highlight = vec![Highlight::Normal; self.render.len()];
                self.open_comment_at_end = false;
            }
        }
        self.open_comment_at_end
    }

    /// Overwrite the class of a span of render columns (clamped to the row)
    pub(super) fn paint(&mut self, range: Range<usize>, class: Highlight) {
        let end = range.end.min(self.highlight.len());
        if range.start < end {
            self.highlight[range.start..end].fill(class);
        }
    }

    pub(super) fn has_overlay(&self) -> bool {
        self.highlight.iter().any(|h| h.is_overlay())
    }
}
