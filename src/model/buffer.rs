//! Row store - the ordered lines of the document
//!
//! Every content change re-renders the touched row and re-highlights it.
//! When a row's block comment exit state changes, highlighting continues
//! forward row by row until the state stabilises (an explicit loop, so a
//! comment opened at the top of a large file cannot grow the stack).

use std::ops::Range;
use std::sync::Arc;

use super::row::Row;
use crate::syntax::{Highlight, SyntaxRules};
use crate::util::{find_bytes, is_whole_word, TABULATOR_WIDTH};

/// The document as a vector of rows
#[derive(Debug, Clone)]
pub struct Buffer {
    rows: Vec<Row>,
    /// Number of modifications since the last save/load
    dirty: usize,
    tab_stop: usize,
    syntax: Option<Arc<SyntaxRules>>,
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(TABULATOR_WIDTH)
    }
}

impl Buffer {
    /// Create an empty buffer
    pub fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            tab_stop: tab_stop.max(1),
            syntax: None,
        }
    }

    /// Build a buffer from file contents.
    ///
    /// Lines are split on `\n` with a trailing `\r` stripped; a final line
    /// terminator does not produce an extra empty row.
    pub fn from_bytes(bytes: &[u8], tab_stop: usize) -> Self {
        let mut lines: Vec<&[u8]> = bytes.split(|&b| b == b'\n').collect();
        if lines.last().is_some_and(|last| last.is_empty()) {
            lines.pop();
        }

        let mut buffer = Self::new(tab_stop);
        buffer.rows = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                Row::new(index, line.to_vec())
            })
            .collect();
        buffer.rerender_all();
        buffer
    }

    /// Convenience constructor from text, using the default tab stop
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes(), TABULATOR_WIDTH)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Length of row `at`, or 0 past the end of the buffer
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        self.tab_stop = tab_stop.max(1);
        self.rerender_all();
    }

    pub fn syntax(&self) -> Option<&Arc<SyntaxRules>> {
        self.syntax.as_ref()
    }

    /// Switch highlighting rules and re-highlight the whole buffer
    pub fn set_syntax(&mut self, syntax: Option<Arc<SyntaxRules>>) {
        self.syntax = syntax;
        self.rehighlight_all();
    }

    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn mark_dirty(&mut self) {
        self.dirty += 1;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    // =========================================================================
    // Row operations
    // =========================================================================

    /// Insert a row before `at` (clamped to `0..=len`)
    pub fn insert_row(&mut self, at: usize, text: &[u8]) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(at, text.to_vec()));
        self.renumber_from(at + 1);
        self.update_row(at);
        self.dirty += 1;
    }

    /// Remove row `at`; out-of-range indices are ignored
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.renumber_from(at);
        self.revalidate(at);
        self.dirty += 1;
    }

    /// Insert a byte into row `row` at column `at` (clamped to the row length)
    pub fn insert_char(&mut self, row: usize, at: usize, ch: u8) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let at = at.min(r.text.len());
        r.text.insert(at, ch);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Delete the byte at column `at`; no-op when out of range
    pub fn delete_char(&mut self, row: usize, at: usize) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        if at >= r.text.len() {
            return;
        }
        r.text.remove(at);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Append bytes to the end of row `row`
    pub fn append_bytes(&mut self, row: usize, bytes: &[u8]) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.text.extend_from_slice(bytes);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Cut row `row` at column `at`, returning the removed tail
    pub fn truncate_row(&mut self, row: usize, at: usize) -> Vec<u8> {
        let Some(r) = self.rows.get_mut(row) else {
            return Vec::new();
        };
        let at = at.min(r.text.len());
        let tail = r.text.split_off(at);
        self.update_row(row);
        self.dirty += 1;
        tail
    }

    /// Split row `row` at column `at` into two rows
    pub fn split_row(&mut self, row: usize, at: usize) {
        if row >= self.rows.len() {
            return;
        }
        let tail = self.truncate_row(row, at);
        self.insert_row(row + 1, &tail);
    }

    /// Replace `len` bytes at column `at` with `replacement`
    pub fn replace_range(&mut self, row: usize, at: usize, len: usize, replacement: &[u8]) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        if at > r.text.len() || at + len > r.text.len() {
            return;
        }
        r.text.splice(at..at + len, replacement.iter().copied());
        self.update_row(row);
        self.dirty += 1;
    }

    /// Move one row from `from` to `to`, shifting the rows in between
    pub fn move_row(&mut self, from: usize, to: usize) {
        if from >= self.rows.len() || to >= self.rows.len() || from == to {
            return;
        }
        let row = self.rows.remove(from);
        self.rows.insert(to, row);

        let (lo, hi) = (from.min(to), from.max(to));
        for i in lo..=hi {
            self.rows[i].index = i;
        }
        self.highlight_span(lo, hi);
        self.dirty += 1;
    }

    /// Replace every row (snapshot restore)
    pub fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.renumber_from(0);
        self.rerender_all();
    }

    /// Remove all rows and reset the modification counter
    pub fn clear(&mut self) {
        self.rows.clear();
        self.dirty = 0;
    }

    // =========================================================================
    // Whole-word replace
    // =========================================================================

    /// Count whole-word occurrences of `needle` across all rows
    pub fn count_occurrences(&self, needle: &[u8]) -> usize {
        self.rows
            .iter()
            .map(|row| whole_word_matches(&row.text, needle).count())
            .sum()
    }

    /// Replace every whole-word occurrence of `needle`, returning the count.
    ///
    /// Scanning resumes after the inserted text so a replacement that
    /// contains the needle is never matched again.
    pub fn replace_all(&mut self, needle: &[u8], replacement: &[u8]) -> usize {
        if needle.is_empty() {
            return 0;
        }
        let mut total = 0;
        for at in 0..self.rows.len() {
            let mut from = 0;
            let mut replaced = 0;
            while let Some(pos) = find_bytes(&self.rows[at].text, needle, from) {
                if !is_whole_word(&self.rows[at].text, pos, needle.len()) {
                    from = pos + 1;
                    continue;
                }
                self.rows[at]
                    .text
                    .splice(pos..pos + needle.len(), replacement.iter().copied());
                from = pos + replacement.len();
                replaced += 1;
            }
            if replaced > 0 {
                self.update_row(at);
                self.dirty += replaced;
                total += replaced;
            }
        }
        total
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Rows joined by `\n`, with a trailing `\n` after the last row
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(&row.text);
            out.push(b'\n');
        }
        out
    }

    /// Row texts as lossy UTF-8 strings
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| String::from_utf8_lossy(&r.text).into_owned())
            .collect()
    }

    // =========================================================================
    // Highlighting
    // =========================================================================

    /// Paint an overlay class over render columns of a row
    pub fn paint(&mut self, row: usize, render_cols: Range<usize>, class: Highlight) {
        if let Some(r) = self.rows.get_mut(row) {
            r.paint(render_cols, class);
        }
    }

    /// Re-highlight rows to drop overlays; content is unchanged so the
    /// comment state cannot change and nothing propagates.
    pub fn refresh_highlight(&mut self, rows: Range<usize>) {
        let end = rows.end.min(self.rows.len());
        for at in rows.start..end {
            let r = &mut self.rows[at];
            if r.has_overlay() {
                let entry = r.open_comment_at_start;
                r.update_highlight(entry, self.syntax.as_deref());
            }
        }
    }

    pub fn rehighlight_all(&mut self) {
        let mut open = false;
        for row in &mut self.rows {
            open = row.update_highlight(open, self.syntax.as_deref());
        }
    }

    fn rerender_all(&mut self) {
        for row in &mut self.rows {
            row.update_render(self.tab_stop);
        }
        self.rehighlight_all();
    }

    fn renumber_from(&mut self, start: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(start) {
            row.index = i;
        }
    }

    fn update_row(&mut self, at: usize) {
        if let Some(row) = self.rows.get_mut(at) {
            row.update_render(self.tab_stop);
            self.highlight_span(at, at);
        }
    }

    /// Re-highlight row `at` if its entry state no longer matches
    fn revalidate(&mut self, at: usize) {
        let Some(row) = self.rows.get(at) else {
            return;
        };
        let entry = at > 0 && self.rows[at - 1].open_comment_at_end;
        if row.open_comment_at_start != entry {
            self.highlight_span(at, at);
        }
    }

    /// Highlight rows `lo..=hi`, then keep going while the next row was
    /// highlighted with a different entry state than the one it now gets.
    fn highlight_span(&mut self, lo: usize, hi: usize) {
        let mut at = lo;
        while at < self.rows.len() {
            let entry = at > 0 && self.rows[at - 1].open_comment_at_end;
            let exit = self.rows[at].update_highlight(entry, self.syntax.as_deref());
            if at >= hi {
                match self.rows.get(at + 1) {
                    Some(next) if next.open_comment_at_start != exit => {}
                    _ => break,
                }
            }
            at += 1;
        }
    }
}

/// Start offsets of whole-word matches, skipping past each accepted match
fn whole_word_matches<'a>(text: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    let mut from = 0;
    std::iter::from_fn(move || {
        while let Some(pos) = find_bytes(text, needle, from) {
            if is_whole_word(text, pos, needle.len()) {
                from = pos + needle.len();
                return Some(pos);
            }
            from = pos + 1;
        }
        None
    })
}
