//! Utility functions for text editing
//!
//! Rows are stored as raw bytes, so everything here works on `&[u8]` and
//! byte-sized columns.

/// Default tab width for render column calculations
pub const TABULATOR_WIDTH: usize = 4;

/// Check if a byte separates words for keyword and whole-word matching
pub fn is_separator(ch: u8) -> bool {
    ch.is_ascii_whitespace() || ch == b'\0' || b",.()+-/*=~%<>[];".contains(&ch)
}

/// Check whether `text[pos..pos + len]` is bounded by separators (or line edges)
pub fn is_whole_word(text: &[u8], pos: usize, len: usize) -> bool {
    if pos > 0 && !is_separator(text[pos - 1]) {
        return false;
    }
    match text.get(pos + len) {
        Some(&right) => is_separator(right),
        None => true,
    }
}

/// Number of leading space bytes (tabs do not count)
pub fn leading_spaces(text: &[u8]) -> usize {
    text.iter().take_while(|&&b| b == b' ').count()
}

/// Find `needle` in `haystack` starting at byte `from`
pub fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from > haystack.len() || needle.len() > haystack.len() - from {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Width a tab occupies when it starts at render column `render_col`
#[inline]
fn tab_width_at(render_col: usize, tab_stop: usize) -> usize {
    tab_stop - (render_col % tab_stop)
}

/// Convert a character column to a render column (tab expansion).
///
/// Columns past the end of the row are treated as end-of-row.
pub fn char_to_render(text: &[u8], char_col: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut render_col = 0;

    for &ch in text.iter().take(char_col) {
        if ch == b'\t' {
            render_col += tab_width_at(render_col, tab_stop);
        } else {
            render_col += 1;
        }
    }

    render_col
}

/// Convert a render column back to a character column.
///
/// Returns the index of the character whose cell contains `render_col`, so a
/// position inside an expanded tab maps to the tab itself. Render columns past
/// the end of the row map to the row length.
pub fn render_to_char(text: &[u8], render_col: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut current = 0;

    for (char_col, &ch) in text.iter().enumerate() {
        if ch == b'\t' {
            current += tab_width_at(current, tab_stop);
        } else {
            current += 1;
        }
        if current > render_col {
            return char_col;
        }
    }

    text.len()
}

/// Expand tabs to spaces, aligning to `tab_stop`
pub fn expand_tabs(text: &[u8], tab_stop: usize) -> Vec<u8> {
    let tab_stop = tab_stop.max(1);
    let tabs = text.iter().filter(|&&b| b == b'\t').count();
    let mut rendered = Vec::with_capacity(text.len() + tabs * (tab_stop - 1));

    for &ch in text {
        if ch == b'\t' {
            rendered.push(b' ');
            while rendered.len() % tab_stop != 0 {
                rendered.push(b' ');
            }
        } else {
            rendered.push(ch);
        }
    }

    rendered
}
