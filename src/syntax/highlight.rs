//! Per-row highlight classification
//!
//! Each row is scanned left to right over its rendered bytes. The only state
//! carried between rows is whether a block comment is still open, which the
//! row store threads from one row to the next.

use super::rules::SyntaxRules;
use crate::util::is_separator;

/// Highlight class of one rendered byte
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    MlComment,
    Keyword1,
    Keyword2,
    String,
    Number,
    /// Current search match
    Match,
    /// Inside the active selection
    Selection,
}

impl Highlight {
    /// SGR color code used by the terminal renderer
    pub fn ansi_color(self) -> u8 {
        match self {
            Highlight::Comment | Highlight::MlComment => 36,
            Highlight::Keyword1 => 33,
            Highlight::Keyword2 => 32,
            Highlight::String => 35,
            Highlight::Number => 31,
            Highlight::Match => 34,
            Highlight::Selection => 7,
            Highlight::Normal => 37,
        }
    }

    /// Overlay classes are painted over a row and removed by re-highlighting it
    pub fn is_overlay(self) -> bool {
        matches!(self, Highlight::Match | Highlight::Selection)
    }
}

/// Classify the rendered bytes of one row.
///
/// `starts_in_comment` is the block comment state left open by the previous
/// row. Returns the classes (same length as `render`) and whether a block
/// comment is still open at the end of the row.
pub fn highlight_line(
    render: &[u8],
    starts_in_comment: bool,
    rules: &SyntaxRules,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; render.len()];

    let line_comment = rules.line_comment();
    let block_comment = rules.block_comment();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = starts_in_comment && block_comment.is_some();

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some(marker) = line_comment {
            if in_string.is_none() && !in_comment && render[i..].starts_with(marker) {
                hl[i..].fill(Highlight::Comment);
                break;
            }
        }

        if let Some((open, close)) = block_comment {
            if in_string.is_none() {
                if in_comment {
                    if render[i..].starts_with(close) {
                        hl[i..i + close.len()].fill(Highlight::MlComment);
                        i += close.len();
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        hl[i] = Highlight::MlComment;
                        i += 1;
                    }
                    continue;
                } else if render[i..].starts_with(open) {
                    hl[i..i + open.len()].fill(Highlight::MlComment);
                    i += open.len();
                    in_comment = true;
                    continue;
                }
            }
        }

        if rules.flags.strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if rules.flags.numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some(keyword) = rules.keyword_at(render, i) {
                let end = i + keyword.text.len();
                hl[i..end].fill(keyword.class);
                i = end;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}
