//! Syntax highlighting module
//!
//! Provides rule-driven, incremental highlighting with:
//! - Rule records loaded from JSON files (one per language)
//! - Language selection from the file name
//! - A per-row scanner whose only cross-row state is an open block comment
//!
//! ## Architecture
//!
//! ```text
//! Row edit → Buffer::update_row → highlight_line(row, entry state)
//!          → exit state changed? → next row, until stable
//! ```

mod highlight;
mod rules;

pub use highlight::{highlight_line, Highlight};
pub use rules::{HighlightFlags, Keyword, SyntaxRegistry, SyntaxRules};
