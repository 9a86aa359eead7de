//! Utility modules

pub mod file_io;
pub mod text;

pub use file_io::{
    filename_for_display, is_likely_binary, read_document, validate_file_for_opening,
    write_document, FileOpenError, MAX_FILE_SIZE,
};
pub use text::{
    char_to_render, expand_tabs, find_bytes, is_separator, is_whole_word, leading_spaces,
    render_to_char, TABULATOR_WIDTH,
};
