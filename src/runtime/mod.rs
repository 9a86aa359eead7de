//! Runtime module - drives the update loop for a front-end
//!
//! The terminal front-end owns raw mode, key decoding and drawing. It feeds
//! decoded keys into [`App`] and acts on the commands that come back.

pub mod app;

pub use app::App;
