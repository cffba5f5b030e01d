//! Settings window: the editable service table.
//!
//! - [`window`]: window construction, show and hide
//! - [`table`]: data source, inline edits, drag reordering, add/remove

pub mod table;
pub mod window;

pub use window::{hide_settings, show_settings};
