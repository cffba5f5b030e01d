//! The floating overlay window.
//!
//! - [`window`]: borderless key-capable window, content and drag strip
//! - [`selectors`]: close button plus service and session selectors
//! - [`webviews`]: one `WKWebView` per session slot

pub mod selectors;
pub mod webviews;
pub mod window;

pub use window::{create_overlay_window, show_window};
