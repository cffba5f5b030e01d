//! AppKit user interface.
//!
//! - `status_bar`: menu bar item and its menu
//! - `overlay`: the floating window, selector chrome and web views
//! - `settings`: service list editor window
//! - `hotkey_capture`: prompt that records a new toggle hotkey

pub mod hotkey_capture;
pub mod overlay;
pub mod settings;
pub mod status_bar;

pub use overlay::create_overlay_window;
pub use status_bar::install_status_bar;
