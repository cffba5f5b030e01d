//! FFI for the macOS shell.
//!
//! - `bridge`: objc2 aliases and helpers
//! - `carbon`: Carbon Event Manager (global hotkey)
//! - `webkit`: WebKit linkage and AppKit/WebKit enum values

pub mod bridge;
pub mod carbon;
pub mod webkit;

pub use carbon::*;
pub use webkit::*;
