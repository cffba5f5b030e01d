//! Platform shell.
//!
//! The only platform Quiper targets is macOS; everything here is compiled
//! for `target_os = "macos"` only and drives the pure core in the rest of
//! the crate.

pub mod macos;

pub use macos::*;
