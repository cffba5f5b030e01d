//! macOS shell built on AppKit, WebKit and Carbon via objc2.
//!
//! - `ffi`: bridge helpers plus Carbon and WebKit declarations
//! - `app`: the host object and the state its callbacks share
//! - `handlers`: event dispatch and effect execution
//! - `input`: Carbon hotkey, NSEvent monitors, system observers
//! - `ui`: status bar, overlay window, web views, settings, hotkey capture

pub mod app;
pub mod ffi;
pub mod handlers;
pub mod input;
pub mod ui;

pub use app::{install_state, register_and_create_host, HostState};
pub use ffi::bridge;
