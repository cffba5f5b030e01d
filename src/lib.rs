#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! Quiper: web chat services in a floating overlay behind one hotkey.
//!
//! Everything outside `platform` is pure Rust without FFI so the state
//! machine, stores and editor run as normal tests on any host. Only
//! `platform::macos` talks to AppKit, WebKit and Carbon.

pub mod cli;
pub mod controller;
pub mod error;
pub mod events;
pub mod launcher;
pub mod logging;
pub mod model;
pub mod session;
pub mod settings;
pub mod storage;

#[cfg(target_os = "macos")]
pub mod platform;

pub use controller::{Effect, OverlayController, SelectorState, WindowState};
pub use events::{AppEvent, EventBus, EventPublisher, MenuCommand};
pub use model::{HotkeyDescriptor, KeyInput, Modifiers, ServiceDefinition, ServiceId, SlotIndex};
pub use session::{SessionMatrix, SlotKey, ViewCommand};
