//! Application domain model.
//!
//! This module contains pure types (no FFI dependencies): service
//! definitions and templates, session slot indices, hotkey descriptors,
//! key input and the navigation policy.

pub mod constants;
pub mod hotkey;
pub mod keys;
pub mod service;
pub mod slot;
pub mod web;

pub use constants::*;
pub use hotkey::{HotkeyDescriptor, Modifiers};
pub use keys::{EditCommand, KeyInput};
pub use service::{ServiceDefinition, ServiceField, ServiceId, ServiceTemplate};
pub use slot::SlotIndex;
pub use web::{NavigationKind, NavigationPolicy};
