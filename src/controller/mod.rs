//! Overlay window controller: events in, effects out.
//!
//! - [`overlay`]: `OverlayController` and the window lifecycle
//! - [`keymap`]: overlay keyboard shortcuts
//! - [`effects`]: `Effect` and `SelectorState`

pub mod effects;
pub mod keymap;
pub mod overlay;

pub use effects::{Effect, SelectorState};
pub use keymap::{route_overlay_key, KeyAction};
pub use overlay::{OverlayController, WindowState};
