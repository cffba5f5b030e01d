//! Input handling.
//!
//! - hotkeys.rs: Carbon registration of the global toggle hotkey
//! - keyboard_monitors.rs: local key-down routing for overlay and settings
//! - mouse_monitors.rs: drag strip handling
//! - observers.rs: termination, wake, session and Space notifications

pub mod hotkeys;
pub mod keyboard_monitors;
pub mod mouse_monitors;
pub mod observers;

pub use hotkeys::{arm_hotkey, hotkey_event_handler, install_hotkey_handler, uninstall_hotkeys};
pub use keyboard_monitors::install_key_monitor;
pub use mouse_monitors::install_drag_monitor;
pub use observers::{install_termination_observer, install_wakeup_space_observers};
