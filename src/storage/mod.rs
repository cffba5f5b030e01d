//! JSON persistence for the service list and the toggle hotkey.

pub mod config_store;
pub mod hotkey_store;
pub mod paths;

pub use config_store::ConfigStore;
pub use hotkey_store::HotkeyStore;
pub use paths::AppPaths;
