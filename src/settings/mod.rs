//! Settings editor model and settings window shortcuts.

pub mod editor;
pub mod keys;

pub use editor::{decode_row_indices, encode_row_indices, reorder_rows, SettingsEditor};
pub use keys::{settings_key_action, SettingsKeyAction};
