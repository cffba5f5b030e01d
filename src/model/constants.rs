//! Application constants and default values.
//!
//! This module contains window geometry, file names, key codes and the
//! modifier bit layouts shared by the pure core and the macOS shell.

// === Identity ===

/// Display name used for menus, the settings directory and the launch agent.
pub const APP_NAME: &str = "Quiper";

/// Service selected at startup when it is configured.
pub const DEFAULT_SERVICE: &str = "Grok";

/// Referrer appended to the service URLs of the built-in templates.
pub const REFERRER: &str = "https://github.io/sassanh/quiper";

/// User agent reported by every web view.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

// === Overlay Window Geometry ===

/// Initial overlay frame: (x, y, width, height).
pub const WINDOW_FRAME: (f64, f64, f64, f64) = (500.0, 200.0, 550.0, 620.0);

/// Corner radius of the borderless overlay.
pub const WINDOW_CORNER_RADIUS: f64 = 15.0;

/// Height of the drag strip along the top edge of the overlay.
pub const DRAGGABLE_AREA_HEIGHT: f64 = 30.0;

/// Padding between the chrome controls.
pub const UI_PADDING: f64 = 5.0;

/// Autosave name so AppKit remembers where the user left the overlay.
pub const WINDOW_FRAME_AUTOSAVE_NAME: &str = "QuiperOverlayFrame";

/// Settings window size (width, height).
pub const SETTINGS_WINDOW_SIZE: (f64, f64) = (720.0, 420.0);

// === Sessions ===

/// Number of session slots per service (indices 0..=9).
pub const SLOT_COUNT: usize = 10;

/// Slot index selected for a service that has never been switched.
pub const DEFAULT_SLOT_INDEX: u8 = 1;

// === Files ===

/// Environment variable that relocates every file the app reads or writes.
pub const HOME_ENV: &str = "QUIPER_HOME";

/// Environment variable holding the tracing level (`error` .. `trace`).
pub const LOG_LEVEL_ENV: &str = "QUIPER_LOG";

/// Service list file, under the user's config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Hotkey preference file, next to the log file.
pub const HOTKEY_FILE_NAME: &str = "hotkey_config.json";

/// Log file name.
pub const LOG_FILE_NAME: &str = "quiper.log";

/// Directory name used under `~/Library/Logs`.
pub const LOG_DIR_NAME: &str = "quiper";

// === Hotkey Capture ===

/// Seconds the capture prompt stays on screen after a key was recorded.
pub const HOTKEY_CAPTURE_DISMISS_SECS: f64 = 1.5;

/// Prompt shown while waiting for the new hotkey.
pub const HOTKEY_CAPTURE_PROMPT: &str = "Press the new hotkey combination.";

/// Placeholder shown until a key is pressed.
pub const HOTKEY_CAPTURE_PLACEHOLDER: &str = "Waiting for key press...";

// === NSEvent Modifier Flags ===

pub const NS_SHIFT_FLAG: u64 = 1 << 17;
pub const NS_CONTROL_FLAG: u64 = 1 << 18;
pub const NS_OPTION_FLAG: u64 = 1 << 19;
pub const NS_COMMAND_FLAG: u64 = 1 << 20;

/// Mask of the device-independent modifier bits.
pub const NS_DEVICE_INDEPENDENT_FLAGS_MASK: u64 = 0xFFFF_0000;

// === Carbon Modifier Masks ===

pub const CARBON_CMD_KEY: u32 = 1 << 8;
pub const CARBON_SHIFT_KEY: u32 = 1 << 9;
pub const CARBON_OPTION_KEY: u32 = 1 << 11;
pub const CARBON_CONTROL_KEY: u32 = 1 << 12;

// === ANSI Virtual Key Codes ===

pub const KC_A: u16 = 0;
pub const KC_H: u16 = 4;
pub const KC_X: u16 = 7;
pub const KC_C: u16 = 8;
pub const KC_V: u16 = 9;
pub const KC_Y: u16 = 16;
pub const KC_Z: u16 = 6;
pub const KC_Q: u16 = 12;
pub const KC_I: u16 = 34;
pub const KC_COMMA: u16 = 43;
pub const KC_SPACE: u16 = 49;
pub const KC_ESCAPE: u16 = 53;

// === Default Hotkey ===

/// Option + Space.
pub const DEFAULT_HOTKEY_FLAGS: u64 = NS_OPTION_FLAG;
pub const DEFAULT_HOTKEY_KEY: u16 = KC_SPACE;

// === Inspector Menu Titles ===

pub const SHOW_INSPECTOR_TITLE: &str = "Show Inspector";
pub const HIDE_INSPECTOR_TITLE: &str = "Hide Inspector";

// === Login Item Messages ===

pub const INSTALLED_MESSAGE: &str =
    "Installed as startup app. To uninstall, run: quiper --uninstall";
pub const UNINSTALLED_MESSAGE: &str = "Uninstalled startup app.";
pub const NOT_INSTALLED_MESSAGE: &str = "Startup app not found.";
