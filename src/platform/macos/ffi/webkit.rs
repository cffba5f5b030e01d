//! WebKit linkage and the enum values the shell passes to it.
//!
//! WebKit classes are reached through `get_class`, so the framework only
//! has to be linked.

#[link(name = "WebKit", kind = "framework")]
extern "C" {}

/// `WKNavigationActionPolicyCancel`
pub const WK_NAVIGATION_POLICY_CANCEL: isize = 0;
/// `WKNavigationActionPolicyAllow`
pub const WK_NAVIGATION_POLICY_ALLOW: isize = 1;

// === AppKit values used across the shell ===

pub const NS_BACKING_STORE_BUFFERED: u64 = 2;
pub const NS_WINDOW_STYLE_BORDERLESS: u64 = 0;
pub const NS_WINDOW_STYLE_TITLED: u64 = 1 << 0;
pub const NS_WINDOW_STYLE_CLOSABLE: u64 = 1 << 1;
pub const NS_WINDOW_STYLE_RESIZABLE: u64 = 1 << 3;
pub const NS_FLOATING_WINDOW_LEVEL: isize = 3;
pub const NS_MODAL_PANEL_WINDOW_LEVEL: isize = 8;

pub const NS_COLLECTION_CAN_JOIN_ALL_SPACES: u64 = 1 << 0;
pub const NS_COLLECTION_MOVE_TO_ACTIVE_SPACE: u64 = 1 << 1;
pub const NS_COLLECTION_STATIONARY: u64 = 1 << 4;
pub const NS_COLLECTION_FULL_SCREEN_AUXILIARY: u64 = 1 << 8;

pub const NS_VIEW_WIDTH_SIZABLE: u64 = 1 << 1;
pub const NS_VIEW_HEIGHT_SIZABLE: u64 = 1 << 4;
pub const NS_VIEW_MIN_X_MARGIN: u64 = 1 << 0;
pub const NS_VIEW_MIN_Y_MARGIN: u64 = 1 << 3;

pub const NS_EVENT_MASK_LEFT_MOUSE_DOWN: u64 = 1 << 1;
pub const NS_EVENT_MASK_KEY_DOWN: u64 = 1 << 10;

pub const NS_ACTIVATION_POLICY_ACCESSORY: i64 = 1;
pub const NS_WINDOW_OCCLUSION_STATE_VISIBLE: u64 = 1 << 1;

pub const NS_DRAG_OPERATION_MOVE: u64 = 16;
pub const NS_TABLE_VIEW_DROP_ABOVE: u64 = 1;
