//! Application events for inter-module communication.
//!
//! These events represent everything the overlay reacts to: hotkeys, menu
//! items, keyboard shortcuts, selector clicks and configuration changes.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use crate::model::{HotkeyDescriptor, KeyInput, ServiceDefinition};

/// Application-level events for decoupled communication between modules.
///
/// Events flow from producers (Carbon hotkey, NSEvent monitors, menu,
/// settings editor, observers) through the EventBus to the dispatcher,
/// which feeds them to `OverlayController::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    // === Input Events ===
    /// The global toggle hotkey fired.
    GlobalHotkey,

    /// Key-down while the overlay is the key window.
    Key(KeyInput),

    /// A status bar menu item was chosen.
    Menu(MenuCommand),

    /// Segment clicked in the service selector.
    ServiceSelected(usize),

    /// Segment clicked in the session selector.
    SlotSelected(usize),

    // === Configuration Events ===
    /// The settings editor persisted a new service list.
    ServicesChanged(Vec<ServiceDefinition>),

    /// The capture prompt recorded a new toggle hotkey.
    HotkeyRecorded(HotkeyDescriptor),

    // === UI Lifecycle Events ===
    /// Settings window dismissed by the user (close button, Escape, Cmd+,).
    SettingsClosed,

    /// The overlay is no longer on screen (app hidden or deactivated).
    AppDeactivated,

    /// A clicked link was diverted to the default browser.
    LinkActivated(String),

    // === System Events ===
    /// Hotkeys need to be re-armed (after sleep/wake, space change, etc.)
    ReinstallHotkeys,
}

impl AppEvent {
    /// Returns true if this event should re-arm the global hotkey.
    pub fn requires_hotkey_reinstall(&self) -> bool {
        matches!(self, AppEvent::ReinstallHotkeys | AppEvent::HotkeyRecorded(_))
    }

    /// Returns a human-readable description of the event for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            AppEvent::GlobalHotkey => "Global hotkey pressed",
            AppEvent::Key(_) => "Key pressed in overlay",
            AppEvent::Menu(_) => "Status bar menu item chosen",
            AppEvent::ServiceSelected(_) => "Service segment selected",
            AppEvent::SlotSelected(_) => "Session segment selected",
            AppEvent::ServicesChanged(_) => "Service list changed",
            AppEvent::HotkeyRecorded(_) => "New hotkey recorded",
            AppEvent::SettingsClosed => "Settings window closed",
            AppEvent::AppDeactivated => "Overlay left the screen",
            AppEvent::LinkActivated(_) => "Link diverted to browser",
            AppEvent::ReinstallHotkeys => "Reinstall hotkeys",
        }
    }
}

/// Status bar menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    Show,
    Hide,
    Settings,
    ToggleInspector,
    ClearWebCache,
    SetNewHotkey,
    InstallAtLogin,
    UninstallFromLogin,
    Quit,
}

impl MenuCommand {
    /// Menu layout; `None` marks a separator.
    pub const LAYOUT: [Option<MenuCommand>; 12] = [
        Some(Self::Show),
        Some(Self::Hide),
        None,
        Some(Self::Settings),
        Some(Self::ToggleInspector),
        Some(Self::ClearWebCache),
        None,
        Some(Self::SetNewHotkey),
        Some(Self::InstallAtLogin),
        Some(Self::UninstallFromLogin),
        None,
        Some(Self::Quit),
    ];

    pub const ALL: [MenuCommand; 9] = [
        Self::Show,
        Self::Hide,
        Self::Settings,
        Self::ToggleInspector,
        Self::ClearWebCache,
        Self::SetNewHotkey,
        Self::InstallAtLogin,
        Self::UninstallFromLogin,
        Self::Quit,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Show => "Show Quiper",
            Self::Hide => "Hide Quiper",
            Self::Settings => "Settings",
            Self::ToggleInspector => crate::model::SHOW_INSPECTOR_TITLE,
            Self::ClearWebCache => "Clear Web Cache",
            Self::SetNewHotkey => "Set New Hotkey",
            Self::InstallAtLogin => "Install at Login",
            Self::UninstallFromLogin => "Uninstall from Login",
            Self::Quit => "Quit",
        }
    }

    /// Key equivalent shown next to the item (with Command).
    pub fn key_equivalent(self) -> &'static str {
        match self {
            Self::Hide => "h",
            Self::Settings => ",",
            Self::ToggleInspector => "i",
            Self::Quit => "q",
            _ => "",
        }
    }

    /// Integer stored in the `NSMenuItem` tag.
    pub fn tag(self) -> isize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0) as isize
    }

    pub fn from_tag(tag: isize) -> Option<Self> {
        usize::try_from(tag).ok().and_then(|i| Self::ALL.get(i).copied())
    }
}
