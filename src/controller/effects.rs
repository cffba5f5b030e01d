//! Side effects requested by the controller.

use crate::model::{EditCommand, HotkeyDescriptor};
use crate::session::ViewCommand;

/// What the selector chrome should display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorState {
    /// Service names in configuration order.
    pub labels: Vec<String>,
    pub selected_service: Option<usize>,
    /// Segment of the active slot (`SlotIndex::segment`).
    pub selected_slot: Option<usize>,
}

/// One instruction for the platform shell, executed in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    View(ViewCommand),
    /// Bring the overlay to the front and make it key.
    ShowWindow,
    /// Hide the application, giving focus back to the previous app.
    HideApp,
    ShowSettings,
    HideSettings,
    Terminate,
    /// Forward an edit action to the focused control.
    Edit(EditCommand),
    /// Wipe cookies and caches of the shared web data store.
    ClearWebsiteData,
    BeginHotkeyCapture,
    /// (Re)register the global toggle hotkey.
    ArmHotkey(HotkeyDescriptor),
    PersistHotkey(HotkeyDescriptor),
    InstallLoginItem,
    UninstallLoginItem,
    SyncSelectors(SelectorState),
    SetInspectorMenuTitle(&'static str),
    OpenExternal(String),
}

impl From<ViewCommand> for Effect {
    fn from(command: ViewCommand) -> Self {
        Effect::View(command)
    }
}
