//! Session slots and the commands that drive their web views.

use crate::model::{ServiceId, SlotIndex};

/// Identifies one backing web view: a service and one of its ten slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub service: ServiceId,
    pub index: SlotIndex,
}

impl SlotKey {
    pub fn new(service: ServiceId, index: SlotIndex) -> Self {
        Self { service, index }
    }
}

/// Bookkeeping for one web view.
///
/// `loaded` means a load was started; completion is never tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSlot {
    loaded: bool,
    hidden: bool,
}

impl SessionSlot {
    /// Slots start hidden and unloaded.
    pub fn new() -> Self {
        Self {
            loaded: false,
            hidden: true,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    pub(crate) fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

impl Default for SessionSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Instruction for the web view host.
///
/// The session matrix never touches a view; it returns these and the
/// platform shell applies them in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    /// Create the (hidden, empty) web view for a slot.
    Create(SlotKey),
    /// Tear the web view down.
    Destroy(SlotKey),
    /// Start loading `url`; fire-and-forget.
    Load { key: SlotKey, url: String },
    SetHidden { key: SlotKey, hidden: bool },
    /// Give the view keyboard focus and focus the element matching `selector`.
    FocusInput { key: SlotKey, selector: String },
    OpenInspector(SlotKey),
    CloseInspector(SlotKey),
}

impl ViewCommand {
    /// The slot this command targets.
    pub fn key(&self) -> &SlotKey {
        match self {
            Self::Create(key)
            | Self::Destroy(key)
            | Self::OpenInspector(key)
            | Self::CloseInspector(key) => key,
            Self::Load { key, .. } | Self::SetHidden { key, .. } | Self::FocusInput { key, .. } => {
                key
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_is_hidden_and_unloaded() {
        let slot = SessionSlot::new();
        assert!(slot.is_hidden());
        assert!(!slot.is_loaded());
    }

    #[test]
    fn test_command_key() {
        let key = SlotKey::new(ServiceId::from("a"), SlotIndex::DEFAULT);
        let cmd = ViewCommand::Load {
            key: key.clone(),
            url: "https://a.example".into(),
        };
        assert_eq!(cmd.key(), &key);
        assert_eq!(ViewCommand::Destroy(key.clone()).key(), &key);
    }
}
