//! Keyboard input as seen by the controller.

use super::constants::*;
use super::hotkey::Modifiers;
use super::slot::SlotIndex;

/// A key-down event reduced to its physical key code and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key_code: u16,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key_code: u16, modifiers: Modifiers) -> Self {
        Self {
            key_code,
            modifiers,
        }
    }

    /// Builds an input from the raw `keyCode` / `modifierFlags` pair.
    pub fn from_event(key_code: u16, flags: u64) -> Self {
        Self::new(key_code, Modifiers::from_event_flags(flags))
    }

    /// Digit printed on the key, for the top-row number keys.
    pub fn digit(&self) -> Option<u8> {
        digit_for_key_code(self.key_code)
    }
}

/// Top-row digit for an ANSI key code.
pub fn digit_for_key_code(code: u16) -> Option<u8> {
    match code {
        29 => Some(0),
        18 => Some(1),
        19 => Some(2),
        20 => Some(3),
        21 => Some(4),
        23 => Some(5),
        22 => Some(6),
        26 => Some(7),
        28 => Some(8),
        25 => Some(9),
        _ => None,
    }
}

/// Slot selected by a digit key, if any.
pub fn slot_for_key_code(code: u16) -> Option<SlotIndex> {
    digit_for_key_code(code).and_then(SlotIndex::new)
}

/// Standard edit actions forwarded to whatever control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    SelectAll,
    Copy,
    Cut,
    Undo,
    Redo,
    Paste,
}

impl EditCommand {
    /// Edit command bound to Cmd+`key_code`.
    pub fn for_key_code(code: u16) -> Option<Self> {
        match code {
            KC_A => Some(Self::SelectAll),
            KC_C => Some(Self::Copy),
            KC_X => Some(Self::Cut),
            KC_Z => Some(Self::Undo),
            KC_Y => Some(Self::Redo),
            KC_V => Some(Self::Paste),
            _ => None,
        }
    }

    /// Responder-chain action selector.
    pub fn selector_name(self) -> &'static str {
        match self {
            Self::SelectAll => "selectAll:",
            Self::Copy => "copy:",
            Self::Cut => "cut:",
            Self::Undo => "undo:",
            Self::Redo => "redo:",
            Self::Paste => "paste:",
        }
    }
}
