//! Keyboard shortcuts of the overlay window.

use crate::model::keys::slot_for_key_code;
use crate::model::{EditCommand, KeyInput, SlotIndex, KC_COMMA, KC_H, KC_I, KC_Q};

/// What an overlay shortcut asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// 0-based service position (digit N selects position N-1).
    SelectService(usize),
    ToggleInspector,
    SelectSlot(SlotIndex),
    Edit(EditCommand),
    ToggleSettings,
    Hide,
}

/// Maps a key-down in the overlay to its shortcut.
///
/// Every shortcut needs Command. `None` means the key belongs to the page.
///
/// | Keys | Action |
/// |---|---|
/// | Cmd+Ctrl+Shift+Q | quit |
/// | Cmd+Ctrl/Option+1..9 | service by position |
/// | Cmd+Ctrl/Option+I | inspector |
/// | Cmd+0..9 | session slot |
/// | Cmd+A/C/X/Z/Y/V | edit command |
/// | Cmd+, | settings |
/// | Cmd+H | hide |
pub fn route_overlay_key(input: KeyInput) -> Option<KeyAction> {
    let mods = input.modifiers;
    if !mods.command() {
        return None;
    }

    if mods.control() && mods.shift() {
        return (input.key_code == KC_Q).then_some(KeyAction::Quit);
    }

    if mods.control() || mods.option() {
        if let Some(digit) = input.digit() {
            return usize::from(digit)
                .checked_sub(1)
                .map(KeyAction::SelectService);
        }
        return (input.key_code == KC_I).then_some(KeyAction::ToggleInspector);
    }

    if let Some(index) = slot_for_key_code(input.key_code) {
        return Some(KeyAction::SelectSlot(index));
    }
    if let Some(command) = EditCommand::for_key_code(input.key_code) {
        return Some(KeyAction::Edit(command));
    }
    match input.key_code {
        KC_COMMA => Some(KeyAction::ToggleSettings),
        KC_H => Some(KeyAction::Hide),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Modifiers, KC_A, KC_ESCAPE, KC_V};

    fn cmd(code: u16) -> KeyInput {
        KeyInput::new(code, Modifiers::COMMAND)
    }

    #[test]
    fn test_plain_keys_pass_through() {
        assert_eq!(route_overlay_key(KeyInput::new(KC_A, Modifiers::NONE)), None);
        assert_eq!(route_overlay_key(KeyInput::new(18, Modifiers::CONTROL)), None);
    }

    #[test]
    fn test_quit_needs_ctrl_shift() {
        let quit = KeyInput::new(KC_Q, Modifiers::COMMAND | Modifiers::CONTROL | Modifiers::SHIFT);
        assert_eq!(route_overlay_key(quit), Some(KeyAction::Quit));
        assert_eq!(route_overlay_key(cmd(KC_Q)), None);
    }

    #[test]
    fn test_ctrl_shift_other_keys_do_nothing() {
        let input = KeyInput::new(18, Modifiers::COMMAND | Modifiers::CONTROL | Modifiers::SHIFT);
        assert_eq!(route_overlay_key(input), None);
    }

    #[test]
    fn test_service_digits() {
        let option_two = KeyInput::new(19, Modifiers::COMMAND | Modifiers::OPTION);
        assert_eq!(route_overlay_key(option_two), Some(KeyAction::SelectService(1)));
        let ctrl_one = KeyInput::new(18, Modifiers::COMMAND | Modifiers::CONTROL);
        assert_eq!(route_overlay_key(ctrl_one), Some(KeyAction::SelectService(0)));
        let ctrl_zero = KeyInput::new(29, Modifiers::COMMAND | Modifiers::CONTROL);
        assert_eq!(route_overlay_key(ctrl_zero), None);
    }

    #[test]
    fn test_inspector() {
        let input = KeyInput::new(KC_I, Modifiers::COMMAND | Modifiers::OPTION);
        assert_eq!(route_overlay_key(input), Some(KeyAction::ToggleInspector));
        assert_eq!(route_overlay_key(cmd(KC_I)), None);
    }

    #[test]
    fn test_slot_digits() {
        assert_eq!(
            route_overlay_key(cmd(29)),
            Some(KeyAction::SelectSlot(SlotIndex::new(0).unwrap()))
        );
        assert_eq!(
            route_overlay_key(cmd(25)),
            Some(KeyAction::SelectSlot(SlotIndex::new(9).unwrap()))
        );
    }

    #[test]
    fn test_edit_settings_hide() {
        assert_eq!(
            route_overlay_key(cmd(KC_V)),
            Some(KeyAction::Edit(EditCommand::Paste))
        );
        assert_eq!(route_overlay_key(cmd(KC_COMMA)), Some(KeyAction::ToggleSettings));
        assert_eq!(route_overlay_key(cmd(KC_H)), Some(KeyAction::Hide));
        assert_eq!(route_overlay_key(cmd(KC_ESCAPE)), None);
    }
}
