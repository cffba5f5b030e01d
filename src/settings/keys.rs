//! Keyboard handling of the settings window.

use crate::model::{EditCommand, KeyInput, KC_COMMA, KC_ESCAPE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsKeyAction {
    Close,
    Edit(EditCommand),
}

/// Escape or Cmd+, close the window; Cmd+A/C/X/Z/Y/V edit the focused cell.
pub fn settings_key_action(input: KeyInput) -> Option<SettingsKeyAction> {
    if input.key_code == KC_ESCAPE {
        return Some(SettingsKeyAction::Close);
    }

    let mods = input.modifiers;
    if !mods.command() || mods.control() || mods.option() {
        return None;
    }
    if input.key_code == KC_COMMA {
        return Some(SettingsKeyAction::Close);
    }
    EditCommand::for_key_code(input.key_code).map(SettingsKeyAction::Edit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Modifiers, KC_A, KC_C, KC_Q};

    #[test]
    fn test_escape_closes_with_any_modifiers() {
        let input = KeyInput::new(KC_ESCAPE, Modifiers::NONE);
        assert_eq!(settings_key_action(input), Some(SettingsKeyAction::Close));
        let input = KeyInput::new(KC_ESCAPE, Modifiers::SHIFT);
        assert_eq!(settings_key_action(input), Some(SettingsKeyAction::Close));
    }

    #[test]
    fn test_command_comma_closes() {
        let input = KeyInput::new(KC_COMMA, Modifiers::COMMAND);
        assert_eq!(settings_key_action(input), Some(SettingsKeyAction::Close));
    }

    #[test]
    fn test_edit_commands() {
        let input = KeyInput::new(KC_C, Modifiers::COMMAND);
        assert_eq!(
            settings_key_action(input),
            Some(SettingsKeyAction::Edit(EditCommand::Copy))
        );
        let input = KeyInput::new(KC_A, Modifiers::COMMAND | Modifiers::OPTION);
        assert_eq!(settings_key_action(input), None);
    }

    #[test]
    fn test_other_keys_pass_through() {
        assert_eq!(settings_key_action(KeyInput::new(KC_A, Modifiers::NONE)), None);
        assert_eq!(
            settings_key_action(KeyInput::new(KC_Q, Modifiers::COMMAND)),
            None
        );
    }
}
