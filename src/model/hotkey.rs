//! Hotkey descriptor and modifier flags.

use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use super::constants::*;

/// Modifier keys, stored with the NSEvent bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u64);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(NS_SHIFT_FLAG);
    pub const CONTROL: Modifiers = Modifiers(NS_CONTROL_FLAG);
    pub const OPTION: Modifiers = Modifiers(NS_OPTION_FLAG);
    pub const COMMAND: Modifiers = Modifiers(NS_COMMAND_FLAG);

    /// Keeps only the device-independent bits of a raw `modifierFlags` value.
    pub fn from_event_flags(flags: u64) -> Self {
        Self(flags & NS_DEVICE_INDEPENDENT_FLAGS_MASK)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, other: Modifiers) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn shift(self) -> bool {
        self.contains(Self::SHIFT)
    }

    pub fn control(self) -> bool {
        self.contains(Self::CONTROL)
    }

    pub fn option(self) -> bool {
        self.contains(Self::OPTION)
    }

    pub fn command(self) -> bool {
        self.contains(Self::COMMAND)
    }

    /// Carbon `RegisterEventHotKey` modifier mask.
    pub fn carbon_mask(self) -> u32 {
        let mut mask = 0;
        if self.command() {
            mask |= CARBON_CMD_KEY;
        }
        if self.shift() {
            mask |= CARBON_SHIFT_KEY;
        }
        if self.option() {
            mask |= CARBON_OPTION_KEY;
        }
        if self.control() {
            mask |= CARBON_CONTROL_KEY;
        }
        mask
    }

    /// Modifier names in menu order: Shift, Control, Option, Command.
    pub fn names(self) -> Vec<&'static str> {
        [
            (Self::SHIFT, "Shift"),
            (Self::CONTROL, "Control"),
            (Self::OPTION, "Option"),
            (Self::COMMAND, "Command"),
        ]
        .into_iter()
        .filter(|(flag, _)| self.contains(*flag))
        .map(|(_, name)| name)
        .collect()
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

/// Global toggle hotkey as persisted in `hotkey_config.json`.
///
/// Missing fields fall back to the Option+Space defaults, so a file holding
/// only `{"key": 12}` keeps the Option modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotkeyDescriptor {
    #[serde(default = "default_flags")]
    pub flags: u64,
    #[serde(default = "default_key")]
    pub key: u16,
}

fn default_flags() -> u64 {
    DEFAULT_HOTKEY_FLAGS
}

fn default_key() -> u16 {
    DEFAULT_HOTKEY_KEY
}

impl Default for HotkeyDescriptor {
    fn default() -> Self {
        Self {
            flags: DEFAULT_HOTKEY_FLAGS,
            key: DEFAULT_HOTKEY_KEY,
        }
    }
}

impl HotkeyDescriptor {
    pub fn new(modifiers: Modifiers, key: u16) -> Self {
        Self {
            flags: modifiers.bits(),
            key,
        }
    }

    /// Builds a descriptor from a raw key-down event.
    pub fn from_event(flags: u64, key: u16) -> Self {
        Self::new(Modifiers::from_event_flags(flags), key)
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_event_flags(self.flags)
    }

    pub fn carbon_modifiers(&self) -> u32 {
        self.modifiers().carbon_mask()
    }

    /// Human readable form, e.g. `"Option + Space"`.
    pub fn display_string(&self) -> String {
        let mut parts: Vec<String> = self
            .modifiers()
            .names()
            .into_iter()
            .map(str::to_owned)
            .collect();
        parts.push(key_name(self.key));
        parts.join(" + ")
    }
}

/// Name of a virtual key code, falling back to `"Key <code>"`.
pub fn key_name(code: u16) -> String {
    let name = match code {
        36 => "Return",
        48 => "Tab",
        49 => "Space",
        51 => "Delete",
        53 => "Escape",
        122 => "F1",
        120 => "F2",
        99 => "F3",
        118 => "F4",
        96 => "F5",
        97 => "F6",
        98 => "F7",
        100 => "F8",
        101 => "F9",
        109 => "F10",
        103 => "F11",
        111 => "F12",
        123 => "Left",
        124 => "Right",
        125 => "Down",
        126 => "Up",
        0 => "A",
        1 => "S",
        2 => "D",
        3 => "F",
        4 => "H",
        5 => "G",
        6 => "Z",
        7 => "X",
        8 => "C",
        9 => "V",
        11 => "B",
        12 => "Q",
        13 => "W",
        14 => "E",
        15 => "R",
        16 => "Y",
        17 => "T",
        18 => "1",
        19 => "2",
        20 => "3",
        21 => "4",
        22 => "6",
        23 => "5",
        24 => "=",
        25 => "9",
        26 => "7",
        27 => "-",
        28 => "8",
        29 => "0",
        30 => "]",
        31 => "O",
        32 => "U",
        33 => "[",
        34 => "I",
        35 => "P",
        37 => "L",
        38 => "J",
        39 => "'",
        40 => "K",
        41 => ";",
        42 => "\\",
        43 => ",",
        44 => "/",
        45 => "N",
        46 => "M",
        47 => ".",
        50 => "`",
        _ => return format!("Key {code}"),
    };
    name.to_owned()
}
