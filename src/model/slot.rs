//! Session slot indices.

use std::fmt;

use super::constants::{DEFAULT_SLOT_INDEX, SLOT_COUNT};

/// Index of a session slot, restricted to `0..=9`.
///
/// Slots are presented in keyboard order `1, 2, ..., 9, 0`, so segment `s`
/// of the session selector maps to index `s + 1` for `s < 9` and to `0` for
/// the last segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub const COUNT: usize = SLOT_COUNT;
    pub const DEFAULT: SlotIndex = SlotIndex(DEFAULT_SLOT_INDEX);

    /// Returns `None` for values above 9.
    pub fn new(value: u8) -> Option<Self> {
        (usize::from(value) < Self::COUNT).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Position in per-service slot storage.
    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }

    pub fn from_segment(segment: usize) -> Option<Self> {
        match segment {
            0..=8 => Some(Self(segment as u8 + 1)),
            9 => Some(Self(0)),
            _ => None,
        }
    }

    pub fn segment(self) -> usize {
        if self.0 == 0 {
            Self::COUNT - 1
        } else {
            usize::from(self.0) - 1
        }
    }

    /// All indices in storage order `0..=9`.
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..Self::COUNT as u8).map(SlotIndex)
    }

    /// All indices in selector order `1..=9, 0`.
    pub fn display_order() -> impl Iterator<Item = SlotIndex> {
        (0..Self::COUNT).filter_map(Self::from_segment)
    }
}

impl Default for SlotIndex {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(SlotIndex::new(9).is_some());
        assert!(SlotIndex::new(10).is_none());
    }

    #[test]
    fn test_default_is_one() {
        assert_eq!(SlotIndex::default().value(), 1);
    }

    #[test]
    fn test_segment_mapping_is_bijective() {
        for segment in 0..SlotIndex::COUNT {
            let index = SlotIndex::from_segment(segment).unwrap();
            assert_eq!(index.segment(), segment);
        }
        assert!(SlotIndex::from_segment(10).is_none());
    }

    #[test]
    fn test_last_segment_is_zero() {
        assert_eq!(SlotIndex::from_segment(9), SlotIndex::new(0));
        assert_eq!(SlotIndex::from_segment(0), SlotIndex::new(1));
    }

    #[test]
    fn test_display_order_labels() {
        let labels: Vec<String> = SlotIndex::display_order().map(|i| i.to_string()).collect();
        assert_eq!(labels, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "0"]);
    }

    #[test]
    fn test_all_covers_storage_order() {
        let values: Vec<u8> = SlotIndex::all().map(SlotIndex::value).collect();
        assert_eq!(values, (0..10).collect::<Vec<u8>>());
    }
}
