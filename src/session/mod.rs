//! Session slots per service and the rule that exactly one of them is shown.

pub mod matrix;
pub mod slot;

pub use matrix::SessionMatrix;
pub use slot::{SessionSlot, SlotKey, ViewCommand};
