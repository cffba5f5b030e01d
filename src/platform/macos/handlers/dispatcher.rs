//! Event dispatcher driven by the main-loop timer.
//!
//! ```text
//! take_event() → OverlayController::dispatch() → execute_effects()
//! ```
//!
//! Producers (Carbon, monitors, menu, delegates) only publish events; this
//! is the one place where the controller runs and AppKit is mutated in
//! response.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::events::take_event;
use crate::platform::macos::app::dispatch_to_controller;
use crate::platform::macos::ffi::bridge::id;

use super::effects::execute_effects;

/// Held while a tick drains the bus.
///
/// Effects can spin a nested run loop (menu tracking, window ordering),
/// during which the timer keeps firing; the guard keeps those ticks from
/// interleaving with the one in progress.
static DISPATCH_GUARD: AtomicBool = AtomicBool::new(false);

/// Drains every pending event and executes the resulting effects in order.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn dispatch_events(host: id) {
    if DISPATCH_GUARD
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return;
    }

    while let Some(event) = take_event() {
        let effects = dispatch_to_controller(event);
        execute_effects(host, effects);
    }

    DISPATCH_GUARD.store(false, Ordering::SeqCst);
}
