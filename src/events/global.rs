//! Global access to the application event bus.
//!
//! AppKit and Carbon callbacks have no way to carry a Rust publisher, so
//! the macOS shell publishes through these statics. The bus is initialized
//! once at startup via `init_event_bus()`.
//!
//! - `Sender` is stored in `OnceLock` (it is `Send + Sync`)
//! - `Receiver` is stored in a `Mutex` and only touched by the main thread

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, OnceLock};

use tracing::warn;

use super::bus::EventPublisher;
use super::types::AppEvent;

static SENDER: OnceLock<Sender<AppEvent>> = OnceLock::new();

static RECEIVER: OnceLock<Mutex<Receiver<AppEvent>>> = OnceLock::new();

/// Initialize the global event bus.
///
/// Returns `false` if it was already initialized; the existing channel is
/// kept in that case.
pub fn init_event_bus() -> bool {
    let (sender, receiver) = mpsc::channel();
    if SENDER.set(sender).is_err() {
        return false;
    }
    RECEIVER.set(Mutex::new(receiver)).is_ok()
}

/// Publisher handle for the global bus, or `None` before initialization.
pub fn publisher() -> Option<EventPublisher> {
    SENDER.get().cloned().map(EventPublisher::from_sender)
}

/// Publish an event to the global event bus.
///
/// Events published before `init_event_bus()` are dropped with a warning.
pub fn publish(event: AppEvent) {
    match SENDER.get() {
        Some(sender) => {
            let _ = sender.send(event);
        }
        None => warn!(event = event.description(), "event bus not initialized"),
    }
}

/// Take the next pending event, if any.
pub fn take_event() -> Option<AppEvent> {
    let receiver = RECEIVER.get()?;
    let receiver = receiver.lock().ok()?;
    receiver.try_recv().ok()
}

/// Drain all pending events from the global event bus.
pub fn drain_events() -> Vec<AppEvent> {
    std::iter::from_fn(take_event).collect()
}
