//! Thread-safe event bus using mpsc channels.
//!
//! The bus provides a simple publish/subscribe mechanism where:
//! - Any thread can publish events via `EventPublisher::publish()`
//! - The main thread polls for events via `EventBus::drain()`

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::AppEvent;

/// Thread-safe event bus for application-wide event distribution.
///
/// Uses a multi-producer, single-consumer (mpsc) channel internally.
/// The Carbon hotkey handler, NSEvent monitors, menu actions and the
/// settings editor all publish; the dispatcher timer is the only consumer.
///
/// # Example
///
/// ```
/// use quiper::events::{AppEvent, EventBus};
///
/// let bus = EventBus::new();
/// let publisher = bus.publisher();
///
/// publisher.publish(AppEvent::GlobalHotkey);
///
/// let events = bus.drain();
/// assert_eq!(events.len(), 1);
/// ```
pub struct EventBus {
    sender: Sender<AppEvent>,
    receiver: Receiver<AppEvent>,
}

impl EventBus {
    /// Create a new event bus.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a publisher handle that can be cloned and sent to other threads.
    pub fn publisher(&self) -> EventPublisher {
        EventPublisher {
            sender: self.sender.clone(),
        }
    }

    /// Try to receive the next event without blocking.
    pub fn try_recv(&self) -> Option<AppEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events into a Vec, oldest first.
    pub fn drain(&self) -> Vec<AppEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable, thread-safe event publisher.
#[derive(Clone)]
pub struct EventPublisher {
    sender: Sender<AppEvent>,
}

impl EventPublisher {
    /// Create a publisher from an existing sender.
    ///
    /// Used by the global access module to create publishers from the static sender.
    pub fn from_sender(sender: Sender<AppEvent>) -> Self {
        Self { sender }
    }

    /// Publish an event to the bus.
    ///
    /// If the receiver has been dropped (app shutting down), the send
    /// silently fails.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MenuCommand;
    use crate::model::HotkeyDescriptor;

    #[test]
    fn test_create_bus() {
        let bus = EventBus::new();
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_publish_and_receive_single_event() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(AppEvent::GlobalHotkey);

        let events = bus.drain();
        assert_eq!(events, vec![AppEvent::GlobalHotkey]);
    }

    #[test]
    fn test_drain_empties_queue() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        publisher.publish(AppEvent::GlobalHotkey);
        publisher.publish(AppEvent::Menu(MenuCommand::Settings));

        assert_eq!(bus.drain().len(), 2);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_multiple_publishers() {
        let bus = EventBus::new();
        let pub1 = bus.publisher();
        let pub2 = pub1.clone();

        pub1.publish(AppEvent::SlotSelected(3));
        pub2.publish(AppEvent::ServiceSelected(1));

        assert_eq!(
            bus.drain(),
            vec![AppEvent::SlotSelected(3), AppEvent::ServiceSelected(1)]
        );
    }

    #[test]
    fn test_publish_from_other_thread() {
        let bus = EventBus::new();
        let publisher = bus.publisher();

        std::thread::spawn(move || publisher.publish(AppEvent::ReinstallHotkeys))
            .join()
            .unwrap();

        assert_eq!(bus.try_recv(), Some(AppEvent::ReinstallHotkeys));
        assert_eq!(bus.try_recv(), None);
    }

    #[test]
    fn test_events_preserve_data() {
        let bus = EventBus::default();
        let publisher = bus.publisher();

        let test_events = vec![
            AppEvent::HotkeyRecorded(HotkeyDescriptor::default()),
            AppEvent::LinkActivated("https://example.com".into()),
            AppEvent::SettingsClosed,
            AppEvent::AppDeactivated,
        ];
        for event in &test_events {
            publisher.publish(event.clone());
        }

        assert_eq!(bus.drain(), test_events);
    }
}
