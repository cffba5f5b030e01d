//! Event system for decoupled inter-module communication.
//!
//! Producers never call into the controller directly. They publish an
//! [`AppEvent`]; the dispatcher drains the bus on the main run loop and
//! feeds each event to `OverlayController::dispatch`.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐
//! │   Hotkey    │  │  Key/mouse  │  │  Status bar │  │  Settings   │
//! │  (Carbon)   │  │  monitors   │  │    menu     │  │   editor    │
//! └──────┬──────┘  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘
//!        │ publish()      │                │                │
//!        ▼                ▼                ▼                ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        EventBus (mpsc)                        │
//! └───────────────────────────────┬───────────────────────────────┘
//!                                 │ take_event()
//!                                 ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │      Dispatcher → OverlayController::dispatch → Effects       │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! - [`types`]: Event definitions (`AppEvent`, `MenuCommand`)
//! - [`bus`]: `EventBus` and `EventPublisher` types
//! - [`global`]: Static access functions

pub mod bus;
pub mod global;
pub mod types;

pub use bus::{EventBus, EventPublisher};
pub use global::{drain_events, init_event_bus, publish, publisher, take_event};
pub use types::{AppEvent, MenuCommand};
