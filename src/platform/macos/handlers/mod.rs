//! Event dispatch and effect execution.
//!
//! - [`dispatcher`]: drains the event bus on each timer tick
//! - [`effects`]: turns controller effects into AppKit/WebKit calls

pub mod dispatcher;
pub mod effects;

pub use dispatcher::dispatch_events;
pub use effects::{execute_effects, send_edit_action};
