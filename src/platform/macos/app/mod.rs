//! The host object and the state its callbacks share.

pub mod host;
pub mod state;

pub use host::register_and_create_host;
pub use state::{dispatch_to_controller, install_state, with_state, HostState};
