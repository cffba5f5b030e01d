//! Main-thread state shared by the host callbacks.
//!
//! AppKit calls back into Rust through plain `extern "C"` functions, so the
//! controller and the stores live in a thread-local owned by the main
//! thread. Borrows are kept short: callbacks take what they need and
//! release the borrow before touching AppKit, which may re-enter.

use std::cell::RefCell;

use crate::controller::{Effect, OverlayController};
use crate::events::AppEvent;
use crate::storage::{AppPaths, ConfigStore, HotkeyStore};

pub struct HostState {
    pub controller: OverlayController,
    pub config_store: ConfigStore,
    pub hotkey_store: HotkeyStore,
    pub paths: AppPaths,
}

impl HostState {
    /// Loads both stores and builds the controller.
    ///
    /// Returns the effects that set up the initial web views, selectors and
    /// hotkey.
    pub fn load(paths: AppPaths) -> (Self, Vec<Effect>) {
        let config_store = ConfigStore::new(&paths.settings_file);
        let hotkey_store = HotkeyStore::new(&paths.hotkey_file);
        let (controller, effects) =
            OverlayController::new(config_store.load(), hotkey_store.load());
        let state = Self {
            controller,
            config_store,
            hotkey_store,
            paths,
        };
        (state, effects)
    }
}

thread_local! {
    static STATE: RefCell<Option<HostState>> = const { RefCell::new(None) };
}

pub fn install_state(state: HostState) {
    STATE.with(|cell| *cell.borrow_mut() = Some(state));
}

/// Runs `f` against the state; `None` before `install_state` or when the
/// state is already borrowed further up the stack.
pub fn with_state<R>(f: impl FnOnce(&mut HostState) -> R) -> Option<R> {
    STATE.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

/// Feeds one event to the controller.
pub fn dispatch_to_controller(event: AppEvent) -> Vec<Effect> {
    with_state(|state| state.controller.dispatch(event)).unwrap_or_default()
}
