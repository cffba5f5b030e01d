//! System notifications that affect the hotkey.
//!
//! Carbon registrations can be dropped across sleep, session switches and
//! Space changes; those notifications publish `ReinstallHotkeys` and the
//! controller re-arms the descriptor it owns.

use block2::RcBlock;

use crate::events::{publish, AppEvent};
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, nsstring_id};
use crate::platform::macos::input::hotkeys::uninstall_hotkeys;

/// Releases the Carbon registrations when the app terminates.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn install_termination_observer(host: id) {
    let center: id = msg_send![get_class("NSNotificationCenter"), defaultCenter];
    let block = RcBlock::new(move |_note: id| unsafe {
        uninstall_hotkeys(host);
    });
    let name = nsstring_id("NSApplicationWillTerminateNotification");
    let _: id =
        msg_send![center, addObserverForName: name, object: nil, queue: nil, usingBlock: &*block];
}

/// Publishes `ReinstallHotkeys` on wake, session activation and Space change.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn install_wakeup_space_observers() {
    let ws: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
    let nc: id = msg_send![ws, notificationCenter];

    for name in [
        "NSWorkspaceDidWakeNotification",
        "NSWorkspaceSessionDidBecomeActiveNotification",
        "NSWorkspaceActiveSpaceDidChangeNotification",
    ] {
        let block = RcBlock::new(|_note: id| publish(AppEvent::ReinstallHotkeys));
        let _: id = msg_send![
            nc,
            addObserverForName: nsstring_id(name),
            object: nil,
            queue: nil,
            usingBlock: &*block
        ];
    }
}
