//! Local key-down monitor for the overlay and the settings window.
//!
//! Overlay shortcuts are consumed and published as `AppEvent::Key`; the
//! settings window handles Escape, Cmd+, and the edit shortcuts. Keys
//! that match nothing continue to the focused web view or text field.

use block2::RcBlock;

use crate::controller::route_overlay_key;
use crate::events::{publish, AppEvent};
use crate::model::KeyInput;
use crate::platform::macos::app::host::{
    IVAR_CAPTURE_MONITOR, IVAR_KEY_MONITOR, IVAR_SETTINGS_WINDOW, IVAR_WINDOW,
};
use crate::platform::macos::ffi::bridge::{get_class, host_ivar, id, msg_send, nil, set_host_ivar};
use crate::platform::macos::ffi::NS_EVENT_MASK_KEY_DOWN;
use crate::platform::macos::handlers::send_edit_action;
use crate::settings::{settings_key_action, SettingsKeyAction};

/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn install_key_monitor(host: id) {
    if host_ivar(host, IVAR_KEY_MONITOR) != nil {
        return;
    }

    let block = RcBlock::new(move |event: id| -> id {
        unsafe {
            // The capture prompt owns the keyboard while it is up.
            if host_ivar(host, IVAR_CAPTURE_MONITOR) != nil {
                return event;
            }
            let key_code: u16 = msg_send![event, keyCode];
            let flags: u64 = msg_send![event, modifierFlags];
            let input = KeyInput::from_event(key_code, flags);
            let window: id = msg_send![event, window];

            if window != nil && window == host_ivar(host, IVAR_WINDOW) {
                if route_overlay_key(input).is_some() {
                    publish(AppEvent::Key(input));
                    return nil;
                }
            } else if window != nil && window == host_ivar(host, IVAR_SETTINGS_WINDOW) {
                match settings_key_action(input) {
                    Some(SettingsKeyAction::Close) => {
                        publish(AppEvent::SettingsClosed);
                        return nil;
                    }
                    Some(SettingsKeyAction::Edit(command)) => {
                        send_edit_action(command);
                        return nil;
                    }
                    None => {}
                }
            }
            event
        }
    });

    let monitor: id = msg_send![
        get_class("NSEvent"),
        addLocalMonitorForEventsMatchingMask: NS_EVENT_MASK_KEY_DOWN,
        handler: &*block
    ];
    set_host_ivar(host, IVAR_KEY_MONITOR, monitor);
}
