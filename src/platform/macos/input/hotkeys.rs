//! Carbon registration of the global toggle hotkey.
//!
//! The event handler is installed once per process; arming swaps the
//! registered key combination without touching the handler.

use std::ffi::c_void;

use tracing::{debug, info, warn};

use crate::events::{publish, AppEvent};
use crate::model::HotkeyDescriptor;
use crate::platform::macos::app::host::{IVAR_HK_HANDLER, IVAR_HK_TOGGLE};
use crate::platform::macos::ffi::bridge::{id, ObjectExt};
use crate::platform::macos::ffi::{
    EventHandlerCallRef, EventHandlerRef, EventHotKeyID, EventHotKeyRef, EventRef, EventTypeSpec,
    GetApplicationEventTarget, GetEventClass, GetEventKind, GetEventParameter, InstallEventHandler,
    RegisterEventHotKey, RemoveEventHandler, UnregisterEventHotKey, HKID_TOGGLE,
    K_EVENT_CLASS_KEYBOARD, K_EVENT_HOTKEY_PRESSED, K_EVENT_PARAM_DIRECT_OBJECT, NO_ERR,
    SIG_QUIPER, TYPE_EVENT_HOTKEY_ID,
};

/// Installs the Carbon hot-key handler on the application target.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn install_hotkey_handler(host: id) -> bool {
    let existing: *mut c_void = *(*host).load_ivar(IVAR_HK_HANDLER);
    if !existing.is_null() {
        return true;
    }

    let types = [EventTypeSpec {
        event_class: K_EVENT_CLASS_KEYBOARD,
        event_kind: K_EVENT_HOTKEY_PRESSED,
    }];
    let mut handler_ref: EventHandlerRef = std::ptr::null_mut();
    let status = InstallEventHandler(
        GetApplicationEventTarget(),
        hotkey_event_handler,
        types.len() as u32,
        types.as_ptr(),
        host as *mut c_void,
        &mut handler_ref,
    );
    if status != NO_ERR {
        warn!(status, "InstallEventHandler failed");
        return false;
    }
    (*host).store_ivar::<*mut c_void>(IVAR_HK_HANDLER, handler_ref);
    true
}

/// Registers `hotkey` as the toggle, replacing any previous registration.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn arm_hotkey(host: id, hotkey: &HotkeyDescriptor) {
    unregister_toggle(host);

    let hk_id = EventHotKeyID {
        signature: SIG_QUIPER,
        id: HKID_TOGGLE,
    };
    let mut out_ref: EventHotKeyRef = std::ptr::null_mut();
    let status = RegisterEventHotKey(
        u32::from(hotkey.key),
        hotkey.carbon_modifiers(),
        hk_id,
        GetApplicationEventTarget(),
        0,
        &mut out_ref,
    );
    if status != NO_ERR || out_ref.is_null() {
        warn!(
            status,
            hotkey = %hotkey.display_string(),
            "RegisterEventHotKey failed"
        );
        return;
    }
    (*host).store_ivar::<*mut c_void>(IVAR_HK_TOGGLE, out_ref);
    info!(hotkey = %hotkey.display_string(), "hotkey armed");
}

unsafe fn unregister_toggle(host: id) {
    let hk_toggle: *mut c_void = *(*host).load_ivar(IVAR_HK_TOGGLE);
    if !hk_toggle.is_null() {
        let _ = UnregisterEventHotKey(hk_toggle);
        (*host).store_ivar::<*mut c_void>(IVAR_HK_TOGGLE, std::ptr::null_mut());
    }
}

/// Unregisters the toggle and removes the handler.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn uninstall_hotkeys(host: id) {
    unregister_toggle(host);
    let hk_handler: *mut c_void = *(*host).load_ivar(IVAR_HK_HANDLER);
    if !hk_handler.is_null() {
        let _ = RemoveEventHandler(hk_handler);
        (*host).store_ivar::<*mut c_void>(IVAR_HK_HANDLER, std::ptr::null_mut());
    }
    debug!("hotkeys uninstalled");
}

/// Carbon callback; publishes `GlobalHotkey` for the dispatcher.
pub extern "C" fn hotkey_event_handler(
    _call_ref: EventHandlerCallRef,
    event: EventRef,
    _user_data: *mut c_void,
) -> i32 {
    unsafe {
        if GetEventClass(event) != K_EVENT_CLASS_KEYBOARD
            || GetEventKind(event) != K_EVENT_HOTKEY_PRESSED
        {
            return NO_ERR;
        }
        let mut hot_id = EventHotKeyID {
            signature: 0,
            id: 0,
        };
        let status = GetEventParameter(
            event,
            K_EVENT_PARAM_DIRECT_OBJECT,
            TYPE_EVENT_HOTKEY_ID,
            std::ptr::null_mut(),
            std::mem::size_of::<EventHotKeyID>() as u32,
            std::ptr::null_mut(),
            &mut hot_id as *mut _ as *mut c_void,
        );
        if status == NO_ERR && hot_id.signature == SIG_QUIPER && hot_id.id == HKID_TOGGLE {
            publish(AppEvent::GlobalHotkey);
        }
    }
    NO_ERR
}
