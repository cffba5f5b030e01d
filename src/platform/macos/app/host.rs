//! The `QuiperHost` Objective-C class.
//!
//! One host instance owns every AppKit object the shell creates (stored
//! as ivars) and is the target of every action: menu items, selector
//! controls, window and table delegates, the WebKit navigation delegate
//! and the dispatch timer. Actions only publish `AppEvent`s; the
//! dispatcher turns them into effects on the next timer tick.

use std::ffi::c_void;

use objc2::runtime::{AnyClass, AnyObject, ClassBuilder, Sel};
use objc2::sel;
use tracing::debug;

use crate::events::{publish, AppEvent, MenuCommand};
use crate::platform::macos::ffi::bridge::{get_class, host_ivar, id, msg_send, Block};
use crate::platform::macos::ffi::NS_WINDOW_OCCLUSION_STATE_VISIBLE;
use crate::platform::macos::handlers::dispatch_events;
use crate::platform::macos::ui::overlay::webviews::decide_navigation_policy;
use crate::platform::macos::ui::settings::table;

// === ivar names ===

pub const IVAR_WINDOW: &str = "_window";
pub const IVAR_CONTENT_VIEW: &str = "_contentView";
pub const IVAR_DRAG_AREA: &str = "_dragArea";
pub const IVAR_SERVICE_SELECTOR: &str = "_serviceSelector";
pub const IVAR_SESSION_SELECTOR: &str = "_sessionSelector";
pub const IVAR_STATUS_ITEM: &str = "_statusItem";
pub const IVAR_INSPECTOR_ITEM: &str = "_inspectorItem";
pub const IVAR_SETTINGS_WINDOW: &str = "_settingsWindow";
pub const IVAR_SETTINGS_TABLE: &str = "_settingsTable";
pub const IVAR_TEMPLATE_POPUP: &str = "_templatePopup";
pub const IVAR_KEY_MONITOR: &str = "_keyMonitor";
pub const IVAR_MOUSE_MONITOR: &str = "_mouseMonitor";
pub const IVAR_CAPTURE_MONITOR: &str = "_captureMonitor";
pub const IVAR_CAPTURE_OVERLAY: &str = "_captureOverlay";
pub const IVAR_UPDATE_TIMER: &str = "_updateTimer";
pub const IVAR_HK_HANDLER: &str = "_hkHandler";
pub const IVAR_HK_TOGGLE: &str = "_hkToggle";

/// Registers `QuiperHost` (once) and returns a new instance.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn register_and_create_host() -> id {
    let class_name = c"QuiperHost";
    let host_class = if let Some(cls) = AnyClass::get(class_name) {
        cls
    } else {
        let Some(mut builder) = ClassBuilder::new(class_name, get_class("NSObject")) else {
            panic!("QuiperHost already registered");
        };
        register_ivars(&mut builder);
        register_methods(&mut builder);
        builder.register()
    };

    let host: id = msg_send![host_class, new];
    host
}

unsafe fn register_ivars(builder: &mut ClassBuilder) {
    // Overlay window and chrome
    builder.add_ivar::<id>(c"_window");
    builder.add_ivar::<id>(c"_contentView");
    builder.add_ivar::<id>(c"_dragArea");
    builder.add_ivar::<id>(c"_serviceSelector");
    builder.add_ivar::<id>(c"_sessionSelector");

    // Status bar
    builder.add_ivar::<id>(c"_statusItem");
    builder.add_ivar::<id>(c"_inspectorItem");

    // Settings window
    builder.add_ivar::<id>(c"_settingsWindow");
    builder.add_ivar::<id>(c"_settingsTable");
    builder.add_ivar::<id>(c"_templatePopup");

    // NSEvent monitors
    builder.add_ivar::<id>(c"_keyMonitor");
    builder.add_ivar::<id>(c"_mouseMonitor");
    builder.add_ivar::<id>(c"_captureMonitor");
    builder.add_ivar::<id>(c"_captureOverlay");

    builder.add_ivar::<id>(c"_updateTimer");

    // Carbon refs
    builder.add_ivar::<*mut c_void>(c"_hkHandler");
    builder.add_ivar::<*mut c_void>(c"_hkToggle");
}

unsafe fn register_methods(builder: &mut ClassBuilder) {
    builder.add_method(
        sel!(dispatchTick),
        dispatch_tick as unsafe extern "C-unwind" fn(_, _),
    );

    // Actions
    builder.add_method(
        sel!(menuAction:),
        menu_action as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(serviceChanged:),
        service_changed as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(sessionChanged:),
        session_changed as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(hideWindow:),
        hide_window as unsafe extern "C-unwind" fn(_, _, _),
    );

    // NSWindowDelegate
    builder.add_method(
        sel!(windowWillClose:),
        window_will_close as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(windowDidChangeOcclusionState:),
        window_did_change_occlusion as unsafe extern "C-unwind" fn(_, _, _),
    );

    // WKNavigationDelegate
    builder.add_method(
        sel!(webView:decidePolicyForNavigationAction:decisionHandler:),
        decide_policy as unsafe extern "C-unwind" fn(_, _, _, _, _),
    );

    // Settings: buttons, data source and drag reordering
    builder.add_method(
        sel!(addService:),
        table::add_service as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(removeService:),
        table::remove_service as unsafe extern "C-unwind" fn(_, _, _),
    );
    builder.add_method(
        sel!(numberOfRowsInTableView:),
        table::number_of_rows as unsafe extern "C-unwind" fn(_, _, _) -> _,
    );
    builder.add_method(
        sel!(tableView:objectValueForTableColumn:row:),
        table::object_value as unsafe extern "C-unwind" fn(_, _, _, _, _) -> _,
    );
    builder.add_method(
        sel!(tableView:setObjectValue:forTableColumn:row:),
        table::set_object_value as unsafe extern "C-unwind" fn(_, _, _, _, _, _),
    );
    builder.add_method(
        sel!(tableView:writeRowsWithIndexes:toPasteboard:),
        table::write_rows as unsafe extern "C-unwind" fn(_, _, _, _, _) -> _,
    );
    builder.add_method(
        sel!(tableView:validateDrop:proposedRow:proposedDropOperation:),
        table::validate_drop as unsafe extern "C-unwind" fn(_, _, _, _, _, _) -> _,
    );
    builder.add_method(
        sel!(tableView:acceptDrop:row:dropOperation:),
        table::accept_drop as unsafe extern "C-unwind" fn(_, _, _, _, _, _) -> _,
    );
}

unsafe extern "C-unwind" fn dispatch_tick(this: &mut AnyObject, _cmd: Sel) {
    dispatch_events(this as *mut AnyObject);
}

unsafe extern "C-unwind" fn menu_action(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    let tag: isize = msg_send![sender, tag];
    match MenuCommand::from_tag(tag) {
        Some(command) => publish(AppEvent::Menu(command)),
        None => debug!(tag, "menu item without command"),
    }
}

unsafe extern "C-unwind" fn service_changed(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    let segment: isize = msg_send![sender, selectedSegment];
    if let Ok(segment) = usize::try_from(segment) {
        publish(AppEvent::ServiceSelected(segment));
    }
}

unsafe extern "C-unwind" fn session_changed(_this: &mut AnyObject, _cmd: Sel, sender: id) {
    let segment: isize = msg_send![sender, selectedSegment];
    if let Ok(segment) = usize::try_from(segment) {
        publish(AppEvent::SlotSelected(segment));
    }
}

unsafe extern "C-unwind" fn hide_window(_this: &mut AnyObject, _cmd: Sel, _sender: id) {
    publish(AppEvent::Menu(MenuCommand::Hide));
}

unsafe extern "C-unwind" fn window_will_close(this: &mut AnyObject, _cmd: Sel, note: id) {
    let window: id = msg_send![note, object];
    if window == host_ivar(this as *mut AnyObject, IVAR_SETTINGS_WINDOW) {
        publish(AppEvent::SettingsClosed);
    }
}

unsafe extern "C-unwind" fn window_did_change_occlusion(
    this: &mut AnyObject,
    _cmd: Sel,
    note: id,
) {
    let window: id = msg_send![note, object];
    if window != host_ivar(this as *mut AnyObject, IVAR_WINDOW) {
        return;
    }
    let state: u64 = msg_send![window, occlusionState];
    if state & NS_WINDOW_OCCLUSION_STATE_VISIBLE == 0 {
        publish(AppEvent::AppDeactivated);
    }
}

unsafe extern "C-unwind" fn decide_policy(
    _this: &mut AnyObject,
    _cmd: Sel,
    _web_view: id,
    action: id,
    handler: &Block<dyn Fn(isize)>,
) {
    let policy = decide_navigation_policy(action);
    handler.call((policy,));
}

