//! macOS entry point: builds the host, window and menu, then runs AppKit.

use quiper::events::init_event_bus;
use quiper::platform::macos::app::host::IVAR_UPDATE_TIMER;
use quiper::platform::macos::ffi::bridge::{
    autoreleasepool, get_class, id, msg_send, nil, nsstring_id, NSApp, ObjectExt, YES,
};
use quiper::platform::macos::ffi::NS_ACTIVATION_POLICY_ACCESSORY;
use quiper::platform::macos::handlers::execute_effects;
use quiper::platform::macos::input::{
    install_drag_monitor, install_hotkey_handler, install_key_monitor,
    install_termination_observer, install_wakeup_space_observers,
};
use quiper::platform::macos::ui::{create_overlay_window, install_status_bar};
use quiper::platform::macos::{install_state, register_and_create_host, HostState};
use quiper::storage::AppPaths;

use objc2::runtime::Sel;
use objc2::sel;

/// Event pump interval; the timer drains the event bus on the main thread.
const TICK_INTERVAL: f64 = 0.016;

pub fn run(paths: AppPaths) {
    init_event_bus();

    autoreleasepool(|| unsafe {
        let app = NSApp();
        let _: bool = msg_send![app, setActivationPolicy: NS_ACTIVATION_POLICY_ACCESSORY];

        let host = register_and_create_host();
        let (state, initial_effects) = HostState::load(paths);
        install_state(state);

        create_overlay_window(host);
        install_status_bar(host);
        if !install_hotkey_handler(host) {
            tracing::warn!("global hotkey handler unavailable");
        }
        execute_effects(host, initial_effects);

        install_key_monitor(host);
        install_drag_monitor(host);
        install_termination_observer(host);
        install_wakeup_space_observers();

        let _ = create_timer(host, sel!(dispatchTick), TICK_INTERVAL);

        tracing::info!("entering run loop");
        let _: () = msg_send![app, run];
    });
}

/// Create an AppKit timer that fires even during modal menus.
///
/// # Safety
/// The target must be a valid NSObject that responds to the selector.
unsafe fn create_timer(target: id, selector: Sel, interval: f64) -> id {
    let prev: id = *(*target).load_ivar::<id>(IVAR_UPDATE_TIMER);
    if prev != nil {
        let _: () = msg_send![prev, invalidate];
        (*target).store_ivar::<id>(IVAR_UPDATE_TIMER, nil);
    }
    let timer: id = msg_send![
        get_class("NSTimer"),
        timerWithTimeInterval: interval,
        target: target,
        selector: selector,
        userInfo: nil,
        repeats: YES
    ];
    // CommonModes keeps it firing while menus are open
    let run_loop: id = msg_send![get_class("NSRunLoop"), currentRunLoop];
    let _: () = msg_send![run_loop, addTimer: timer, forMode: nsstring_id("kCFRunLoopCommonModes")];

    (*target).store_ivar::<id>(IVAR_UPDATE_TIMER, timer);
    timer
}
