//! Executes the controller's effects against AppKit, WebKit and Carbon.

use std::ffi::CString;

use objc2::runtime::Sel;
use tracing::{info, warn};

use crate::controller::Effect;
use crate::launcher::{LaunchAgentRegistrar, LoginItemRegistrar};
use crate::model::{EditCommand, HotkeyDescriptor, INSTALLED_MESSAGE};
use crate::platform::macos::app::with_state;
use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nil, nsstring_id, NSApp};
use crate::platform::macos::input::hotkeys::arm_hotkey;
use crate::platform::macos::ui::overlay::{selectors, webviews, window};
use crate::platform::macos::ui::{hotkey_capture, settings, status_bar};

/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn execute_effects(host: id, effects: Vec<Effect>) {
    for effect in effects {
        execute_effect(host, effect);
    }
}

unsafe fn execute_effect(host: id, effect: Effect) {
    match effect {
        Effect::View(command) => webviews::apply(host, command),
        Effect::ShowWindow => window::show_window(host),
        Effect::HideApp => {
            let _: () = msg_send![NSApp(), hide: nil];
        }
        Effect::ShowSettings => settings::show_settings(host),
        Effect::HideSettings => settings::hide_settings(host),
        Effect::Terminate => terminate(),
        Effect::Edit(command) => send_edit_action(command),
        Effect::ClearWebsiteData => webviews::clear_website_data(),
        Effect::BeginHotkeyCapture => hotkey_capture::begin_capture(host),
        Effect::ArmHotkey(hotkey) => arm_hotkey(host, &hotkey),
        Effect::PersistHotkey(hotkey) => persist_hotkey(&hotkey),
        Effect::InstallLoginItem => install_login_item(),
        Effect::UninstallLoginItem => uninstall_login_item(),
        Effect::SyncSelectors(state) => selectors::sync_selectors(host, &state),
        Effect::SetInspectorMenuTitle(title) => status_bar::set_inspector_title(host, title),
        Effect::OpenExternal(url) => open_external(&url),
    }
}

unsafe fn terminate() {
    info!("terminating");
    let _: () = msg_send![NSApp(), terminate: nil];
}

/// Sends the edit action down the responder chain of the key window.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn send_edit_action(command: EditCommand) {
    let Ok(name) = CString::new(command.selector_name()) else {
        return;
    };
    let action = Sel::register(&name);
    let _: bool = msg_send![NSApp(), sendAction: action, to: nil, from: nil];
}

fn persist_hotkey(hotkey: &HotkeyDescriptor) {
    let Some(store) = with_state(|state| state.hotkey_store.clone()) else {
        return;
    };
    if let Err(err) = store.save(hotkey) {
        warn!(%err, "could not save hotkey");
    }
}

fn registrar() -> Option<LaunchAgentRegistrar> {
    let agents_dir = with_state(|state| state.paths.launch_agents_dir.clone())?;
    match LaunchAgentRegistrar::for_current_process(agents_dir) {
        Ok(registrar) => Some(registrar),
        Err(err) => {
            warn!(%err, "login registration unavailable");
            eprintln!("{err}");
            None
        }
    }
}

/// A successful install quits so launchd owns the next instance.
unsafe fn install_login_item() {
    let Some(registrar) = registrar() else {
        return;
    };
    match registrar.install() {
        Ok(_) => {
            println!("{INSTALLED_MESSAGE}");
            terminate();
        }
        Err(err) => {
            warn!(%err, "install at login failed");
            eprintln!("{err}");
        }
    }
}

fn uninstall_login_item() {
    let Some(registrar) = registrar() else {
        return;
    };
    match registrar.uninstall() {
        Ok(outcome) => println!("{}", outcome.message()),
        Err(err) => {
            warn!(%err, "uninstall from login failed");
            eprintln!("{err}");
        }
    }
}

unsafe fn open_external(url: &str) {
    let nsurl: id = msg_send![get_class("NSURL"), URLWithString: nsstring_id(url)];
    if nsurl == nil {
        warn!(url, "not a valid URL");
        return;
    }
    let workspace: id = msg_send![get_class("NSWorkspace"), sharedWorkspace];
    let opened: bool = msg_send![workspace, openURL: nsurl];
    if !opened {
        warn!(url, "default browser refused the URL");
    }
}
