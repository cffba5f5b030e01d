//! Status bar (menu bar) item and its menu.

use tracing::warn;

use crate::events::MenuCommand;
use crate::model::APP_NAME;
use crate::platform::macos::app::host::{IVAR_INSPECTOR_ITEM, IVAR_STATUS_ITEM};
use crate::platform::macos::ffi::bridge::{
    get_class, host_ivar, id, msg_send, nil, nsstring_id, sel, set_host_ivar, NSSize, YES,
};

/// `NSSquareStatusItemLength`
const SQUARE_STATUS_ITEM_LENGTH: f64 = -2.0;

const STATUS_SYMBOL: &str = "bubble.left.and.bubble.right";

/// Adds the menu bar item; every entry targets the host's `menuAction:`.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn install_status_bar(host: id) {
    let status_bar: id = msg_send![get_class("NSStatusBar"), systemStatusBar];
    let status_item: id = msg_send![status_bar, statusItemWithLength: SQUARE_STATUS_ITEM_LENGTH];
    let _: id = msg_send![status_item, retain];
    set_host_ivar(host, IVAR_STATUS_ITEM, status_item);

    let button: id = msg_send![status_item, button];
    if button != nil {
        let icon: id = msg_send![
            get_class("NSImage"),
            imageWithSystemSymbolName: nsstring_id(STATUS_SYMBOL),
            accessibilityDescription: nsstring_id(APP_NAME)
        ];
        if icon != nil {
            let _: () = msg_send![icon, setSize: NSSize::new(18.0, 18.0)];
            let _: () = msg_send![icon, setTemplate: YES];
            let _: () = msg_send![button, setImage: icon];
        } else {
            warn!("status symbol unavailable, using a text title");
            let _: () = msg_send![button, setTitle: nsstring_id("Q")];
        }
    }

    let menu = create_status_menu(host);
    let _: () = msg_send![status_item, setMenu: menu];
}

unsafe fn create_status_menu(host: id) -> id {
    let menu: id = msg_send![get_class("NSMenu"), new];

    for entry in MenuCommand::LAYOUT {
        let Some(command) = entry else {
            let separator: id = msg_send![get_class("NSMenuItem"), separatorItem];
            let _: () = msg_send![menu, addItem: separator];
            continue;
        };
        let item: id = msg_send![get_class("NSMenuItem"), alloc];
        let item: id = msg_send![
            item,
            initWithTitle: nsstring_id(command.title()),
            action: sel!(menuAction:),
            keyEquivalent: nsstring_id(command.key_equivalent())
        ];
        let _: () = msg_send![item, setTarget: host];
        let _: () = msg_send![item, setTag: command.tag()];
        let _: () = msg_send![menu, addItem: item];

        if command == MenuCommand::ToggleInspector {
            set_host_ivar(host, IVAR_INSPECTOR_ITEM, item);
        }
    }

    menu
}

/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn set_inspector_title(host: id, title: &str) {
    let item = host_ivar(host, IVAR_INSPECTOR_ITEM);
    if item != nil {
        let _: () = msg_send![item, setTitle: nsstring_id(title)];
    }
}
