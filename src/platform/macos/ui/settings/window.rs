//! Settings window construction, show and hide.

use tracing::{debug, warn};

use crate::events::publisher;
use crate::model::service::TEMPLATES;
use crate::model::{ServiceField, SETTINGS_WINDOW_SIZE};
use crate::platform::macos::app::host::{
    IVAR_SETTINGS_TABLE, IVAR_SETTINGS_WINDOW, IVAR_TEMPLATE_POPUP,
};
use crate::platform::macos::app::with_state;
use crate::platform::macos::ffi::bridge::{
    get_class, host_ivar, id, msg_send, nil, nsstring_id, sel, set_host_ivar, NSApp, NSPoint,
    NSRect, NSSize, Sel, NO, YES,
};
use crate::platform::macos::ffi::{
    NS_BACKING_STORE_BUFFERED, NS_COLLECTION_FULL_SCREEN_AUXILIARY,
    NS_COLLECTION_MOVE_TO_ACTIVE_SPACE, NS_DRAG_OPERATION_MOVE, NS_FLOATING_WINDOW_LEVEL,
    NS_VIEW_HEIGHT_SIZABLE, NS_VIEW_WIDTH_SIZABLE, NS_WINDOW_STYLE_CLOSABLE,
    NS_WINDOW_STYLE_RESIZABLE, NS_WINDOW_STYLE_TITLED,
};
use crate::settings::SettingsEditor;

use super::table::{close_editor, open_editor, BLANK_TEMPLATE, ROW_DRAG_TYPE};

const MARGIN: f64 = 20.0;
const BUTTON_ROW_HEIGHT: f64 = 44.0;

/// Opens the editor on the controller's service list and shows the window.
///
/// The rows come from the live matrix rather than a fresh file read so the
/// editor publishes the same ids the controller's sessions are keyed by.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn show_settings(host: id) {
    let Some((store, rows)) = with_state(|state| {
        (
            state.config_store.clone(),
            state.controller.matrix().services().to_vec(),
        )
    }) else {
        return;
    };
    let Some(publisher) = publisher() else {
        warn!("event bus not initialized; settings unavailable");
        return;
    };
    open_editor(SettingsEditor::with_rows(rows, store, publisher));

    let mut window = host_ivar(host, IVAR_SETTINGS_WINDOW);
    if window == nil {
        window = create_settings_window(host);
        center_on_mouse_screen(window);
    }
    let table = host_ivar(host, IVAR_SETTINGS_TABLE);
    if table != nil {
        let _: () = msg_send![table, reloadData];
    }
    let _: () = msg_send![window, makeKeyAndOrderFront: nil];
    let _: () = msg_send![NSApp(), activateIgnoringOtherApps: YES];
    debug!("settings shown");
}

/// Commits any in-progress cell edit, hides the window and drops the editor.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn hide_settings(host: id) {
    let window = host_ivar(host, IVAR_SETTINGS_WINDOW);
    if window == nil {
        return;
    }
    let _: bool = msg_send![window, makeFirstResponder: nil];
    let _: () = msg_send![window, orderOut: nil];
    close_editor();
    debug!("settings hidden");
}

unsafe fn create_settings_window(host: id) -> id {
    let (w, h) = SETTINGS_WINDOW_SIZE;
    let window: id = msg_send![get_class("NSWindow"), alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(w, h)),
        styleMask: NS_WINDOW_STYLE_TITLED | NS_WINDOW_STYLE_CLOSABLE | NS_WINDOW_STYLE_RESIZABLE,
        backing: NS_BACKING_STORE_BUFFERED,
        defer: NO
    ];
    let _: () = msg_send![window, setTitle: nsstring_id("Settings")];
    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setLevel: NS_FLOATING_WINDOW_LEVEL];
    let _: () = msg_send![
        window,
        setCollectionBehavior: NS_COLLECTION_MOVE_TO_ACTIVE_SPACE | NS_COLLECTION_FULL_SCREEN_AUXILIARY
    ];
    let _: () = msg_send![window, setDelegate: host];
    set_host_ivar(host, IVAR_SETTINGS_WINDOW, window);

    let content: id = msg_send![window, contentView];

    // Service table inside a scroll view
    let scroll: id = msg_send![get_class("NSScrollView"), alloc];
    let scroll: id = msg_send![
        scroll,
        initWithFrame: NSRect::new(
            NSPoint::new(MARGIN, BUTTON_ROW_HEIGHT),
            NSSize::new(w - 2.0 * MARGIN, h - BUTTON_ROW_HEIGHT - MARGIN),
        )
    ];
    let _: () = msg_send![scroll, setAutoresizingMask: NS_VIEW_WIDTH_SIZABLE | NS_VIEW_HEIGHT_SIZABLE];
    let _: () = msg_send![scroll, setHasVerticalScroller: YES];
    let _: () = msg_send![scroll, setBorderType: 2u64]; // NSBezelBorder

    let table: id = msg_send![get_class("NSTableView"), new];
    for field in ServiceField::ALL {
        let column: id = msg_send![get_class("NSTableColumn"), alloc];
        let column: id = msg_send![column, initWithIdentifier: nsstring_id(field.as_str())];
        let _: () = msg_send![column, setTitle: nsstring_id(field.title())];
        let _: () = msg_send![column, setWidth: column_width(field)];
        let _: () = msg_send![column, setEditable: YES];
        let _: () = msg_send![table, addTableColumn: column];
    }
    let _: () = msg_send![table, setUsesAlternatingRowBackgroundColors: YES];
    let _: () = msg_send![table, setAllowsMultipleSelection: YES];
    let _: () = msg_send![table, setDataSource: host];
    let _: () = msg_send![table, setDelegate: host];
    let drag_types: id = msg_send![
        get_class("NSArray"),
        arrayWithObject: nsstring_id(ROW_DRAG_TYPE)
    ];
    let _: () = msg_send![table, registerForDraggedTypes: drag_types];
    let _: () = msg_send![
        table,
        setDraggingSourceOperationMask: NS_DRAG_OPERATION_MOVE,
        forLocal: YES
    ];
    let _: () = msg_send![scroll, setDocumentView: table];
    let _: () = msg_send![content, addSubview: scroll];
    set_host_ivar(host, IVAR_SETTINGS_TABLE, table);

    // Add / remove buttons and the template picker
    let add = button("+", sel!(addService:), host, MARGIN);
    let _: () = msg_send![content, addSubview: add];
    let remove = button("−", sel!(removeService:), host, MARGIN + 36.0);
    let _: () = msg_send![content, addSubview: remove];

    let popup: id = msg_send![get_class("NSPopUpButton"), alloc];
    let popup: id = msg_send![
        popup,
        initWithFrame: NSRect::new(NSPoint::new(MARGIN + 80.0, 10.0), NSSize::new(220.0, 26.0)),
        pullsDown: NO
    ];
    let _: () = msg_send![popup, addItemWithTitle: nsstring_id(BLANK_TEMPLATE)];
    for template in TEMPLATES {
        let _: () = msg_send![popup, addItemWithTitle: nsstring_id(template.name)];
    }
    let _: () = msg_send![content, addSubview: popup];
    set_host_ivar(host, IVAR_TEMPLATE_POPUP, popup);

    window
}

unsafe fn button(title: &str, action: Sel, target: id, x: f64) -> id {
    let button: id = msg_send![
        get_class("NSButton"),
        buttonWithTitle: nsstring_id(title),
        target: target,
        action: action
    ];
    let _: () = msg_send![
        button,
        setFrame: NSRect::new(NSPoint::new(x, 10.0), NSSize::new(32.0, 26.0))
    ];
    button
}

fn column_width(field: ServiceField) -> f64 {
    match field {
        ServiceField::Name => 150.0,
        ServiceField::Url => 320.0,
        ServiceField::FocusSelector => 190.0,
    }
}

/// Centers `window` on the screen under the mouse pointer.
unsafe fn center_on_mouse_screen(window: id) {
    let mouse: NSPoint = msg_send![get_class("NSEvent"), mouseLocation];
    let screens: id = msg_send![get_class("NSScreen"), screens];
    let count: usize = msg_send![screens, count];
    let mut target: id = msg_send![get_class("NSScreen"), mainScreen];

    for i in 0..count {
        let screen: id = msg_send![screens, objectAtIndex: i];
        let frame: NSRect = msg_send![screen, frame];
        if mouse.x >= frame.origin.x
            && mouse.x < frame.origin.x + frame.size.width
            && mouse.y >= frame.origin.y
            && mouse.y < frame.origin.y + frame.size.height
        {
            target = screen;
            break;
        }
    }
    if target == nil {
        let _: () = msg_send![window, center];
        return;
    }

    let screen_frame: NSRect = msg_send![target, frame];
    let window_frame: NSRect = msg_send![window, frame];
    let origin = NSPoint::new(
        screen_frame.origin.x + (screen_frame.size.width - window_frame.size.width) / 2.0,
        screen_frame.origin.y + (screen_frame.size.height - window_frame.size.height) / 2.0,
    );
    let _: () = msg_send![window, setFrameOrigin: origin];
}
