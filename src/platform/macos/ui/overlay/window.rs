//! Borderless overlay window with rounded corners and a drag strip.

use objc2::runtime::{AnyClass, AnyObject, Bool, ClassBuilder, Sel};
use objc2::sel;

use crate::model::{
    DRAGGABLE_AREA_HEIGHT, WINDOW_CORNER_RADIUS, WINDOW_FRAME, WINDOW_FRAME_AUTOSAVE_NAME,
};
use crate::platform::macos::app::host::{IVAR_CONTENT_VIEW, IVAR_DRAG_AREA, IVAR_WINDOW};
use crate::platform::macos::ffi::bridge::{
    get_class, host_ivar, id, msg_send, nil, nsstring_id, set_host_ivar, string_from_ns, CGColor,
    NSApp, NSPoint, NSRect, NSSize, NO, YES,
};
use crate::platform::macos::ffi::{
    NS_BACKING_STORE_BUFFERED, NS_COLLECTION_FULL_SCREEN_AUXILIARY,
    NS_COLLECTION_MOVE_TO_ACTIVE_SPACE, NS_COLLECTION_STATIONARY, NS_FLOATING_WINDOW_LEVEL,
    NS_VIEW_HEIGHT_SIZABLE, NS_VIEW_MIN_Y_MARGIN, NS_VIEW_WIDTH_SIZABLE,
    NS_WINDOW_STYLE_BORDERLESS, NS_WINDOW_STYLE_RESIZABLE,
};

use super::selectors::create_chrome;

/// Borderless windows refuse key status unless a subclass allows it.
unsafe fn overlay_window_class() -> &'static AnyClass {
    let class_name = c"QuiperOverlayWindow";
    if let Some(cls) = AnyClass::get(class_name) {
        return cls;
    }
    let Some(mut builder) = ClassBuilder::new(class_name, get_class("NSWindow")) else {
        panic!("QuiperOverlayWindow already registered");
    };
    builder.add_method(
        sel!(canBecomeKeyWindow),
        can_become_key as unsafe extern "C-unwind" fn(_, _) -> _,
    );
    builder.add_method(
        sel!(canBecomeMainWindow),
        can_become_key as unsafe extern "C-unwind" fn(_, _) -> _,
    );
    builder.register()
}

unsafe extern "C-unwind" fn can_become_key(_this: &AnyObject, _cmd: Sel) -> Bool {
    YES
}

/// Creates the hidden overlay window, its content view and drag strip,
/// and stores them on the host.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn create_overlay_window(host: id) -> id {
    let (x, y, w, h) = WINDOW_FRAME;
    let frame = NSRect::new(NSPoint::new(x, y), NSSize::new(w, h));

    let window: id = msg_send![overlay_window_class(), alloc];
    let window: id = msg_send![
        window,
        initWithContentRect: frame,
        styleMask: NS_WINDOW_STYLE_BORDERLESS | NS_WINDOW_STYLE_RESIZABLE,
        backing: NS_BACKING_STORE_BUFFERED,
        defer: NO
    ];
    let _: () = msg_send![window, setReleasedWhenClosed: NO];
    let _: () = msg_send![window, setLevel: NS_FLOATING_WINDOW_LEVEL];
    let _: () = msg_send![
        window,
        setCollectionBehavior: NS_COLLECTION_MOVE_TO_ACTIVE_SPACE
            | NS_COLLECTION_FULL_SCREEN_AUXILIARY
            | NS_COLLECTION_STATIONARY
    ];
    let _: bool = msg_send![window, setFrameAutosaveName: nsstring_id(WINDOW_FRAME_AUTOSAVE_NAME)];
    let _: () = msg_send![window, setOpaque: NO];
    let clear: id = msg_send![get_class("NSColor"), clearColor];
    let _: () = msg_send![window, setBackgroundColor: clear];
    let _: () = msg_send![window, setHasShadow: YES];
    let _: () = msg_send![window, setDelegate: host];
    set_host_ivar(host, IVAR_WINDOW, window);

    let dark = is_dark(window);

    // Content view with rounded corners
    let window_frame: NSRect = msg_send![window, frame];
    let content_rect: NSRect = msg_send![window, contentRectForFrameRect: window_frame];
    let bounds = NSRect::new(NSPoint::new(0.0, 0.0), content_rect.size);
    let content: id = msg_send![get_class("NSView"), alloc];
    let content: id = msg_send![content, initWithFrame: bounds];
    let _: () = msg_send![content, setWantsLayer: YES];
    let _: () = msg_send![content, setAutoresizingMask: NS_VIEW_WIDTH_SIZABLE | NS_VIEW_HEIGHT_SIZABLE];
    let layer: id = msg_send![content, layer];
    let _: () = msg_send![layer, setCornerRadius: WINDOW_CORNER_RADIUS];
    let _: () = msg_send![layer, setMasksToBounds: YES];
    set_layer_background(content, if dark { 0.1 } else { 1.0 }, 1.0);
    let _: () = msg_send![window, setContentView: content];
    set_host_ivar(host, IVAR_CONTENT_VIEW, content);

    // Drag strip along the top edge
    let strip_frame = NSRect::new(
        NSPoint::new(0.0, bounds.size.height - DRAGGABLE_AREA_HEIGHT),
        NSSize::new(bounds.size.width, DRAGGABLE_AREA_HEIGHT),
    );
    let drag_area: id = msg_send![get_class("NSView"), alloc];
    let drag_area: id = msg_send![drag_area, initWithFrame: strip_frame];
    let _: () = msg_send![drag_area, setWantsLayer: YES];
    let _: () = msg_send![drag_area, setAutoresizingMask: NS_VIEW_WIDTH_SIZABLE | NS_VIEW_MIN_Y_MARGIN];
    set_layer_background(drag_area, if dark { 0.2 } else { 0.9 }, 0.8);
    let _: () = msg_send![content, addSubview: drag_area];
    set_host_ivar(host, IVAR_DRAG_AREA, drag_area);

    create_chrome(host, drag_area);
    window
}

unsafe fn is_dark(window: id) -> bool {
    let appearance: id = msg_send![window, effectiveAppearance];
    if appearance == nil {
        return false;
    }
    let name: id = msg_send![appearance, name];
    string_from_ns(name).contains("Dark")
}

unsafe fn set_layer_background(view: id, white: f64, alpha: f64) {
    let color: id = msg_send![get_class("NSColor"), colorWithCalibratedWhite: white, alpha: alpha];
    let cg_color: *const CGColor = msg_send![color, CGColor];
    let layer: id = msg_send![view, layer];
    let _: () = msg_send![layer, setBackgroundColor: cg_color];
}

/// Frame for a web view: the content bounds below the drag strip.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn web_view_frame(host: id) -> NSRect {
    let content = host_ivar(host, IVAR_CONTENT_VIEW);
    let bounds: NSRect = if content != nil {
        msg_send![content, bounds]
    } else {
        let (_, _, w, h) = WINDOW_FRAME;
        NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(w, h))
    };
    NSRect::new(
        NSPoint::new(0.0, 0.0),
        NSSize::new(
            bounds.size.width,
            (bounds.size.height - DRAGGABLE_AREA_HEIGHT).max(0.0),
        ),
    )
}

/// Brings the overlay to the front and activates the app.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn show_window(host: id) {
    let window = host_ivar(host, IVAR_WINDOW);
    if window == nil {
        return;
    }
    let _: () = msg_send![window, makeKeyAndOrderFront: nil];
    let _: () = msg_send![NSApp(), activateIgnoringOtherApps: YES];
}
