//! Modal prompt that records the next key combination as the new hotkey.

use block2::RcBlock;
use tracing::info;

use crate::events::{publish, AppEvent};
use crate::model::{
    HotkeyDescriptor, HOTKEY_CAPTURE_DISMISS_SECS, HOTKEY_CAPTURE_PLACEHOLDER,
    HOTKEY_CAPTURE_PROMPT,
};
use crate::platform::macos::app::host::{
    IVAR_CAPTURE_MONITOR, IVAR_CAPTURE_OVERLAY, IVAR_CONTENT_VIEW,
};
use crate::platform::macos::ffi::bridge::{
    get_class, host_ivar, id, msg_send, nil, nsstring_id, sel, set_host_ivar, CGColor, NSPoint,
    NSRect, NSSize, NO, YES,
};
use crate::platform::macos::ffi::{
    NS_EVENT_MASK_KEY_DOWN, NS_VIEW_HEIGHT_SIZABLE, NS_VIEW_WIDTH_SIZABLE,
};

const CONTAINER_SIZE: (f64, f64) = (320.0, 120.0);
const NS_TEXT_ALIGNMENT_CENTER: isize = 1;

/// Dims the overlay, shows the prompt and waits for one key-down.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn begin_capture(host: id) {
    if host_ivar(host, IVAR_CAPTURE_MONITOR) != nil {
        return;
    }
    let content = host_ivar(host, IVAR_CONTENT_VIEW);
    if content == nil {
        return;
    }

    let bounds: NSRect = msg_send![content, bounds];
    let overlay: id = msg_send![get_class("NSView"), alloc];
    let overlay: id = msg_send![overlay, initWithFrame: bounds];
    let _: () = msg_send![overlay, setWantsLayer: YES];
    let _: () = msg_send![overlay, setAutoresizingMask: NS_VIEW_WIDTH_SIZABLE | NS_VIEW_HEIGHT_SIZABLE];
    layer_fill(overlay, 0.0, 0.5);

    let (cw, ch) = CONTAINER_SIZE;
    let container: id = msg_send![get_class("NSView"), alloc];
    let container: id = msg_send![
        container,
        initWithFrame: NSRect::new(
            NSPoint::new((bounds.size.width - cw) / 2.0, (bounds.size.height - ch) / 2.0),
            NSSize::new(cw, ch),
        )
    ];
    let _: () = msg_send![container, setWantsLayer: YES];
    layer_fill(container, 0.15, 0.95);
    let layer: id = msg_send![container, layer];
    let _: () = msg_send![layer, setCornerRadius: 10.0f64];
    let _: () = msg_send![overlay, addSubview: container];

    let prompt = label(HOTKEY_CAPTURE_PROMPT, NSRect::new(
        NSPoint::new(10.0, ch - 45.0),
        NSSize::new(cw - 20.0, 24.0),
    ));
    let _: () = msg_send![container, addSubview: prompt];
    let display = label(HOTKEY_CAPTURE_PLACEHOLDER, NSRect::new(
        NSPoint::new(10.0, 25.0),
        NSSize::new(cw - 20.0, 30.0),
    ));
    let _: () = msg_send![container, addSubview: display];

    let _: () = msg_send![content, addSubview: overlay];
    set_host_ivar(host, IVAR_CAPTURE_OVERLAY, overlay);

    let block = RcBlock::new(move |event: id| -> id {
        unsafe {
            let key_code: u16 = msg_send![event, keyCode];
            let flags: u64 = msg_send![event, modifierFlags];
            let hotkey = HotkeyDescriptor::from_event(flags, key_code);
            let _: () = msg_send![display, setStringValue: nsstring_id(&hotkey.display_string())];
            info!(hotkey = %hotkey.display_string(), "hotkey recorded");
            publish(AppEvent::HotkeyRecorded(hotkey));
            finish_capture(host);
            nil
        }
    });
    let monitor: id = msg_send![
        get_class("NSEvent"),
        addLocalMonitorForEventsMatchingMask: NS_EVENT_MASK_KEY_DOWN,
        handler: &*block
    ];
    set_host_ivar(host, IVAR_CAPTURE_MONITOR, monitor);
}

/// Removes the monitor now and the prompt after a short delay, so the
/// recorded combination stays readable.
unsafe fn finish_capture(host: id) {
    let monitor = host_ivar(host, IVAR_CAPTURE_MONITOR);
    if monitor != nil {
        let _: () = msg_send![get_class("NSEvent"), removeMonitor: monitor];
        set_host_ivar(host, IVAR_CAPTURE_MONITOR, nil);
    }
    let overlay = host_ivar(host, IVAR_CAPTURE_OVERLAY);
    if overlay != nil {
        let _: () = msg_send![
            overlay,
            performSelector: sel!(removeFromSuperview),
            withObject: nil,
            afterDelay: HOTKEY_CAPTURE_DISMISS_SECS
        ];
        set_host_ivar(host, IVAR_CAPTURE_OVERLAY, nil);
    }
}

unsafe fn label(text: &str, frame: NSRect) -> id {
    let field: id = msg_send![get_class("NSTextField"), labelWithString: nsstring_id(text)];
    let _: () = msg_send![field, setFrame: frame];
    let _: () = msg_send![field, setAlignment: NS_TEXT_ALIGNMENT_CENTER];
    let _: () = msg_send![field, setEditable: NO];
    let white: id = msg_send![get_class("NSColor"), whiteColor];
    let _: () = msg_send![field, setTextColor: white];
    field
}

unsafe fn layer_fill(view: id, white: f64, alpha: f64) {
    let color: id = msg_send![get_class("NSColor"), colorWithCalibratedWhite: white, alpha: alpha];
    let cg_color: *const CGColor = msg_send![color, CGColor];
    let layer: id = msg_send![view, layer];
    let _: () = msg_send![layer, setBackgroundColor: cg_color];
}
