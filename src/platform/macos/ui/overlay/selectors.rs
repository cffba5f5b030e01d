//! Chrome in the drag strip: close button, service and session selectors.

use crate::controller::SelectorState;
use crate::model::{SlotIndex, UI_PADDING};
use crate::platform::macos::app::host::{
    IVAR_DRAG_AREA, IVAR_SERVICE_SELECTOR, IVAR_SESSION_SELECTOR,
};
use crate::platform::macos::ffi::bridge::{
    get_class, host_ivar, id, msg_send, nil, nsstring_id, sel, set_host_ivar, NSPoint, NSRect,
    NSSize, NO,
};
use crate::platform::macos::ffi::{NS_VIEW_MIN_X_MARGIN, NS_VIEW_MIN_Y_MARGIN};

const CONTROL_HEIGHT: f64 = 25.0;
const CLOSE_BUTTON_SIZE: f64 = 20.0;

/// `NSImageOnly`
const IMAGE_ONLY: u64 = 1;

/// Builds the close button and both selectors inside `drag_area`.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn create_chrome(host: id, drag_area: id) {
    let close: id = msg_send![get_class("NSButton"), alloc];
    let close: id = msg_send![
        close,
        initWithFrame: NSRect::new(
            NSPoint::new(UI_PADDING, UI_PADDING),
            NSSize::new(CLOSE_BUTTON_SIZE, CLOSE_BUTTON_SIZE),
        )
    ];
    let image: id = msg_send![
        get_class("NSImage"),
        imageWithSystemSymbolName: nsstring_id("xmark.circle.fill"),
        accessibilityDescription: nsstring_id("Close")
    ];
    if image != nil {
        let _: () = msg_send![close, setImage: image];
        let _: () = msg_send![close, setImagePosition: IMAGE_ONLY];
    } else {
        let _: () = msg_send![close, setTitle: nsstring_id("×")];
    }
    let _: () = msg_send![close, setBordered: NO];
    let _: () = msg_send![close, setTarget: host];
    let _: () = msg_send![close, setAction: sel!(hideWindow:)];
    let _: () = msg_send![drag_area, addSubview: close];

    let services = new_selector(host, drag_area, sel!(serviceChanged:));
    set_host_ivar(host, IVAR_SERVICE_SELECTOR, services);

    let sessions = new_selector(host, drag_area, sel!(sessionChanged:));
    let _: () = msg_send![sessions, setSegmentCount: SlotIndex::COUNT as isize];
    for (segment, index) in SlotIndex::display_order().enumerate() {
        let _: () = msg_send![
            sessions,
            setLabel: nsstring_id(&index.to_string()),
            forSegment: segment as isize
        ];
    }
    set_host_ivar(host, IVAR_SESSION_SELECTOR, sessions);
}

unsafe fn new_selector(host: id, drag_area: id, action: objc2::runtime::Sel) -> id {
    let control: id = msg_send![get_class("NSSegmentedControl"), alloc];
    let control: id = msg_send![
        control,
        initWithFrame: NSRect::new(NSPoint::new(0.0, 0.0), NSSize::new(0.0, CONTROL_HEIGHT))
    ];
    let _: () = msg_send![control, setAutoresizingMask: NS_VIEW_MIN_X_MARGIN | NS_VIEW_MIN_Y_MARGIN];
    let _: () = msg_send![control, setSegmentStyle: 0isize];
    let _: () = msg_send![control, setTarget: host];
    let _: () = msg_send![control, setAction: action];
    let _: () = msg_send![drag_area, addSubview: control];
    control
}

/// Mirrors the controller's selection in both selectors and re-lays them
/// out right-aligned in the drag strip.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn sync_selectors(host: id, state: &SelectorState) {
    let services = host_ivar(host, IVAR_SERVICE_SELECTOR);
    let sessions = host_ivar(host, IVAR_SESSION_SELECTOR);
    if services == nil || sessions == nil {
        return;
    }

    let _: () = msg_send![services, setSegmentCount: state.labels.len() as isize];
    for (segment, label) in state.labels.iter().enumerate() {
        let _: () = msg_send![
            services,
            setLabel: nsstring_id(label),
            forSegment: segment as isize
        ];
    }
    let _: () = msg_send![services, setSelectedSegment: segment_or_none(state.selected_service)];
    let _: () = msg_send![sessions, setSelectedSegment: segment_or_none(state.selected_slot)];

    layout_selectors(host, services, sessions);
}

fn segment_or_none(segment: Option<usize>) -> isize {
    segment.map_or(-1, |s| s as isize)
}

unsafe fn layout_selectors(host: id, services: id, sessions: id) {
    let drag_area = host_ivar(host, IVAR_DRAG_AREA);
    if drag_area == nil {
        return;
    }
    let bounds: NSRect = msg_send![drag_area, bounds];
    let y = (bounds.size.height - CONTROL_HEIGHT) / 2.0;

    let _: () = msg_send![services, sizeToFit];
    let service_frame: NSRect = msg_send![services, frame];
    let service_x = bounds.size.width - service_frame.size.width - UI_PADDING;
    let _: () = msg_send![
        services,
        setFrame: NSRect::new(
            NSPoint::new(service_x, y),
            NSSize::new(service_frame.size.width, CONTROL_HEIGHT),
        )
    ];

    let _: () = msg_send![sessions, sizeToFit];
    let session_frame: NSRect = msg_send![sessions, frame];
    let session_x = service_x - UI_PADDING - session_frame.size.width;
    let _: () = msg_send![
        sessions,
        setFrame: NSRect::new(
            NSPoint::new(session_x, y),
            NSSize::new(session_frame.size.width, CONTROL_HEIGHT),
        )
    ];
}
