//! Window dragging from the strip along the top of the overlay.

use block2::RcBlock;

use crate::platform::macos::app::host::{IVAR_DRAG_AREA, IVAR_MOUSE_MONITOR, IVAR_WINDOW};
use crate::platform::macos::ffi::bridge::{
    get_class, host_ivar, id, msg_send, nil, set_host_ivar, NSPoint,
};
use crate::platform::macos::ffi::NS_EVENT_MASK_LEFT_MOUSE_DOWN;

/// Left clicks that land on the drag strip itself (not on its buttons or
/// selectors) move the borderless overlay.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn install_drag_monitor(host: id) {
    if host_ivar(host, IVAR_MOUSE_MONITOR) != nil {
        return;
    }

    let block = RcBlock::new(move |event: id| -> id {
        unsafe {
            let overlay = host_ivar(host, IVAR_WINDOW);
            let window: id = msg_send![event, window];
            if overlay == nil || window != overlay {
                return event;
            }
            let drag_area = host_ivar(host, IVAR_DRAG_AREA);
            let content: id = msg_send![window, contentView];
            let superview: id = msg_send![content, superview];
            let location: NSPoint = msg_send![event, locationInWindow];
            let point: NSPoint = if superview != nil {
                msg_send![superview, convertPoint: location, fromView: nil]
            } else {
                location
            };
            let hit: id = msg_send![content, hitTest: point];
            if hit != nil && hit == drag_area {
                let _: () = msg_send![window, performWindowDragWithEvent: event];
                return nil;
            }
            event
        }
    });

    let monitor: id = msg_send![
        get_class("NSEvent"),
        addLocalMonitorForEventsMatchingMask: NS_EVENT_MASK_LEFT_MOUSE_DOWN,
        handler: &*block
    ];
    set_host_ivar(host, IVAR_MOUSE_MONITOR, monitor);
}
