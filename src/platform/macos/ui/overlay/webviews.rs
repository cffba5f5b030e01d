//! One `WKWebView` per session slot, driven by `ViewCommand`s.
//!
//! Every view shares the default persistent website data store, so cookies
//! and logins are common to all slots and "Clear Web Cache" wipes them all.

use std::cell::RefCell;
use std::collections::HashMap;

use block2::{Block, RcBlock};
use tracing::{debug, info, warn};

use crate::events::{publish, AppEvent};
use crate::model::web::{decide, focus_script};
use crate::model::{NavigationKind, NavigationPolicy, USER_AGENT};
use crate::platform::macos::app::host::{IVAR_CONTENT_VIEW, IVAR_DRAG_AREA, IVAR_WINDOW};
use crate::platform::macos::ffi::bridge::{
    get_class, host_ivar, id, msg_send, nil, nsstring_id, sel, string_from_ns, NO, YES,
};
use crate::platform::macos::ffi::{
    NS_VIEW_HEIGHT_SIZABLE, NS_VIEW_WIDTH_SIZABLE, WK_NAVIGATION_POLICY_ALLOW,
    WK_NAVIGATION_POLICY_CANCEL,
};
use crate::session::{SlotKey, ViewCommand};

use super::window::web_view_frame;

/// `NSWindowBelow`
const WINDOW_BELOW: isize = -1;

thread_local! {
    static WEB_VIEWS: RefCell<HashMap<SlotKey, id>> = RefCell::new(HashMap::new());
}

fn web_view(key: &SlotKey) -> Option<id> {
    WEB_VIEWS.with(|views| views.borrow().get(key).copied())
}

/// Applies one command to the slot's web view.
///
/// # Safety
/// Must be called from the main thread with a live host instance.
pub unsafe fn apply(host: id, command: ViewCommand) {
    match command {
        ViewCommand::Create(key) => create(host, key),
        ViewCommand::Destroy(key) => destroy(&key),
        ViewCommand::Load { key, url } => load(&key, &url),
        ViewCommand::SetHidden { key, hidden } => {
            if let Some(view) = web_view(&key) {
                let _: () = msg_send![view, setHidden: if hidden { YES } else { NO }];
            }
        }
        ViewCommand::FocusInput { key, selector } => focus_input(host, &key, &selector),
        ViewCommand::OpenInspector(key) => inspector(&key, true),
        ViewCommand::CloseInspector(key) => inspector(&key, false),
    }
}

unsafe fn create(host: id, key: SlotKey) {
    if web_view(&key).is_some() {
        return;
    }
    let content = host_ivar(host, IVAR_CONTENT_VIEW);
    if content == nil {
        warn!(service = %key.service, "no content view for web view");
        return;
    }

    let config: id = msg_send![get_class("WKWebViewConfiguration"), new];
    let preferences: id = msg_send![config, preferences];
    let _: () = msg_send![preferences, setJavaScriptCanOpenWindowsAutomatically: YES];
    let enabled: id = msg_send![get_class("NSNumber"), numberWithBool: YES];
    let _: () = msg_send![
        preferences,
        setValue: enabled,
        forKey: nsstring_id("developerExtrasEnabled")
    ];

    let view: id = msg_send![get_class("WKWebView"), alloc];
    let view: id = msg_send![
        view,
        initWithFrame: web_view_frame(host),
        configuration: config
    ];
    let _: () = msg_send![config, release];
    let _: () = msg_send![view, setAutoresizingMask: NS_VIEW_WIDTH_SIZABLE | NS_VIEW_HEIGHT_SIZABLE];
    let _: () = msg_send![view, setNavigationDelegate: host];
    let _: () = msg_send![view, setCustomUserAgent: nsstring_id(USER_AGENT)];
    let _: () = msg_send![view, setHidden: YES];

    let drag_area = host_ivar(host, IVAR_DRAG_AREA);
    let _: () = msg_send![
        content,
        addSubview: view,
        positioned: WINDOW_BELOW,
        relativeTo: drag_area
    ];

    debug!(service = %key.service, slot = %key.index, "web view created");
    WEB_VIEWS.with(|views| views.borrow_mut().insert(key, view));
}

unsafe fn destroy(key: &SlotKey) {
    let Some(view) = WEB_VIEWS.with(|views| views.borrow_mut().remove(key)) else {
        return;
    };
    let _: () = msg_send![view, stopLoading];
    let _: () = msg_send![view, setNavigationDelegate: nil];
    let _: () = msg_send![view, removeFromSuperview];
    let _: () = msg_send![view, release];
    debug!(service = %key.service, slot = %key.index, "web view destroyed");
}

unsafe fn load(key: &SlotKey, url: &str) {
    let Some(view) = web_view(key) else {
        return;
    };
    let nsurl: id = msg_send![get_class("NSURL"), URLWithString: nsstring_id(url)];
    if nsurl == nil {
        warn!(url, service = %key.service, "invalid service URL");
        return;
    }
    let request: id = msg_send![get_class("NSURLRequest"), requestWithURL: nsurl];
    let _: id = msg_send![view, loadRequest: request];
    info!(url, service = %key.service, slot = %key.index, "loading");
}

unsafe fn focus_input(host: id, key: &SlotKey, selector: &str) {
    let Some(view) = web_view(key) else {
        return;
    };
    let window = host_ivar(host, IVAR_WINDOW);
    if window != nil {
        let _: bool = msg_send![window, makeFirstResponder: view];
    }
    if selector.is_empty() {
        return;
    }
    let handler: Option<&Block<dyn Fn(id, id)>> = None;
    let _: () = msg_send![
        view,
        evaluateJavaScript: nsstring_id(&focus_script(selector)),
        completionHandler: handler
    ];
}

unsafe fn inspector(key: &SlotKey, open: bool) {
    let Some(view) = web_view(key) else {
        return;
    };
    let responds: bool = msg_send![view, respondsToSelector: sel!(_inspector)];
    if !responds {
        warn!("web inspector unavailable");
        return;
    }
    let inspector: id = msg_send![view, _inspector];
    if inspector == nil {
        return;
    }
    if open {
        let _: () = msg_send![inspector, show];
    } else {
        let _: () = msg_send![inspector, close];
    }
}

/// Navigation delegate decision for `action` (a `WKNavigationAction`).
///
/// Clicked web links are cancelled here and published as
/// `LinkActivated` so the dispatcher opens them in the default browser.
///
/// # Safety
/// `action` must be a valid `WKNavigationAction`.
pub unsafe fn decide_navigation_policy(action: id) -> isize {
    let navigation_type: isize = msg_send![action, navigationType];
    let request: id = msg_send![action, request];
    let url: id = if request != nil {
        msg_send![request, URL]
    } else {
        nil
    };
    let absolute: id = if url != nil {
        msg_send![url, absoluteString]
    } else {
        nil
    };
    let url = string_from_ns(absolute);

    match decide(NavigationKind::from_webkit(navigation_type), &url) {
        NavigationPolicy::OpenExternally => {
            publish(AppEvent::LinkActivated(url));
            WK_NAVIGATION_POLICY_CANCEL
        }
        NavigationPolicy::Allow => WK_NAVIGATION_POLICY_ALLOW,
    }
}

/// Removes every kind of website data from the shared store.
///
/// # Safety
/// Must be called from the main thread.
pub unsafe fn clear_website_data() {
    let store_class = get_class("WKWebsiteDataStore");
    let store: id = msg_send![store_class, defaultDataStore];
    let types: id = msg_send![store_class, allWebsiteDataTypes];
    let since: id = msg_send![get_class("NSDate"), dateWithTimeIntervalSince1970: 0.0f64];
    let done = RcBlock::new(|| info!("website data cleared"));
    let _: () = msg_send![
        store,
        removeDataOfTypes: types,
        modifiedSince: since,
        completionHandler: &*done
    ];
}
