//! Thin helpers over objc2 for dynamic message sending.
//!
//! The shell talks to AppKit and WebKit through `msg_send!` on untyped
//! `id` pointers; this module gathers the aliases, string conversions,
//! class lookup and ivar access that pattern needs.

#![allow(non_upper_case_globals)]

use std::ffi::{c_char, CStr, CString};

pub use objc2::runtime::{AnyClass, AnyObject, Bool, Sel};
pub use objc2::{msg_send, sel};

pub use block2::{Block, RcBlock};
pub use objc2::rc::Retained;
pub use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

use objc2::encode::{Encode, Encoding, RefEncode};
use objc2::ClassType;
use objc2_app_kit::NSApplication;

/// Untyped Objective-C object pointer.
pub type id = *mut AnyObject;

pub const nil: id = std::ptr::null_mut();

/// Objective-C `BOOL` values.
pub const YES: Bool = Bool::YES;
pub const NO: Bool = Bool::NO;

/// Opaque `CGColorRef` target, so layer colors pass the encoding checks.
#[repr(C)]
pub struct CGColor {
    _private: [u8; 0],
}

unsafe impl RefEncode for CGColor {
    const ENCODING_REF: Encoding = Encoding::Pointer(&Encoding::Struct("CGColor", &[]));
}

/// The shared `NSApplication`.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    unsafe { msg_send![NSApplication::class(), sharedApplication] }
}

#[inline]
pub fn nsstring(s: &str) -> Retained<NSString> {
    NSString::from_str(s)
}

/// Autoreleased `NSString` as a raw pointer, for `msg_send!` arguments.
#[inline]
pub fn nsstring_id(s: &str) -> id {
    let ns = NSString::from_str(s);
    Retained::autorelease_return(ns) as id
}

/// Copies an `NSString` into a Rust `String`; `nil` becomes empty.
///
/// # Safety
/// `string` must be `nil` or a valid `NSString`.
pub unsafe fn string_from_ns(string: id) -> String {
    if string.is_null() {
        return String::new();
    }
    let ptr: *const c_char = msg_send![string, UTF8String];
    if ptr.is_null() {
        return String::new();
    }
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

/// Looks up an AppKit or WebKit class.
///
/// Panics when the class is missing, which only happens when a framework
/// failed to link.
#[inline]
pub fn get_class(name: &str) -> &'static AnyClass {
    let c_name = CString::new(name).unwrap_or_default();
    AnyClass::get(&c_name).unwrap_or_else(|| panic!("class '{name}' not found"))
}

/// Typed access to instance variables declared with `ClassBuilder::add_ivar`.
pub trait ObjectExt {
    /// # Safety
    /// The ivar must exist and be of type `T`.
    unsafe fn load_ivar<T: Encode>(&self, name: &str) -> &T;

    /// # Safety
    /// The ivar must exist and be of type `T`.
    unsafe fn store_ivar<T: Encode>(&mut self, name: &str, value: T);
}

impl ObjectExt for AnyObject {
    unsafe fn load_ivar<T: Encode>(&self, name: &str) -> &T {
        let c_name = CString::new(name).unwrap_or_default();
        let ivar = self
            .class()
            .instance_variable(&c_name)
            .unwrap_or_else(|| panic!("ivar '{name}' not found"));
        ivar.load::<T>(self)
    }

    unsafe fn store_ivar<T: Encode>(&mut self, name: &str, value: T) {
        let c_name = CString::new(name).unwrap_or_default();
        let ivar = self
            .class()
            .instance_variable(&c_name)
            .unwrap_or_else(|| panic!("ivar '{name}' not found"));
        *ivar.load_mut::<T>(self) = value;
    }
}

/// Reads an `id` ivar of the host object.
///
/// # Safety
/// `host` must be a live host instance declaring `name`.
#[inline]
pub unsafe fn host_ivar(host: id, name: &str) -> id {
    *(*host).load_ivar::<id>(name)
}

/// Stores an `id` ivar of the host object.
///
/// # Safety
/// `host` must be a live host instance declaring `name`.
#[inline]
pub unsafe fn set_host_ivar(host: id, name: &str, value: id) {
    (*host).store_ivar::<id>(name, value);
}

/// Runs `f` inside an `NSAutoreleasePool`.
#[inline]
pub fn autoreleasepool<R, F: FnOnce() -> R>(f: F) -> R {
    unsafe {
        let pool: id = msg_send![get_class("NSAutoreleasePool"), new];
        let result = f();
        let _: () = msg_send![pool, drain];
        result
    }
}
