//! `NSTableView` data source backed by a [`SettingsEditor`].
//!
//! The editor lives in a thread-local while the settings window is open.
//! Each callback borrows it briefly and releases the borrow before asking
//! the table to reload, since `reloadData` calls straight back in.

use std::cell::RefCell;
use std::str::FromStr;

use objc2::runtime::{AnyObject, Bool, Sel};
use tracing::warn;

use crate::error::EditorError;
use crate::model::ServiceField;
use crate::platform::macos::app::host::{IVAR_SETTINGS_TABLE, IVAR_TEMPLATE_POPUP};
use crate::platform::macos::ffi::bridge::{
    get_class, host_ivar, id, msg_send, nil, nsstring_id, string_from_ns, NO, YES,
};
use crate::platform::macos::ffi::{NS_DRAG_OPERATION_MOVE, NS_TABLE_VIEW_DROP_ABOVE};
use crate::settings::{decode_row_indices, encode_row_indices, SettingsEditor};

/// Pasteboard type for rows dragged within the table.
pub const ROW_DRAG_TYPE: &str = "com.quiper.service-rows";

/// Template popup entry that adds a "New Engine" placeholder.
pub const BLANK_TEMPLATE: &str = "Blank";

/// `NSNotFound`
const NOT_FOUND: usize = isize::MAX as usize;

thread_local! {
    static EDITOR: RefCell<Option<SettingsEditor>> = const { RefCell::new(None) };
}

pub fn open_editor(editor: SettingsEditor) {
    EDITOR.with(|cell| *cell.borrow_mut() = Some(editor));
}

pub fn close_editor() {
    EDITOR.with(|cell| cell.borrow_mut().take());
}

fn with_editor<R>(f: impl FnOnce(&mut SettingsEditor) -> R) -> Option<R> {
    EDITOR.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

fn report(result: Option<Result<(), EditorError>>, action: &str) {
    if let Some(Err(err)) = result {
        warn!(%err, action, "settings edit rejected");
    }
}

unsafe fn reload(table: id) {
    if table != nil {
        let _: () = msg_send![table, reloadData];
    }
}

unsafe fn column_field(column: id) -> Option<ServiceField> {
    let identifier: id = msg_send![column, identifier];
    ServiceField::from_str(&string_from_ns(identifier)).ok()
}

unsafe fn index_set_to_vec(indexes: id) -> Vec<usize> {
    let mut rows = Vec::new();
    if indexes == nil {
        return rows;
    }
    let mut index: usize = msg_send![indexes, firstIndex];
    while index != NOT_FOUND {
        rows.push(index);
        index = msg_send![indexes, indexGreaterThanIndex: index];
    }
    rows
}

// === Data source ===

pub unsafe extern "C-unwind" fn number_of_rows(_this: &mut AnyObject, _cmd: Sel, _table: id) -> isize {
    with_editor(|editor| editor.len() as isize).unwrap_or(0)
}

pub unsafe extern "C-unwind" fn object_value(
    _this: &mut AnyObject,
    _cmd: Sel,
    _table: id,
    column: id,
    row: isize,
) -> id {
    let (Some(field), Ok(row)) = (column_field(column), usize::try_from(row)) else {
        return nil;
    };
    let value = with_editor(|editor| editor.field_value(row, field).map(str::to_owned)).flatten();
    match value {
        Some(value) => nsstring_id(&value),
        None => nil,
    }
}

pub unsafe extern "C-unwind" fn set_object_value(
    _this: &mut AnyObject,
    _cmd: Sel,
    _table: id,
    value: id,
    column: id,
    row: isize,
) {
    let (Some(field), Ok(row)) = (column_field(column), usize::try_from(row)) else {
        return;
    };
    let value = string_from_ns(value);
    let unchanged = with_editor(|editor| editor.field_value(row, field) == Some(value.as_str()));
    if unchanged != Some(false) {
        return;
    }
    report(
        with_editor(|editor| editor.edit_field(row, field, value)),
        "edit",
    );
}

// === Drag reordering ===

pub unsafe extern "C-unwind" fn write_rows(
    _this: &mut AnyObject,
    _cmd: Sel,
    _table: id,
    indexes: id,
    pasteboard: id,
) -> Bool {
    let rows = index_set_to_vec(indexes);
    if rows.is_empty() {
        return NO;
    }
    let drag_type = nsstring_id(ROW_DRAG_TYPE);
    let types: id = msg_send![get_class("NSArray"), arrayWithObject: drag_type];
    let _: isize = msg_send![pasteboard, declareTypes: types, owner: nil];
    let written: bool = msg_send![
        pasteboard,
        setString: nsstring_id(&encode_row_indices(&rows)),
        forType: drag_type
    ];
    if written {
        YES
    } else {
        NO
    }
}

pub unsafe extern "C-unwind" fn validate_drop(
    _this: &mut AnyObject,
    _cmd: Sel,
    table: id,
    _info: id,
    row: isize,
    _operation: usize,
) -> usize {
    let _: () = msg_send![table, setDropRow: row, dropOperation: NS_TABLE_VIEW_DROP_ABOVE];
    NS_DRAG_OPERATION_MOVE
}

pub unsafe extern "C-unwind" fn accept_drop(
    _this: &mut AnyObject,
    _cmd: Sel,
    table: id,
    info: id,
    row: isize,
    _operation: usize,
) -> Bool {
    let Ok(to) = usize::try_from(row) else {
        return NO;
    };
    let pasteboard: id = msg_send![info, draggingPasteboard];
    let payload: id = msg_send![pasteboard, stringForType: nsstring_id(ROW_DRAG_TYPE)];
    let from = decode_row_indices(&string_from_ns(payload));
    if from.is_empty() {
        return NO;
    }

    let result = with_editor(|editor| editor.reorder(&from, to));
    let accepted = matches!(result, Some(Ok(())));
    report(result, "reorder");
    reload(table);
    if accepted {
        YES
    } else {
        NO
    }
}

// === Buttons ===

pub unsafe extern "C-unwind" fn add_service(this: &mut AnyObject, _cmd: Sel, _sender: id) {
    let host = this as *mut AnyObject;
    let popup = host_ivar(host, IVAR_TEMPLATE_POPUP);
    let choice = if popup != nil {
        let title: id = msg_send![popup, titleOfSelectedItem];
        string_from_ns(title)
    } else {
        String::from(BLANK_TEMPLATE)
    };

    let result = with_editor(|editor| {
        if choice == BLANK_TEMPLATE {
            editor.add_default()
        } else {
            editor.add_from_template(&choice)
        }
    });
    report(result, "add");

    let table = host_ivar(host, IVAR_SETTINGS_TABLE);
    reload(table);
    let count = with_editor(|editor| editor.len()).unwrap_or(0);
    if table != nil && count > 0 {
        let last = count - 1;
        let _: () = msg_send![table, scrollRowToVisible: last as isize];
        let selection: id = msg_send![get_class("NSIndexSet"), indexSetWithIndex: last];
        let _: () = msg_send![table, selectRowIndexes: selection, byExtendingSelection: NO];
    }
}

pub unsafe extern "C-unwind" fn remove_service(this: &mut AnyObject, _cmd: Sel, _sender: id) {
    let table = host_ivar(this as *mut AnyObject, IVAR_SETTINGS_TABLE);
    if table == nil {
        return;
    }
    let selection: id = msg_send![table, selectedRowIndexes];
    let rows = index_set_to_vec(selection);
    for row in rows.into_iter().rev() {
        let result = with_editor(|editor| editor.remove(row).map(|_| ()));
        report(result, "remove");
    }
    reload(table);
}
