//! FFI layer for foreign hosts.
//!
//! This module provides C-compatible functions for embedding the engine from
//! other languages. Documents, queries and results cross the boundary as JSON
//! text in NUL-terminated UTF-8 strings.
//!
//! # Memory Management
//!
//! - Strings returned by `memquery_*` functions are allocated by Rust
//! - Caller must free them with `memquery_string_free`
//! - Store pointers must be freed with `memquery_store_free`
//! - Input strings are only read during the call and never retained
//!
//! # Error Handling
//!
//! Functions return JSON with either:
//! - `{"ok": <result>}` on success
//! - `{"error": "<message>"}` on failure

use crate::{error::Result, Options, Store, Value};
use std::ffi::{c_char, CStr, CString};
use std::ptr;

/// Result wrapper for FFI responses.
#[derive(serde::Serialize)]
#[serde(untagged)]
enum FfiResult<T: serde::Serialize> {
    Ok { ok: T },
    Err { error: String },
}

impl<T: serde::Serialize> FfiResult<T> {
    fn ok(value: T) -> Self {
        FfiResult::Ok { ok: value }
    }

    fn err(message: impl Into<String>) -> Self {
        FfiResult::Err {
            error: message.into(),
        }
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"error":"serialization failed: {}"}}"#, e))
    }
}

impl<T: serde::Serialize> From<Result<T>> for FfiResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => FfiResult::ok(value),
            Err(e) => FfiResult::err(e.to_string()),
        }
    }
}

/// Convert a Rust string to a C string pointer.
/// Caller must free with `memquery_string_free`.
fn to_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cs) => cs.into_raw(),
        // Unreachable for serde_json output, which escapes NUL as \u0000.
        Err(_) => c"{\"error\":\"string contained null bytes\"}".to_owned().into_raw(),
    }
}

fn error_reply(message: impl Into<String>) -> *mut c_char {
    to_c_string(FfiResult::<()>::err(message).to_json())
}

fn reply<T: serde::Serialize>(result: Result<T>) -> *mut c_char {
    to_c_string(FfiResult::from(result).to_json())
}

/// Convert a C string pointer to a Rust string.
/// Returns None if pointer is null or invalid UTF-8.
unsafe fn from_c_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Parse a C string argument as a JSON value.
unsafe fn json_arg(ptr: *const c_char, what: &str) -> std::result::Result<Value, String> {
    let text = from_c_string(ptr).ok_or_else(|| format!("invalid {what} string"))?;
    serde_json::from_str(&text).map_err(|e| format!("{what} parse error: {e}"))
}

// ============================================================================
// Store Lifecycle
// ============================================================================

/// Create a new, empty store with default options.
/// Caller must free the returned pointer with `memquery_store_free`.
#[no_mangle]
pub extern "C" fn memquery_store_new() -> *mut Store {
    Box::into_raw(Box::new(Store::new()))
}

/// Create a new store with options given as JSON, e.g. `{"maxQueryDepth": 16}`.
///
/// # Returns
/// Pointer to Store, or null on failure.
///
/// # Safety
/// - `options_json` must be a valid null-terminated C string or null
/// - Caller must free the returned pointer with `memquery_store_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_store_new_with_options(
    options_json: *const c_char,
) -> *mut Store {
    let options_str = match from_c_string(options_json) {
        Some(s) => s,
        None => return ptr::null_mut(),
    };

    let options: Options = match serde_json::from_str(&options_str) {
        Ok(o) => o,
        Err(_) => return ptr::null_mut(),
    };

    Box::into_raw(Box::new(Store::with_options(options)))
}

/// Free a store and every collection in it.
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*`
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn memquery_store_free(store: *mut Store) {
    if !store.is_null() {
        drop(Box::from_raw(store));
    }
}

/// Free a string allocated by the engine.
///
/// # Safety
/// - `s` must be a valid pointer from a `memquery_*` function
/// - Must not be called twice on the same pointer
#[no_mangle]
pub unsafe extern "C" fn memquery_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// ============================================================================
// Collections
// ============================================================================

/// Create a collection.
///
/// # Returns
/// JSON string: `{"ok": null}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - `name` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `memquery_string_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_create_collection(
    store: *const Store,
    name: *const c_char,
) -> *mut c_char {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return error_reply("null store pointer"),
    };

    let name_str = match from_c_string(name) {
        Some(s) => s,
        None => return error_reply("invalid collection name"),
    };

    reply(store.create_collection(&name_str).map(|_| ()))
}

/// Check whether a collection exists.
///
/// # Returns
/// 1 if it exists, 0 if not, -1 on invalid arguments.
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - `name` must be a valid null-terminated C string or null
#[no_mangle]
pub unsafe extern "C" fn memquery_collection_exists(
    store: *const Store,
    name: *const c_char,
) -> i32 {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return -1,
    };

    match from_c_string(name) {
        Some(name_str) => i32::from(store.contains(&name_str)),
        None => -1,
    }
}

/// Delete a collection and all of its documents.
///
/// # Returns
/// JSON string: `{"ok": null}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - `name` must be a valid null-terminated C string or null
/// - Caller must free the returned string with `memquery_string_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_delete_collection(
    store: *const Store,
    name: *const c_char,
) -> *mut c_char {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return error_reply("null store pointer"),
    };

    let name_str = match from_c_string(name) {
        Some(s) => s,
        None => return error_reply("invalid collection name"),
    };

    reply(store.delete_collection(&name_str))
}

/// List collection names.
///
/// # Returns
/// JSON string: `{"ok": ["name", ...]}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - Caller must free the returned string with `memquery_string_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_collection_names(store: *const Store) -> *mut c_char {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return error_reply("null store pointer"),
    };

    to_c_string(FfiResult::ok(store.collection_names()).to_json())
}

// ============================================================================
// Documents
// ============================================================================

/// Insert a document into a collection.
///
/// # Arguments
/// - `document_json`: JSON object text
///
/// # Returns
/// JSON string: `{"ok": null}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - `collection` and `document_json` must be valid null-terminated C strings or null
/// - Caller must free the returned string with `memquery_string_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_insert(
    store: *const Store,
    collection: *const c_char,
    document_json: *const c_char,
) -> *mut c_char {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return error_reply("null store pointer"),
    };

    let collection_str = match from_c_string(collection) {
        Some(s) => s,
        None => return error_reply("invalid collection name"),
    };

    let document = match json_arg(document_json, "document") {
        Ok(d) => d,
        Err(e) => return error_reply(e),
    };

    reply(
        store
            .collection(&collection_str)
            .and_then(|c| c.insert(document)),
    )
}

/// Find documents matching a query.
///
/// # Returns
/// JSON string: `{"ok": [Document, ...]}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - `collection` and `query_json` must be valid null-terminated C strings or null
/// - Caller must free the returned string with `memquery_string_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_find(
    store: *const Store,
    collection: *const c_char,
    query_json: *const c_char,
) -> *mut c_char {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return error_reply("null store pointer"),
    };

    let collection_str = match from_c_string(collection) {
        Some(s) => s,
        None => return error_reply("invalid collection name"),
    };

    let query = match json_arg(query_json, "query") {
        Ok(q) => q,
        Err(e) => return error_reply(e),
    };

    reply(store.collection(&collection_str).and_then(|c| c.find(query)))
}

/// Count documents matching a query.
///
/// # Returns
/// JSON string: `{"ok": <count>}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - `collection` and `query_json` must be valid null-terminated C strings or null
/// - Caller must free the returned string with `memquery_string_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_count(
    store: *const Store,
    collection: *const c_char,
    query_json: *const c_char,
) -> *mut c_char {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return error_reply("null store pointer"),
    };

    let collection_str = match from_c_string(collection) {
        Some(s) => s,
        None => return error_reply("invalid collection name"),
    };

    let query = match json_arg(query_json, "query") {
        Ok(q) => q,
        Err(e) => return error_reply(e),
    };

    reply(store.collection(&collection_str).and_then(|c| c.count(query)))
}

/// Update documents matching a query.
///
/// # Returns
/// JSON string: `{"ok": <updated count>}` or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - `collection`, `query_json` and `update_json` must be valid null-terminated
///   C strings or null
/// - Caller must free the returned string with `memquery_string_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_find_and_update(
    store: *const Store,
    collection: *const c_char,
    query_json: *const c_char,
    update_json: *const c_char,
) -> *mut c_char {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return error_reply("null store pointer"),
    };

    let collection_str = match from_c_string(collection) {
        Some(s) => s,
        None => return error_reply("invalid collection name"),
    };

    let query = match json_arg(query_json, "query") {
        Ok(q) => q,
        Err(e) => return error_reply(e),
    };

    let update = match json_arg(update_json, "update") {
        Ok(u) => u,
        Err(e) => return error_reply(e),
    };

    reply(
        store
            .collection(&collection_str)
            .and_then(|c| c.find_and_update(query, update)),
    )
}

/// Delete documents matching a query.
///
/// # Returns
/// JSON string: `{"ok": [Document, ...]}` with the removed documents,
/// or `{"error": "message"}`
///
/// # Safety
/// - `store` must be a valid pointer from `memquery_store_new*` or null
/// - `collection` and `query_json` must be valid null-terminated C strings or null
/// - Caller must free the returned string with `memquery_string_free`
#[no_mangle]
pub unsafe extern "C" fn memquery_find_and_delete(
    store: *const Store,
    collection: *const c_char,
    query_json: *const c_char,
) -> *mut c_char {
    let store = match store.as_ref() {
        Some(s) => s,
        None => return error_reply("null store pointer"),
    };

    let collection_str = match from_c_string(collection) {
        Some(s) => s,
        None => return error_reply("invalid collection name"),
    };

    let query = match json_arg(query_json, "query") {
        Ok(q) => q,
        Err(e) => return error_reply(e),
    };

    reply(
        store
            .collection(&collection_str)
            .and_then(|c| c.find_and_delete(query)),
    )
}

// ============================================================================
// Utility
// ============================================================================

/// Get the engine version.
///
/// # Returns
/// Static string pointer (do not free)
#[no_mangle]
pub extern "C" fn memquery_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
