//! FFI bindings for the neural assessment engine
//!
//! C-compatible entry points for embedding the engine in other runtimes.
//! Strings are null-terminated UTF-8. Returned strings are heap allocated and
//! must be released with `neural_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::assessment::input::parse_input;
use crate::assessment::pipeline::{assess_json, Assessor};
use crate::config::AssessmentConfig;
use crate::error::AssessmentError;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn finish(result: Result<String, AssessmentError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

fn assess_with_config_json(input: &str, config: &str) -> Result<String, AssessmentError> {
    let assessor = Assessor::with_config(AssessmentConfig::from_json(config)?)?;
    let report = assessor.assess(&parse_input(input)?)?;
    serde_json::to_string_pretty(&report).map_err(AssessmentError::JsonError)
}

/// Assess raw input JSON with default thresholds and return the report JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `neural_free_string`.
/// - Returns NULL on error; call `neural_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn neural_assess(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let Some(input) = cstr_to_string(json) else {
        set_last_error("Invalid JSON string pointer");
        return ptr::null_mut();
    };

    finish(assess_json(&input))
}

/// Assess raw input JSON with a JSON configuration.
///
/// # Safety
/// - `json` and `config_json` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `neural_free_string`.
/// - Returns NULL on error; call `neural_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn neural_assess_with_config(
    json: *const c_char,
    config_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let Some(input) = cstr_to_string(json) else {
        set_last_error("Invalid JSON string pointer");
        return ptr::null_mut();
    };
    let Some(config) = cstr_to_string(config_json) else {
        set_last_error("Invalid config string pointer");
        return ptr::null_mut();
    };

    finish(assess_with_config_json(&input, &config))
}

/// Free a string returned by this library.
///
/// # Safety
/// - `ptr` must be a pointer returned by a `neural_*` function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn neural_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the last error message on this thread.
///
/// # Safety
/// - The returned pointer is valid until the next `neural_*` call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if the last call succeeded.
#[no_mangle]
pub unsafe extern "C" fn neural_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn neural_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
