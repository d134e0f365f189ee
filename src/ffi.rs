//! C FFI exports for .NET P/Invoke.
//!
//! These functions provide a C-compatible interface for calling Rust functions from C#.
//! All functions use JSON strings for input/output to simplify marshalling.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::site_matcher::{
    filter_site_records, MatchRequest, MatchStrategy, SiteMatcherInput,
};

/// Check a single saved identifier against a target.
///
/// # Safety
///
/// - `input_json` must be a valid null-terminated C string containing a MatchRequest
///   (`{"saved": "...", "target": "...", "strategy": "base_domain"}`)
///
/// # Returns
///
/// 1 on match, 0 on no match or any error (null pointer, invalid UTF-8, invalid JSON).
#[no_mangle]
pub unsafe extern "C" fn matches_site_ffi(input_json: *const c_char) -> u8 {
    if input_json.is_null() {
        return 0;
    }

    let c_str = match CStr::from_ptr(input_json).to_str() {
        Ok(s) => s,
        Err(_) => return 0,
    };

    match serde_json::from_str::<MatchRequest>(c_str) {
        Ok(request) => u8::from(request.is_match()),
        Err(_) => 0,
    }
}

/// Filter site records for autofill.
///
/// # Safety
///
/// - `input_json` must be a valid null-terminated C string
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing the JSON result (SiteMatcherOutput).
/// Returns null on error.
#[no_mangle]
pub unsafe extern "C" fn filter_site_records_ffi(input_json: *const c_char) -> *mut c_char {
    if input_json.is_null() {
        return ptr::null_mut();
    }

    let c_str = match CStr::from_ptr(input_json).to_str() {
        Ok(s) => s,
        Err(_) => return ptr::null_mut(),
    };

    let input: SiteMatcherInput = match serde_json::from_str(c_str) {
        Ok(i) => i,
        Err(e) => {
            return create_error_response(&format!("Failed to parse input: {}", e));
        }
    };

    let output = filter_site_records(input);

    match serde_json::to_string(&output) {
        Ok(json) => string_to_c_char(json),
        Err(e) => create_error_response(&format!("Failed to serialize output: {}", e)),
    }
}

/// Get the stable keys of all match strategies as a JSON array.
///
/// # Safety
///
/// - The returned pointer must be freed by calling `free_string`
///
/// # Returns
///
/// A null-terminated C string containing a JSON array of strategy keys.
#[no_mangle]
pub extern "C" fn get_match_strategies_ffi() -> *mut c_char {
    let keys: Vec<&str> = MatchStrategy::ALL.iter().map(|s| s.key()).collect();
    match serde_json::to_string(&keys) {
        Ok(json) => string_to_c_char(json),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a string that was allocated by Rust.
///
/// # Safety
///
/// - `s` must be a pointer that was returned by one of the FFI functions
/// - This function must only be called once per pointer
/// - After calling this function, the pointer is invalid
#[no_mangle]
pub unsafe extern "C" fn free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Convert a Rust string to a C string pointer.
fn string_to_c_char(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Create an error response JSON string.
fn create_error_response(message: &str) -> *mut c_char {
    let error_json = serde_json::json!({ "success": false, "error": message }).to_string();
    string_to_c_char(error_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_get_match_strategies() {
        let result = get_match_strategies_ffi();
        assert!(!result.is_null());

        unsafe {
            let c_str = CStr::from_ptr(result);
            let json = c_str.to_str().unwrap();
            let keys: Vec<String> = serde_json::from_str(json).unwrap();
            assert_eq!(keys.len(), 6);
            assert!(keys.contains(&"base_domain".to_string()));
            assert!(keys.contains(&"never".to_string()));
            free_string(result);
        }
    }

    #[test]
    fn test_matches_site() {
        let input = CString::new(
            r#"{"saved": "example.com", "target": "login.example.com", "strategy": "domain"}"#,
        )
        .unwrap();
        let lookalike = CString::new(
            r#"{"saved": "example.com", "target": "notexample.com", "strategy": "domain"}"#,
        )
        .unwrap();

        unsafe {
            assert_eq!(matches_site_ffi(input.as_ptr()), 1);
            assert_eq!(matches_site_ffi(lookalike.as_ptr()), 0);
        }
    }

    #[test]
    fn test_matches_site_defaults_to_base_domain() {
        let input = CString::new(r#"{"saved": "https://www.example.com", "target": "app.example.com"}"#)
            .unwrap();

        unsafe {
            assert_eq!(matches_site_ffi(input.as_ptr()), 1);
        }
    }

    #[test]
    fn test_null_input() {
        unsafe {
            assert_eq!(matches_site_ffi(ptr::null()), 0);

            let result = filter_site_records_ffi(ptr::null());
            assert!(result.is_null());
        }
    }

    #[test]
    fn test_invalid_json_input() {
        let invalid_json = CString::new("not valid json").unwrap();
        unsafe {
            assert_eq!(matches_site_ffi(invalid_json.as_ptr()), 0);

            let result = filter_site_records_ffi(invalid_json.as_ptr());
            assert!(!result.is_null());

            let c_str = CStr::from_ptr(result);
            let json = c_str.to_str().unwrap();
            let response: serde_json::Value = serde_json::from_str(json).unwrap();
            assert_eq!(response["success"], false);
            assert!(response["error"].as_str().unwrap().contains("Failed to parse input"));
            free_string(result);
        }
    }

    #[test]
    fn test_filter_site_records() {
        let input = CString::new(
            r#"{"records": [{"id": "gh", "website": "github.com"}], "identifier": "https://github.com/login"}"#,
        )
        .unwrap();
        unsafe {
            let result = filter_site_records_ffi(input.as_ptr());
            assert!(!result.is_null());

            let json = CStr::from_ptr(result).to_str().unwrap();
            let output: serde_json::Value = serde_json::from_str(json).unwrap();
            assert_eq!(output["matched_ids"][0], "gh");
            free_string(result);
        }
    }
}
