//! C-ABI wrapper around `marvel-core`.
//!
//! # Overview
//! Exposes the sans-IO comics API through `extern "C"` functions so a mobile
//! host (Swift, Kotlin/JNI) can build signed requests, run them on its own
//! networking stack, and hand the raw responses back for classification and
//! decoding, without linking an async runtime.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `marvel_build_*` / `marvel_parse_*` mirror `MarvelApi` 1:1.
//! - A single `FfiMarvelResult` envelope with `FfiDataTag` + `void* data`
//!   conveys requests, payloads and errors uniformly.
//! - The host owns every returned pointer and must release it with the
//!   matching `marvel_*_free` / `marvel_free_*` function.

pub mod types;

use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use marvel_core::{oxford_comma_list, ClientConfig, HttpResponse, ImagePath, MarvelApi};

use types::*;

// ---------------------------------------------------------------------------
// API handle lifecycle
// ---------------------------------------------------------------------------

/// Create a new `MarvelApi` handle with the default endpoint and image size.
///
/// Returns null if either key is null or not valid UTF-8.
/// The caller must free the returned pointer with `marvel_api_free`.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_api_new(
    public_key: *const c_char,
    private_key: *const c_char,
) -> *mut FfiMarvelApi {
    catch_unwind(|| {
        let (Some(public_key), Some(private_key)) =
            (unsafe { read_str(public_key) }, unsafe { read_str(private_key) })
        else {
            return std::ptr::null_mut();
        };
        let api = MarvelApi::new(ClientConfig::new(public_key, private_key));
        Box::into_raw(Box::new(FfiMarvelApi { inner: api }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a new `MarvelApi` handle from a JSON object with `public_key`,
/// `private_key`, and optional `base_endpoint` and `image_variant`.
///
/// Returns null if `config_json` is null or does not describe a valid
/// configuration.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_api_new_from_json(config_json: *const c_char) -> *mut FfiMarvelApi {
    catch_unwind(|| {
        let Some(json) = (unsafe { read_str(config_json) }) else {
            return std::ptr::null_mut();
        };
        match ClientConfig::from_json(json) {
            Ok(config) => Box::into_raw(Box::new(FfiMarvelApi {
                inner: MarvelApi::new(config),
            })),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a handle created by `marvel_api_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_api_free(api: *mut FfiMarvelApi) {
    if !api.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(api) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Run `f` against the handle behind `api`, converting null handles and
/// panics into error results.
fn with_api(
    api: *const FfiMarvelApi,
    op: &str,
    f: impl FnOnce(&MarvelApi) -> *mut FfiMarvelResult,
) -> *mut FfiMarvelResult {
    catch_unwind(AssertUnwindSafe(|| {
        if api.is_null() {
            return FfiMarvelResult::null_arg("api");
        }
        let api = unsafe { &*api };
        f(&api.inner)
    }))
    .unwrap_or_else(|_| FfiMarvelResult::panic(&format!("panic in {op}")))
}

/// Build a signed request for a single comic.
///
/// Returns a result with `data_tag = Request` on success.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_build_get_comic(api: *const FfiMarvelApi, id: i64) -> *mut FfiMarvelResult {
    with_api(api, "marvel_build_get_comic", |api| match api.build_get_comic(id) {
        Ok(req) => FfiMarvelResult::ok_request(req),
        Err(e) => FfiMarvelResult::from_error(e),
    })
}

/// Build a signed request for the comic list.
///
/// Returns a result with `data_tag = Request` on success.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_build_list_comics(api: *const FfiMarvelApi) -> *mut FfiMarvelResult {
    with_api(api, "marvel_build_list_comics", |api| match api.build_list_comics() {
        Ok(req) => FfiMarvelResult::ok_request(req),
        Err(e) => FfiMarvelResult::from_error(e),
    })
}

/// Build an https request for a cover image.
///
/// `path` and `extension` are the comic's `image_path` and
/// `image_extension`. Hosts should skip comics whose `image_available` is
/// false.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_build_get_image(
    api: *const FfiMarvelApi,
    path: *const c_char,
    extension: *const c_char,
) -> *mut FfiMarvelResult {
    with_api(api, "marvel_build_get_image", |api| {
        let Some(path) = (unsafe { read_str(path) }) else {
            return FfiMarvelResult::null_arg("path");
        };
        let Some(extension) = (unsafe { read_str(extension) }) else {
            return FfiMarvelResult::null_arg("extension");
        };
        match api.build_get_image(&ImagePath::new(path, extension)) {
            Ok(req) => FfiMarvelResult::ok_request(req),
            Err(e) => FfiMarvelResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Copy an `FfiHttpResponse` into a core `HttpResponse`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() || resp.body_len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(resp.body, resp.body_len) }.to_vec()
    };
    HttpResponse::new(resp.status, body)
}

fn parse_with(
    api: *const FfiMarvelApi,
    response: *const FfiHttpResponse,
    op: &str,
    f: impl FnOnce(&MarvelApi, HttpResponse) -> *mut FfiMarvelResult,
) -> *mut FfiMarvelResult {
    with_api(api, op, |api| {
        if response.is_null() {
            return FfiMarvelResult::null_arg("response");
        }
        let resp = unsafe { &*response };
        f(api, ffi_response_to_core(resp))
    })
}

/// Parse the response to a `marvel_build_get_comic` request.
///
/// Returns a result with `data_tag = Comic` on success.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_parse_get_comic(
    api: *const FfiMarvelApi,
    response: *const FfiHttpResponse,
) -> *mut FfiMarvelResult {
    parse_with(api, response, "marvel_parse_get_comic", |api, resp| {
        match api.parse_get_comic(resp) {
            Ok(comic) => FfiMarvelResult::ok_comic(comic),
            Err(e) => FfiMarvelResult::from_error(e),
        }
    })
}

/// Parse the response to a `marvel_build_list_comics` request.
///
/// Returns a result with `data_tag = ComicList` on success. An empty
/// catalog page is a success with `len = 0`.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_parse_list_comics(
    api: *const FfiMarvelApi,
    response: *const FfiHttpResponse,
) -> *mut FfiMarvelResult {
    parse_with(api, response, "marvel_parse_list_comics", |api, resp| {
        match api.parse_list_comics(resp) {
            Ok(comics) => FfiMarvelResult::ok_comic_list(comics),
            Err(e) => FfiMarvelResult::from_error(e),
        }
    })
}

/// Parse the response to a `marvel_build_get_image` request.
///
/// Returns a result with `data_tag = CoverImage` on success.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_parse_get_image(
    api: *const FfiMarvelApi,
    response: *const FfiHttpResponse,
) -> *mut FfiMarvelResult {
    parse_with(api, response, "marvel_parse_get_image", |api, resp| {
        match api.parse_get_image(resp) {
            Ok(image) => FfiMarvelResult::ok_cover_image(image),
            Err(e) => FfiMarvelResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Presentation helpers
// ---------------------------------------------------------------------------

/// True when `path` ends in the "no artwork" placeholder segment.
/// Returns false for null or non-UTF-8 input.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_image_is_not_available(path: *const c_char) -> bool {
    catch_unwind(|| match unsafe { read_str(path) } {
        Some(path) => ImagePath::new(path, "").is_not_available(),
        None => false,
    })
    .unwrap_or(false)
}

/// Join `len` C strings as an Oxford-comma list ("a, b, and c").
///
/// Null entries are skipped. Returns null if `items` is null while `len` is
/// non-zero. Free the returned string with `marvel_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_oxford_comma(items: *const *const c_char, len: u32) -> *mut c_char {
    catch_unwind(|| {
        if items.is_null() && len > 0 {
            return std::ptr::null_mut();
        }
        let names: Vec<&str> = if len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(items, len as usize) }
                .iter()
                .filter_map(|&item| unsafe { read_str(item) })
                .collect()
        };
        to_c_string(oxford_comma_list(&names))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiMarvelResult` returned by any `marvel_build_*` or
/// `marvel_parse_*` function. Safe to call with null. Uses `data_tag` to
/// determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_free_result(result: *mut FfiMarvelResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| unsafe { FfiMarvelResult::free(result) }));
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn marvel_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| unsafe { free_c_string(s) });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
