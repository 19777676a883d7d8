//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! tagged enums with explicit discriminants. Arrays are handed out as boxed
//! slices so they can be rebuilt from pointer and length when freed.
//! Conversion and release helpers live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;

use marvel_core::error::ApiError;
use marvel_core::{Comic, ComicList, CoverImage, HttpRequest};

/// Opaque handle to a `MarvelApi`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiMarvelApi {
    pub(crate) inner: marvel_core::MarvelApi,
}

// ---------------------------------------------------------------------------
// String and array helpers
// ---------------------------------------------------------------------------

/// Allocate a C string. Interior NUL bytes are dropped.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let s: String = s.into();
    CString::new(s.replace('\0', ""))
        .unwrap_or_default()
        .into_raw()
}

/// Release a C string allocated by `to_c_string`. Null is ignored.
pub(crate) unsafe fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Borrow a caller-provided C string as UTF-8, or `None` if null or invalid.
pub(crate) unsafe fn read_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

/// Leak `items` as a boxed slice; empty vectors become null.
pub(crate) fn into_raw_slice<T>(items: Vec<T>) -> *mut T {
    if items.is_empty() {
        return std::ptr::null_mut();
    }
    Box::into_raw(items.into_boxed_slice()) as *mut T
}

/// Reclaim a slice leaked by `into_raw_slice`.
pub(crate) unsafe fn from_raw_slice<T>(ptr: *mut T, len: usize) -> Box<[T]> {
    if ptr.is_null() || len == 0 {
        return Box::new([]);
    }
    Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len))
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A GET request described as C-compatible plain data.
///
/// Produced by `marvel_build_*`. The host executes it and passes the
/// response back through the matching `marvel_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: to_c_string(k),
                value: to_c_string(v),
            })
            .collect();
        FfiHttpRequest {
            url: to_c_string(req.url.to_string()),
            headers_len: headers.len() as u32,
            headers: into_raw_slice(headers),
        }
    }

    unsafe fn free_fields(&self) {
        free_c_string(self.url);
        for header in from_raw_slice(self.headers, self.headers_len as usize).iter() {
            free_c_string(header.key);
            free_c_string(header.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host builds this after executing a request and passes a pointer to a
/// `marvel_parse_*` function. `body` may be null when `body_len` is 0. The
/// FFI layer copies but never frees these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const u8,
    pub body_len: usize,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiMarvelResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = 1,
    Unreachable = 2,
    NonSuccessStatus = 3,
    EmptyBody = 4,
    Malformed = 5,
    Empty = 6,
    UndecodableImage = 7,
    Panic = 8,
    NullArg = 9,
}

/// Tag that tells `marvel_free_result` what `FfiMarvelResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Request = 1,
    Comic = 2,
    ComicList = 3,
    CoverImage = 4,
}

/// A comic exposed to C. `description` is null when the catalog has none.
#[repr(C)]
pub struct FfiComic {
    pub id: i64,
    pub title: *mut c_char,
    pub description: *mut c_char,
    pub authors: *mut *mut c_char,
    pub authors_len: u32,
    pub issue_number: i64,
    pub image_path: *mut c_char,
    pub image_extension: *mut c_char,
    /// False when the image path is the "no artwork" placeholder.
    pub image_available: bool,
}

impl FfiComic {
    fn from_core(comic: Comic) -> Self {
        let image_available = !comic.image_path.is_not_available();
        let authors: Vec<*mut c_char> = comic.authors.into_iter().map(to_c_string).collect();
        FfiComic {
            id: comic.id,
            title: to_c_string(comic.title),
            description: comic
                .description
                .map(to_c_string)
                .unwrap_or(std::ptr::null_mut()),
            authors_len: authors.len() as u32,
            authors: into_raw_slice(authors),
            issue_number: comic.issue_number,
            image_path: to_c_string(comic.image_path.path),
            image_extension: to_c_string(comic.image_path.file_extension),
            image_available,
        }
    }

    /// Free the heap fields of an `FfiComic` (but not the struct itself).
    unsafe fn free_fields(&self) {
        free_c_string(self.title);
        free_c_string(self.description);
        for author in from_raw_slice(self.authors, self.authors_len as usize).iter() {
            free_c_string(*author);
        }
        free_c_string(self.image_path);
        free_c_string(self.image_extension);
    }
}

/// Comics in provider order.
#[repr(C)]
pub struct FfiComicList {
    pub items: *mut FfiComic,
    pub len: u32,
}

/// Cover image bytes plus the detected MIME type and pixel size.
#[repr(C)]
pub struct FfiCoverImage {
    pub bytes: *mut u8,
    pub len: usize,
    pub mime_type: *mut c_char,
    pub width: u32,
    pub height: u32,
}

/// Result envelope for every build and parse operation.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload tagged by `data_tag`. On failure `error_code`
/// names the failure kind, `error_message` is a human-readable C string,
/// `http_status` carries the status for `NonSuccessStatus`, and `data` is
/// null.
#[repr(C)]
pub struct FfiMarvelResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiMarvelResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiMarvelResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiMarvelResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn ok_request(req: HttpRequest) -> *mut Self {
        let request = Box::new(FfiHttpRequest::from_core(req));
        Self::ok(FfiDataTag::Request, Box::into_raw(request) as *mut c_void)
    }

    pub(crate) fn ok_comic(comic: Comic) -> *mut Self {
        let comic = Box::new(FfiComic::from_core(comic));
        Self::ok(FfiDataTag::Comic, Box::into_raw(comic) as *mut c_void)
    }

    pub(crate) fn ok_comic_list(comics: ComicList) -> *mut Self {
        let items: Vec<FfiComic> = comics.into_iter().map(FfiComic::from_core).collect();
        let list = Box::new(FfiComicList {
            len: items.len() as u32,
            items: into_raw_slice(items),
        });
        Self::ok(FfiDataTag::ComicList, Box::into_raw(list) as *mut c_void)
    }

    pub(crate) fn ok_cover_image(image: CoverImage) -> *mut Self {
        let len = image.bytes.len();
        let cover = Box::new(FfiCoverImage {
            bytes: into_raw_slice(image.bytes),
            len,
            mime_type: to_c_string(image.mime_type),
            width: image.width,
            height: image.height,
        });
        Self::ok(FfiDataTag::CoverImage, Box::into_raw(cover) as *mut c_void)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (code, status) = match &err {
            ApiError::InvalidUrl(_) => (FfiErrorCode::InvalidUrl, 0),
            ApiError::Unreachable(_) => (FfiErrorCode::Unreachable, 0),
            ApiError::NonSuccessStatus { status } => (FfiErrorCode::NonSuccessStatus, *status),
            ApiError::EmptyBody => (FfiErrorCode::EmptyBody, 200),
            ApiError::Malformed(_) => (FfiErrorCode::Malformed, 200),
            ApiError::Empty => (FfiErrorCode::Empty, 200),
            ApiError::UndecodableImage => (FfiErrorCode::UndecodableImage, 200),
        };
        Self::err(code, status, err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }

    /// Free the result and whatever `data` points to.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = Box::from_raw(result);
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Request => {
                let request = Box::from_raw(result.data as *mut FfiHttpRequest);
                request.free_fields();
            }
            FfiDataTag::Comic => {
                let comic = Box::from_raw(result.data as *mut FfiComic);
                comic.free_fields();
            }
            FfiDataTag::ComicList => {
                let list = Box::from_raw(result.data as *mut FfiComicList);
                for comic in from_raw_slice(list.items, list.len as usize).iter() {
                    comic.free_fields();
                }
            }
            FfiDataTag::CoverImage => {
                let cover = Box::from_raw(result.data as *mut FfiCoverImage);
                drop(from_raw_slice(cover.bytes, cover.len));
                free_c_string(cover.mime_type);
            }
            FfiDataTag::None => {}
        }
    }
}
