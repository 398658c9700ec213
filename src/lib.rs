//! fretlib — interactive fretboard diagrams rendered as SVG.
//!
//! A `FretboardView` draws strings, frets and dots onto a drawing surface,
//! mounts it into a host `Container`, and maps pointer positions back to
//! `(string, fret)` coordinates for hover highlighting and click callbacks.
//!
//! # Example
//! ```
//! use fretlib::{Document, Dot, FretboardOptions, FretboardView, PointerEvent};
//!
//! let mut doc = Document::new();
//! let opts = FretboardOptions::default()
//!     .with_dot(Dot::colored(1, 0, "red"))
//!     .on_click(|coord| println!("clicked string {} fret {}", coord.string, coord.fret));
//! let mut view = FretboardView::new(&mut doc, opts).unwrap();
//!
//! let p = view.fret_coord(3, 2);
//! let coord = view.dispatch(&PointerEvent::click(p.x, p.y)).unwrap();
//! assert_eq!(coord.map(|c| (c.string, c.fret)), Some((3, 2)));
//! ```

pub mod error;
pub mod host;
pub mod model;
pub mod renderer;

#[cfg(target_os = "android")]
pub mod android;

pub use error::{FretboardError, Result};
pub use host::{Container, Document};
pub use model::*;
pub use renderer::{render_fretboard_to_svg, FretboardLayout, FretboardView};

use log::warn;

/// Parse options JSON, merging the given keys over the defaults.
pub fn options_from_json(json: &str) -> Result<FretboardOptions> {
    Ok(serde_json::from_str(json)?)
}

/// Convert a coordinate to a JSON string.
/// Useful for passing click results across FFI boundaries.
pub fn coord_to_json(coord: &FretCoord) -> Result<String> {
    Ok(serde_json::to_string(coord)?)
}

/// Render a fretboard described by options JSON to SVG.
pub fn render_json_to_svg(json: &str) -> Result<String> {
    render_fretboard_to_svg(options_from_json(json)?)
}

/// Resolve a surface-space point to the nearest fretboard coordinate for a
/// diagram described by options JSON, as JSON.
///
/// The diagram is mounted in a fresh `Document`, so `(x, y)` is interpreted
/// with an identity screen transform.
pub fn closest_fret_json(json: &str, x: f64, y: f64) -> Result<String> {
    let mut doc = Document::new();
    let view = FretboardView::new(&mut doc, options_from_json(json)?)?;
    let coord = view.closest_fret_coord(&PointerEvent::click(x, y))?;
    coord_to_json(&coord)
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

unsafe fn json_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

fn into_c_string(result: Result<String>, what: &str) -> *mut c_char {
    match result {
        Ok(s) => match CString::new(s) {
            Ok(c) => c.into_raw(),
            Err(e) => {
                warn!("{what} output has an interior NUL at byte {}", e.nul_position());
                std::ptr::null_mut()
            }
        },
        Err(e) => {
            warn!("{what} failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render options JSON to SVG and return it as a C string.
/// The caller must free the returned string with `fretlib_free_string`.
/// Returns null on malformed JSON or invalid options.
///
/// # Safety
/// `options_json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn fretlib_render_json(options_json: *const c_char) -> *mut c_char {
    match unsafe { json_arg(options_json) } {
        Some(json) => into_c_string(render_json_to_svg(json), "render"),
        None => std::ptr::null_mut(),
    }
}

/// Resolve `(x, y)` (surface units) to a `{"string":..,"fret":..}` C string.
/// The caller must free the returned string with `fretlib_free_string`.
///
/// # Safety
/// `options_json` must be a valid null-terminated UTF-8 C string.
#[no_mangle]
pub unsafe extern "C" fn fretlib_closest_fret_json(
    options_json: *const c_char,
    x: f64,
    y: f64,
) -> *mut c_char {
    match unsafe { json_arg(options_json) } {
        Some(json) => into_c_string(closest_fret_json(json, x, y), "hit test"),
        None => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by fretlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a fretlib function, or null.
#[no_mangle]
pub unsafe extern "C" fn fretlib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
