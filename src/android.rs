//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge.

use jni::objects::{JClass, JString};
use jni::sys::{jfloat, jstring};
use jni::JNIEnv;

use crate::{closest_fret_json, render_json_to_svg, Result};

fn to_jstring(env: &mut JNIEnv, result: Result<String>) -> jstring {
    match result {
        Ok(s) => match env.new_string(&s) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::warn!("fretlib call failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a fretboard described by options JSON to SVG.
///
/// Called from Kotlin as:
///   external fun renderJson(options: String): String?
#[no_mangle]
pub extern "system" fn Java_com_fretlib_app_FretLib_renderJson(
    mut env: JNIEnv,
    _class: JClass,
    options: JString,
) -> jstring {
    let json: String = match env.get_string(&options) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = render_json_to_svg(&json);
    to_jstring(&mut env, result)
}

/// Nearest fretboard coordinate to a point on the rendered diagram, as JSON.
///
/// Called from Kotlin as:
///   external fun closestFret(options: String, x: Float, y: Float): String?
#[no_mangle]
pub extern "system" fn Java_com_fretlib_app_FretLib_closestFret(
    mut env: JNIEnv,
    _class: JClass,
    options: JString,
    x: jfloat,
    y: jfloat,
) -> jstring {
    let json: String = match env.get_string(&options) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };

    let result = closest_fret_json(&json, x as f64, y as f64);
    to_jstring(&mut env, result)
}
