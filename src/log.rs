//! Browser console logging.
//!
//! Off wasm32 these are no-ops, so the core can run under native tests
//! without touching JS imports.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

pub fn info(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn error(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

/// `format!`-style wrapper around [`info`].
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::log::info(&format!($($t)*))
    };
}

/// `format!`-style wrapper around [`warn`].
#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => {
        $crate::log::warn(&format!($($t)*))
    };
}
