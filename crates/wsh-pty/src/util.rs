//! Shared utilities for the transport crate.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

/// Console logging fallback for native builds (tests, tooling).
#[cfg(not(target_arch = "wasm32"))]
pub fn log(s: &str) {
    eprintln!("{s}");
}

/// Install the console panic hook once at process start.
#[cfg(all(target_arch = "wasm32", feature = "console_error_panic_hook"))]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}
