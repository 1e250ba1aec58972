//! wasm-bindgen glue for the JavaScript libraries loaded from the page shell.

pub mod hls;
pub mod socket;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};

/// True when `name` is defined on `window`.
pub(crate) fn has_global(name: &str) -> bool {
    web_sys::window()
        .and_then(|w| Reflect::get(&w, &JsValue::from_str(name)).ok())
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

pub(crate) fn set(target: &JsValue, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}

pub(crate) fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Copies `text` to the clipboard.
pub async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let navigator = window.navigator();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|e| format!("{e:?}"))?;
    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or("Clipboard API not available")?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|e| format!("{e:?}"))?
        .dyn_into::<Promise>()
        .map_err(|e| format!("{e:?}"))?;
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("{e:?}"))
}
