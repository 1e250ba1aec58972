//! Bindings to the Hive Keychain browser extension (`window.hive_keychain`).
//!
//! Every Keychain request takes a trailing callback; here each one is wrapped in a
//! `Promise` so callers can simply `.await` it.

use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Deserialize;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::types::AuthError;

pub const POSTING: &str = "Posting";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct KeychainResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: serde_json::Value,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

fn extension() -> Option<Object> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str("hive_keychain")).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    value.dyn_into::<Object>().ok()
}

pub fn is_installed() -> bool {
    extension().is_some()
}

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// The extension injects itself after page load, so give it a few chances to appear.
pub async fn wait_until_installed(attempts: u32, interval_ms: i32) -> bool {
    for _ in 0..attempts {
        if is_installed() {
            return true;
        }
        sleep(interval_ms).await;
    }
    is_installed()
}

async fn request(method: &str, args: &[JsValue]) -> Result<KeychainResponse, AuthError> {
    let keychain = extension().ok_or(AuthError::KeychainMissing)?;
    let func = Reflect::get(&keychain, &JsValue::from_str(method))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| AuthError::KeychainRejected(format!("{method} is not supported")))?;

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let callback = Closure::once_into_js(move |response: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &response);
        });
        let call_args = Array::new();
        for arg in args {
            call_args.push(arg);
        }
        call_args.push(&callback);
        if let Err(e) = func.apply(&keychain, &call_args) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });

    let value = JsFuture::from(promise)
        .await
        .map_err(|e| AuthError::KeychainRejected(format!("{e:?}")))?;
    let response: KeychainResponse = serde_wasm_bindgen::from_value(value)
        .map_err(|e| AuthError::KeychainRejected(e.to_string()))?;

    if response.success {
        Ok(response)
    } else {
        Err(AuthError::KeychainRejected(
            response
                .message
                .or(response.error)
                .unwrap_or_else(|| "Request was cancelled".to_string()),
        ))
    }
}

/// Signs `message` with the account's key of `key_type`; returns the signature.
pub async fn sign_buffer(username: &str, message: &str, key_type: &str) -> Result<String, AuthError> {
    let response = request(
        "requestSignBuffer",
        &[
            JsValue::from_str(username),
            JsValue::from_str(message),
            JsValue::from_str(key_type),
        ],
    )
    .await?;

    response
        .result
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| AuthError::KeychainRejected("No signature returned".to_string()))
}

/// `weight` is in basis points: 10000 is a full upvote.
pub async fn vote(account: &str, permlink: &str, author: &str, weight: i32) -> Result<KeychainResponse, AuthError> {
    request(
        "requestVote",
        &[
            JsValue::from_str(account),
            JsValue::from_str(permlink),
            JsValue::from_str(author),
            JsValue::from_f64(weight as f64),
        ],
    )
    .await
}

pub async fn add_account_authority(
    account: &str,
    authorized: &str,
    role: &str,
    weight: u32,
) -> Result<KeychainResponse, AuthError> {
    request(
        "requestAddAccountAuthority",
        &[
            JsValue::from_str(account),
            JsValue::from_str(authorized),
            JsValue::from_str(role),
            JsValue::from_f64(weight as f64),
        ],
    )
    .await
}

pub async fn handshake() -> bool {
    let Some(keychain) = extension() else {
        return false;
    };
    let Some(func) = Reflect::get(&keychain, &JsValue::from_str("requestHandshake"))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
    else {
        return false;
    };

    let promise = Promise::new(&mut |resolve: Function, reject: Function| {
        let callback = Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::TRUE);
        });
        if let Err(e) = func.call1(&keychain, &callback) {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
    });
    JsFuture::from(promise).await.is_ok()
}
