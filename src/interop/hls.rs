use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlMediaElement, XmlHttpRequest};

use super::{has_global, set};

const MANIFEST_PARSED: &str = "hlsManifestParsed";
const ERROR: &str = "hlsError";

#[wasm_bindgen]
extern "C" {
    type Hls;

    #[wasm_bindgen(constructor, catch)]
    fn new(config: &JsValue) -> Result<Hls, JsValue>;

    #[wasm_bindgen(static_method_of = Hls, js_name = isSupported)]
    fn is_supported() -> bool;

    #[wasm_bindgen(method, js_name = loadSource)]
    fn load_source(this: &Hls, url: &str);

    #[wasm_bindgen(method, js_name = attachMedia)]
    fn attach_media(this: &Hls, media: &HtmlMediaElement);

    #[wasm_bindgen(method)]
    fn on(this: &Hls, event: &str, handler: &Function);

    #[wasm_bindgen(method)]
    fn destroy(this: &Hls);
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlayerEvent {
    ManifestParsed,
    Error { fatal: bool, details: String },
}

/// An hls.js instance bound to one media element. Destroyed on drop.
pub struct HlsPlayer {
    hls: Hls,
    token: Rc<RefCell<String>>,
    _xhr_setup: Closure<dyn FnMut(XmlHttpRequest, String)>,
    _handlers: Vec<Closure<dyn FnMut(JsValue, JsValue)>>,
}

impl HlsPlayer {
    pub fn is_available() -> bool {
        has_global("Hls") && Hls::is_supported()
    }

    pub fn attach(
        media: &HtmlMediaElement,
        url: &str,
        token: &str,
        on_event: impl Fn(PlayerEvent) + 'static,
    ) -> Result<Self, JsValue> {
        let token = Rc::new(RefCell::new(token.to_string()));

        // every playlist and segment request carries the current token
        let shared = token.clone();
        let xhr_setup = Closure::wrap(Box::new(move |xhr: XmlHttpRequest, _url: String| {
            let token = shared.borrow();
            if !token.is_empty() {
                let _ = xhr.set_request_header("Authorization", &format!("Bearer {token}"));
            }
        }) as Box<dyn FnMut(XmlHttpRequest, String)>);

        let config = Object::new();
        set(&config, "xhrSetup", xhr_setup.as_ref());
        set(&config, "enableWorker", &JsValue::TRUE);
        set(&config, "lowLatencyMode", &JsValue::TRUE);

        let hls = Hls::new(&config)?;
        let on_event: Rc<dyn Fn(PlayerEvent)> = Rc::new(on_event);

        let parsed = {
            let on_event = on_event.clone();
            Closure::wrap(Box::new(move |_event: JsValue, _data: JsValue| {
                on_event(PlayerEvent::ManifestParsed);
            }) as Box<dyn FnMut(JsValue, JsValue)>)
        };

        let errored = Closure::wrap(Box::new(move |_event: JsValue, data: JsValue| {
            let fatal = Reflect::get(&data, &JsValue::from_str("fatal"))
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let details = Reflect::get(&data, &JsValue::from_str("details"))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            on_event(PlayerEvent::Error { fatal, details });
        }) as Box<dyn FnMut(JsValue, JsValue)>);

        hls.on(MANIFEST_PARSED, parsed.as_ref().unchecked_ref());
        hls.on(ERROR, errored.as_ref().unchecked_ref());
        hls.load_source(url);
        hls.attach_media(media);

        Ok(Self {
            hls,
            token,
            _xhr_setup: xhr_setup,
            _handlers: vec![parsed, errored],
        })
    }

    pub fn set_token(&self, token: &str) {
        *self.token.borrow_mut() = token.to_string();
    }
}

impl Drop for HlsPlayer {
    fn drop(&mut self) {
        self.hls.destroy();
    }
}

/// Safari and iOS play HLS without hls.js.
pub fn plays_hls_natively(media: &HtmlMediaElement) -> bool {
    !media.can_play_type("application/vnd.apple.mpegurl").is_empty()
}
