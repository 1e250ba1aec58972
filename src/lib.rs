#![recursion_limit = "256"]
pub mod app;
pub mod auth;
pub mod components;
pub mod config;
pub mod format;
pub mod interop;
pub mod models;
pub mod pages;
pub mod services;
pub mod state;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    leptos::mount::hydrate_body(App);
}
