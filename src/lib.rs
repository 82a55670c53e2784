//! # carepoint-web
//!
//! Leptos + WASM front-end for the CarePoint patient portal.
//!
//! The session lifecycle and route decisions live in the `session` crate;
//! this crate supplies the browser pieces (`localStorage`, `fetch`, clock),
//! wires them into a [`session::SessionStore`] provided as context, and gates
//! every route through [`components::protected::Protected`].

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install console hooks and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
