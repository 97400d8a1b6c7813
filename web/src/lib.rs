//! Third Eye Console – Leptos-based admin console for the camera platform.

pub mod app;
pub mod components;
pub mod model;
pub mod nav;
pub mod pages;

cfg_if::cfg_if! {
    if #[cfg(feature = "ssr")] {
        pub mod server;
    }
}

/// Entry-point called from the WASM bundle to hydrate the server-rendered HTML.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
