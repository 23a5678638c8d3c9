#![recursion_limit = "256"]

#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod behavior;
pub mod content;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    // fails only if a logger is already set
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(App);

    if let Err(e) = behavior::web::install_when_ready() {
        log::error!("page behaviors not installed: {e}");
    }
}
