#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod dom;
pub mod media;
pub mod pages;
pub mod paths;
pub mod recorder;
pub mod router;
pub mod toast;

/// Re-export of the platform-agnostic core.
pub use ragefest_game as game;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    dom::init_console_logging(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
    yew::Renderer::<app::App>::new().render();
}
