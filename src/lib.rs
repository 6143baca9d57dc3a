//! ProBot landing page effects: background particles, twinkling decor,
//! entrance transitions, card tilt and the "add bot" invite modal.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
mod bootstrap;
pub mod utils {
    pub mod dom;
}
pub mod effects {
    pub mod entrance;
    pub mod particle_canvas;
    pub mod particles;
    pub mod sparkle;
    pub mod tilt;
}
pub mod invite {
    pub mod dom_host;
    pub mod modal;
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(config::get_log_level()));
    bootstrap::run_when_ready();
}

/// Stops both animation loops, e.g. for `prefers-reduced-motion`.
#[wasm_bindgen(js_name = pauseEffects)]
pub fn pause_effects() {
    bootstrap::with_page(|page| page.pause());
}

#[wasm_bindgen(js_name = resumeEffects)]
pub fn resume_effects() {
    bootstrap::with_page(|page| page.resume());
}
