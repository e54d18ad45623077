// ==================== Imports ====================
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

// macros first, so every module below can log
#[macro_use]
pub mod browser;
pub mod config;
pub mod engine;
pub mod game;
pub mod message;
pub mod sprite;
pub mod world;

use crate::engine::GameLoop;
use crate::game::Portfolio;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - routes panics to the console
/// - loads configuration and images
/// - starts the game loop, or reports why it could not
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(Portfolio::new()).await {
            error!("Could not start the portfolio : {:#}", err);
            if let Err(alert_err) = browser::alert(&format!("This page failed to load.\n\n{:#}", err)) {
                error!("{:#}", alert_err);
            }
        }
    });

    Ok(())
}
