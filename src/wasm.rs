//! Browser binding
//!
//! The page owns the canvas, the key/pointer listeners and the
//! `requestAnimationFrame` loop. It forwards presses here, calls `step` with
//! the frame timestamp and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::config::Config;
use crate::sim::{Autopilot, Engine, Phase};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Flap Engine (wasm) loaded");
}

#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
    /// Let the autopilot play (attract mode)
    demo: bool,
}

impl WasmEngine {
    fn from_config(config: Config, seed: u64) -> Result<WasmEngine, JsError> {
        let engine = Engine::new(config, seed)?;
        Ok(WasmEngine {
            engine,
            demo: false,
        })
    }
}

#[wasm_bindgen]
impl WasmEngine {
    /// Engine with default tuning; seeds from the clock when `seed` is 0
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<WasmEngine, JsError> {
        let seed = if seed == 0 {
            js_sys::Date::now() as u64
        } else {
            seed
        };
        Self::from_config(Config::default(), seed)
    }

    /// Engine from a JSON config (fields not given keep their defaults)
    pub fn with_config(json: &str, seed: u64) -> Result<WasmEngine, JsError> {
        let config = Config::from_json(json)?;
        Self::from_config(config, seed)
    }

    pub fn start(&mut self) {
        self.demo = false;
        self.engine.start();
    }

    pub fn impulse(&mut self) {
        self.demo = false;
        self.engine.impulse();
    }

    /// Hand control to the autopilot until the next player input
    pub fn set_demo(&mut self, demo: bool) {
        self.demo = demo;
    }

    /// Advance one frame; `timestamp` is the rAF timestamp in ms
    pub fn step(&mut self, timestamp: f64) {
        if self.demo {
            let snapshot = self.engine.snapshot();
            if let Some(cmd) = Autopilot.decide(&snapshot, self.engine.config()) {
                self.engine.apply(cmd);
            }
        }
        self.engine.step(timestamp);
    }

    pub fn is_running(&self) -> bool {
        self.engine.phase() == Phase::Running
    }

    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(self.engine.snapshot().to_json()?)
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.engine.take_events())?)
    }
}
