//! JavaScript bindings over [`OthelloEnv`].

use wasm_bindgen::prelude::*;

use crate::config::EnvConfig;
use crate::env::{Action, OthelloEnv};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

#[wasm_bindgen]
pub struct WasmOthello {
    env: OthelloEnv,
}

#[wasm_bindgen]
impl WasmOthello {
    /// `config` may be `undefined` or a partial `EnvConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmOthello, JsError> {
        let config: EnvConfig = if config.is_undefined() || config.is_null() {
            EnvConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            env: OthelloEnv::new(config),
        })
    }

    pub fn reset(&mut self) -> Result<JsValue, JsError> {
        let observation = self.env.reset();
        Ok(serde_wasm_bindgen::to_value(&observation)?)
    }

    pub fn step_index(&mut self, index: usize) -> Result<JsValue, JsError> {
        self.step(Action::Index(index))
    }

    pub fn step_notation(&mut self, notation: &str) -> Result<JsValue, JsError> {
        self.step(Action::from(notation))
    }

    /// Legal moves for the player to move, as linear indices.
    pub fn legal_moves(&self) -> Vec<u8> {
        self.env.state().legal_moves().to_indices()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.env.state().to_snapshot())?)
    }

    /// Final result, or `undefined` while the game is running.
    pub fn result(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.env.state().to_game_result())?)
    }

    pub fn render(&self) -> String {
        self.env.render()
    }
}

impl WasmOthello {
    fn step(&mut self, action: Action) -> Result<JsValue, JsError> {
        let result = self.env.step(action)?;
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }
}
