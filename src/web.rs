//! Browser bindings
//!
//! Exposes a `World` to a JS host. The host owns the canvas, the animation
//! loop and the pointer; it forwards pointer state each frame, calls
//! `update()`, then reads bodies back as JSON to draw them.

use wasm_bindgen::prelude::*;

use crate::render::{CommandList, draw_world};
use crate::settings::SimSettings;
use crate::sim::{InteractionMode, World};

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Install logging and the panic hook (call once)
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Err only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebWorld {
    world: World,
    debug: bool,
}

#[wasm_bindgen]
impl WebWorld {
    /// World of the given size, seeded from `Math.random()`
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Result<WebWorld, JsValue> {
        let mut settings = SimSettings::with_field(width, height);
        settings.seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self::with_settings(&settings)
    }

    /// World from a JSON settings string
    #[wasm_bindgen(js_name = fromSettings)]
    pub fn from_settings(json: &str) -> Result<WebWorld, JsValue> {
        let settings = SimSettings::from_json_str(json).map_err(to_js_error)?;
        Self::with_settings(&settings)
    }

    fn with_settings(settings: &SimSettings) -> Result<WebWorld, JsValue> {
        let world = World::from_settings(settings).map_err(to_js_error)?;
        Ok(Self {
            world,
            debug: settings.debug_draw,
        })
    }

    pub fn update(&mut self) {
        self.world.update();
    }

    #[wasm_bindgen(js_name = addRandomBall)]
    pub fn add_random_ball(&mut self) -> bool {
        self.world.add_random_ball().is_some()
    }

    #[wasm_bindgen(js_name = setCuePosition)]
    pub fn set_cue_position(&mut self, x: f64, y: f64) {
        self.world.set_cue_position(x, y);
    }

    #[wasm_bindgen(js_name = setCueVelocity)]
    pub fn set_cue_velocity(&mut self, dx: f64, dy: f64) {
        self.world.set_cue_velocity(dx, dy);
    }

    /// "SELECTION" or "CUE" (case-insensitive); anything else is ignored
    #[wasm_bindgen(js_name = setInteractionMode)]
    pub fn set_interaction_mode(&mut self, mode: &str) {
        match mode.to_ascii_uppercase().as_str() {
            "SELECTION" => self.world.set_interaction_mode(InteractionMode::Selection),
            "CUE" => self.world.set_interaction_mode(InteractionMode::Cue),
            other => log::warn!("Unknown interaction mode: {}", other),
        }
    }

    #[wasm_bindgen(js_name = toggleInteractionMode)]
    pub fn toggle_interaction_mode(&mut self) -> String {
        self.world.toggle_interaction_mode().as_str().to_uppercase()
    }

    #[wasm_bindgen(js_name = selectClicked)]
    pub fn select_clicked(&mut self) -> bool {
        self.world.select_clicked();
        self.world.selected_body().is_some()
    }

    /// Color of the selected body, if any
    #[wasm_bindgen(js_name = selectedColor)]
    pub fn selected_color(&self) -> Option<String> {
        self.world
            .selected_body()
            .map(|b| b.color().as_str().to_string())
    }

    #[wasm_bindgen(js_name = setSelectedColor)]
    pub fn set_selected_color(&mut self, color: &str) -> bool {
        self.world.set_selected_color(color)
    }

    pub fn deselect(&mut self) {
        self.world.deselect();
    }

    /// Full snapshot as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.world.snapshot()).map_err(to_js_error)
    }

    /// Bodies as a JSON array
    pub fn bodies(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.world.bodies()).map_err(to_js_error)
    }

    /// Draw commands for this frame as JSON
    #[wasm_bindgen(js_name = drawCommands)]
    pub fn draw_commands(&self) -> Result<String, JsValue> {
        let mut list = CommandList::new();
        draw_world(&self.world, &mut list, self.debug);
        serde_json::to_string(&list).map_err(to_js_error)
    }
}
