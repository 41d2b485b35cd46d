//! WASM bindings for ideagen — powers the web idea generator.

use wasm_bindgen::prelude::*;

use ideagen::core::generator::IdeaGenerator;
use ideagen::data;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct CategoryInfo {
    name: String,
    phrases: usize,
}

// ---------------------------------------------------------------------------
// IdeaDemo — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct IdeaDemo {
    generator: IdeaGenerator,
}

#[wasm_bindgen]
impl IdeaDemo {
    /// Create a generator over the bundled phrase data with the given seed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<IdeaDemo, JsError> {
        let generator = IdeaGenerator::builder()
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Generator build error: {e}")))?;
        Ok(IdeaDemo { generator })
    }

    /// Generate a single idea.
    pub fn generate(&mut self) -> Result<String, JsError> {
        self.generator
            .generate()
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))
    }

    /// Generate several ideas. Returns a JSON array of strings.
    pub fn generate_many(&mut self, count: usize) -> Result<String, JsError> {
        let ideas = self
            .generator
            .generate_many(count)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        serde_json::to_string(&ideas)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON array of the bundled categories and their sizes.
    pub fn categories(&self) -> Result<String, JsError> {
        let phrases = self.generator.phrases();
        let infos: Vec<CategoryInfo> = data::category_names()
            .into_iter()
            .map(|name| CategoryInfo {
                name: name.to_string(),
                phrases: phrases.category(name).map(|p| p.len()).unwrap_or(0),
            })
            .collect();
        serde_json::to_string(&infos)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Restart with a new seed.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let new_demo = IdeaDemo::new(seed)?;
        self.generator = new_demo.generator;
        Ok(())
    }
}
