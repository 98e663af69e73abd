use glossa_parser::word_spans;
use glossa_protocol::{Lexicon, Register};
use glossa_solver::{AnalysisOptions, Engine};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The Engine Instance running in the Browser
#[wasm_bindgen]
pub struct GlossaEngine {
    // We own the raw binary of the atlas (loaded via fetch() in JS)
    data: Vec<u8>,
    formal: bool,
}

#[wasm_bindgen]
impl GlossaEngine {
    /// Takes ownership of the atlas bytes and validates the archive once;
    /// analysis afterwards is zero-copy.
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<GlossaEngine, JsValue> {
        rkyv::check_archived_root::<Lexicon>(&data)
            .map_err(|e| JsValue::from_str(&format!("Invalid atlas archive: {e}")))?;
        Ok(Self {
            data,
            formal: false,
        })
    }

    /// Formal register permits final-N retention everywhere.
    pub fn set_formal(&mut self, formal: bool) {
        self.formal = formal;
    }

    /// The Main Loop: Text -> Tokenizer -> Engine -> JSON
    pub fn analyze(&self, input: &str) -> JsValue {
        // Zero-copy load; the archive was validated in the constructor.
        let lexicon = unsafe { rkyv::archived_root::<Lexicon>(&self.data) };

        let options = AnalysisOptions {
            register: if self.formal {
                Register::Formal
            } else {
                Register::Standard
            },
        };
        let engine = Engine::new(lexicon, options);

        let result = engine.analyze(&word_spans(input));

        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }
}
