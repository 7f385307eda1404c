use crate::serializers::{from_json, to_json};
use crate::{Line, Sheet, TallyError};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmSheet {
    sheet: Sheet,
}

#[wasm_bindgen]
impl WasmSheet {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();

        WasmSheet {
            sheet: Sheet::new(),
        }
    }

    /// Replace the sheet with a JSON array of line inputs
    #[wasm_bindgen(js_name = evaluate)]
    pub fn evaluate(&mut self, lines_json: &str) -> String {
        match from_json(lines_json) {
            Ok(inputs) => {
                let lines = self.sheet.evaluate(&inputs);
                self.snapshot(&lines)
            }
            Err(e) => error_json(&e),
        }
    }

    #[wasm_bindgen(js_name = updateLine)]
    pub fn update_line(&mut self, index: usize, input: &str) -> String {
        let lines = self.sheet.update_line(index, input);
        self.snapshot(&lines)
    }

    #[wasm_bindgen(js_name = insertLine)]
    pub fn insert_line(&mut self, index: usize, input: &str) -> String {
        let lines = self.sheet.insert_line(index, input);
        self.snapshot(&lines)
    }

    #[wasm_bindgen(js_name = removeLine)]
    pub fn remove_line(&mut self, index: usize) -> String {
        let lines = self.sheet.remove_line(index);
        self.snapshot(&lines)
    }

    #[wasm_bindgen(js_name = appendLine)]
    pub fn append_line(&mut self, input: &str) -> String {
        let lines = self.sheet.append_line(input);
        self.snapshot(&lines)
    }

    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self) -> String {
        let lines = self.sheet.clear();
        self.snapshot(&lines)
    }

    #[wasm_bindgen(js_name = lines)]
    pub fn lines(&self) -> String {
        self.snapshot(self.sheet.lines())
    }

    /// Variable names and values, sorted by name
    #[wasm_bindgen(js_name = variables)]
    pub fn variables(&self) -> String {
        serde_json::to_string(self.sheet.scope().variables())
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize variables"}"#.to_string())
    }
}

impl Default for WasmSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmSheet {
    fn snapshot(&self, lines: &[Line]) -> String {
        to_json(lines, self.sheet.scope()).to_string()
    }
}

fn error_json(error: &TallyError) -> String {
    serde_json::json!({ "error": error.to_string() }).to_string()
}
