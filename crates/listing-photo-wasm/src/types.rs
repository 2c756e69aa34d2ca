//! WASM-compatible wrapper types for editor output.

use listing_photo_core::editor::EditorState;
use listing_photo_core::EditResult;
use wasm_bindgen::prelude::*;

/// Encoded export handed back to the upload pipeline.
///
/// `bytes()` copies the JPEG out of WASM memory. Wrap it in a `Blob` or
/// `File` with `mimeType` and `filename` for upload.
#[wasm_bindgen]
pub struct JsEditResult {
    bytes: Vec<u8>,
    mime_type: String,
    filename: String,
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsEditResult {
    /// Encoded image bytes as a `Uint8Array`.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    #[wasm_bindgen(getter, js_name = mimeType)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl From<EditResult> for JsEditResult {
    fn from(result: EditResult) -> Self {
        Self {
            bytes: result.bytes,
            mime_type: result.mime_type,
            filename: result.filename,
            width: result.width,
            height: result.height,
        }
    }
}

/// Session state as exposed to JavaScript.
pub(crate) fn state_name(state: EditorState) -> String {
    state.as_str().to_string()
}
