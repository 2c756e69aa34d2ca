//! Photo editor session bindings.
//!
//! # Example
//!
//! ```typescript
//! import { JsPhotoEditor } from '@listing-photo/wasm';
//!
//! const editor = new JsPhotoEditor({ pinchSensitivity: 200 }, canvas);
//! editor.load(new Uint8Array(await file.arrayBuffer()), file.name, innerWidth, innerHeight);
//!
//! const draw = () => {
//!   const data = new ImageData(editor.preview_rgba(), editor.previewWidth, editor.previewHeight);
//!   canvas.getContext('2d').putImageData(data, 0, 0);
//! };
//! // `active` maps pointerId to the latest {pointerId, x, y}
//! canvas.onpointerdown = (e) => { track(e); editor.pointer_start([...active.values()]); draw(); };
//!
//! const result = editor.apply();
//! if (result) upload(new File([result.bytes()], result.filename, { type: result.mimeType }));
//! ```

use listing_photo_core::editor::{EditorController, EditorKey};
use listing_photo_core::{
    CaptureRequest, EditorConfig, ImageHandle, PointerInput, PointerSample, Viewport,
};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::scroll::BodyScrollLock;
use crate::types::{state_name, JsEditResult};

/// One editing session, from open to apply or cancel.
///
/// Opening locks background scrolling on `document.body`; apply, cancel
/// and `free()` unlock it.
#[wasm_bindgen]
pub struct JsPhotoEditor {
    inner: EditorController,
    surface: Option<Element>,
}

#[wasm_bindgen]
impl JsPhotoEditor {
    /// Open a session.
    ///
    /// # Arguments
    /// * `config` - Optional `{ pinchSensitivity, previewMargin, exportQuality }`
    /// * `surface` - Optional preview element that receives pointer capture
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, surface: Option<Element>) -> Result<JsPhotoEditor, JsValue> {
        let config = parse_config(config)?;
        info!(?config, "photo editor opened");
        Ok(JsPhotoEditor {
            inner: EditorController::open_with_host(
                config,
                Box::new(BodyScrollLock::for_document()),
            ),
            surface,
        })
    }

    /// Decode and show an image. Returns false if it could not be decoded.
    pub fn load(
        &mut self,
        bytes: &[u8],
        name: &str,
        viewport_width: f64,
        viewport_height: f64,
    ) -> bool {
        let loaded = self.inner.load(
            ImageHandle::new(bytes.to_vec(), name),
            Viewport::new(viewport_width, viewport_height),
        );
        let pending = self.inner.take_capture_requests();
        self.apply_captures(pending);
        loaded
    }

    /// `pointerdown`: `points` is every active `{pointerId, x, y}`.
    pub fn pointer_start(&mut self, points: JsValue) -> Result<(), JsValue> {
        let points = parse_points(points)?;
        self.pointer(PointerInput::Start(points));
        Ok(())
    }

    /// `pointermove`: `points` is every active `{pointerId, x, y}`.
    pub fn pointer_move(&mut self, points: JsValue) -> Result<(), JsValue> {
        let points = parse_points(points)?;
        self.pointer(PointerInput::Move(points));
        Ok(())
    }

    /// `pointerup`: `points` is the pointers still down.
    pub fn pointer_end(&mut self, points: JsValue) -> Result<(), JsValue> {
        let points = parse_points(points)?;
        self.pointer(PointerInput::End(points));
        Ok(())
    }

    /// `pointercancel`
    pub fn pointer_cancel(&mut self) {
        self.pointer(PointerInput::Cancel);
    }

    pub fn rotate_left(&mut self) {
        self.inner.rotate_left();
    }

    pub fn rotate_right(&mut self) {
        self.inner.rotate_right();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.inner.set_zoom(zoom);
    }

    pub fn reset_all(&mut self) {
        self.inner.reset_all();
    }

    /// `keydown` with `KeyboardEvent.key`. Returns true when handled.
    pub fn key_down(&mut self, key: &str) -> bool {
        let handled = self.inner.handle_key(EditorKey::from_name(key));
        let pending = self.inner.take_capture_requests();
        self.apply_captures(pending);
        handled
    }

    /// Export the edit. `undefined` means nothing was produced and the
    /// session is still open.
    pub fn apply(&mut self) -> Option<JsEditResult> {
        let result = self.inner.apply().map(JsEditResult::from);
        let pending = self.inner.take_capture_requests();
        self.apply_captures(pending);
        result
    }

    pub fn cancel(&mut self) {
        self.inner.cancel();
        let pending = self.inner.take_capture_requests();
        self.apply_captures(pending);
    }

    /// `"idle"`, `"loaded"`, `"editing"` or `"closed"`.
    pub fn state(&self) -> String {
        state_name(self.inner.state())
    }

    #[wasm_bindgen(getter, js_name = previewWidth)]
    pub fn preview_width(&self) -> u32 {
        self.inner.preview().map_or(0, |frame| frame.width)
    }

    #[wasm_bindgen(getter, js_name = previewHeight)]
    pub fn preview_height(&self) -> u32 {
        self.inner.preview().map_or(0, |frame| frame.height)
    }

    /// Current preview frame as RGBA for `ImageData`; empty when nothing is loaded.
    pub fn preview_rgba(&self) -> js_sys::Uint8ClampedArray {
        let rgba = self.inner.preview().map(|frame| frame.to_rgba()).unwrap_or_default();
        js_sys::Uint8ClampedArray::from(rgba.as_slice())
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.transform().rotation_degrees()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.transform().zoom()
    }
}

impl JsPhotoEditor {
    fn pointer(&mut self, input: PointerInput) {
        let captures = self.inner.handle_pointer(&input);
        self.apply_captures(captures);
    }

    fn apply_captures(&self, captures: Vec<CaptureRequest>) {
        let Some(surface) = &self.surface else {
            return;
        };

        for capture in captures {
            let result = match capture {
                CaptureRequest::Acquire(id) => surface.set_pointer_capture(id),
                CaptureRequest::Release(id) => surface.release_pointer_capture(id),
            };
            // Capture is best effort: the pointer may already be gone
            if let Err(err) = result {
                debug!(?capture, ?err, "pointer capture change failed");
            }
        }
    }
}

fn parse_config(config: JsValue) -> Result<EditorConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(EditorConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))
}

fn parse_points(points: JsValue) -> Result<Vec<PointerSample>, JsValue> {
    serde_wasm_bindgen::from_value(points)
        .map_err(|e| JsValue::from_str(&format!("Invalid pointer points: {}", e)))
}
