//! Listing Photo WASM - WebAssembly bindings for the listing photo editor
//!
//! This crate adapts `listing-photo-core` to a browser host: pointer
//! capture on the preview element, a scroll lock on `document.body`, and
//! RGBA frames for `putImageData`.
//!
//! # Module Structure
//!
//! - `editor` - `JsPhotoEditor` session bindings
//! - `scroll` - Background scroll lock
//! - `types` - WASM-compatible wrapper types for editor output
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPhotoEditor } from '@listing-photo/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsPhotoEditor(undefined, canvas);
//! editor.load(bytes, file.name, innerWidth, innerHeight);
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::prelude::*;

mod editor;
mod scroll;
mod types;

pub use editor::JsPhotoEditor;
pub use types::JsEditResult;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(EnvFilter::new("info"));

    // A second init (hot reload, tests) keeps the first subscriber
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
