//! Background scroll lock on `document.body`.

use listing_photo_core::editor::BackgroundScroll;
use tracing::debug;
use web_sys::HtmlElement;

const OVERFLOW: &str = "overflow";

/// Hides `body` overflow while the editor is open and puts back whatever
/// inline value was there before.
pub struct BodyScrollLock {
    body: Option<HtmlElement>,
    saved: Option<String>,
}

impl BodyScrollLock {
    /// Lock for the current document. Without a document the lock does nothing.
    pub fn for_document() -> Self {
        let body = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body());
        Self { body, saved: None }
    }
}

impl BackgroundScroll for BodyScrollLock {
    fn suppress(&mut self) {
        let Some(body) = &self.body else {
            return;
        };
        let style = body.style();
        self.saved = style.get_property_value(OVERFLOW).ok();
        if let Err(err) = style.set_property(OVERFLOW, "hidden") {
            debug!(?err, "body scroll lock failed");
        }
    }

    fn restore(&mut self) {
        let Some(body) = &self.body else {
            return;
        };
        let style = body.style();
        let previous = self.saved.take().unwrap_or_default();
        let result = if previous.is_empty() {
            style.remove_property(OVERFLOW).map(|_| ())
        } else {
            style.set_property(OVERFLOW, &previous)
        };
        if let Err(err) = result {
            debug!(?err, "body scroll restore failed");
        }
    }
}
