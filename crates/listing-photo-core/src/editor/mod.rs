//! Editor session lifecycle.
//!
//! ```text
//! Idle ──load──▶ Loaded ◀──gesture end── Editing
//!                  │  └────gesture start────▶ │
//!                  └──apply ok / cancel──▶ Closed (terminal)
//! ```
//!
//! The controller is the only writer of the [`TransformState`]. Every
//! mutation repaints the preview before returning, so the frame the host
//! reads is never stale.

mod host;
mod load;

use tracing::{debug, info, warn};

pub use host::{BackgroundScroll, EditorKey, NoBackgroundScroll, ScrollSuppression};
pub use load::{ImageHandle, LoadOutcome, LoadRequest, LoadTicket, SourceImage};

use crate::config::EditorConfig;
use crate::decode::DecodedImage;
use crate::export::{EditResult, ExportComposer};
use crate::gesture::{CaptureRequest, GestureIntent, InputGestureTracker, PointerInput};
use crate::preview::{render_preview, PreviewSurface, Viewport};
use crate::transform::{PanOffset, TransformState, ROTATION_STEP};

/// Lifecycle state of an editor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    /// No image assigned.
    Idle,
    /// Image assigned, no gesture in flight.
    Loaded,
    /// A gesture is in flight.
    Editing,
    /// Session ended by apply or cancel.
    Closed,
}

impl EditorState {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorState::Idle => "idle",
            EditorState::Loaded => "loaded",
            EditorState::Editing => "editing",
            EditorState::Closed => "closed",
        }
    }
}

/// Orchestrates one photo editing session.
#[derive(Debug)]
pub struct EditorController {
    config: EditorConfig,
    state: EditorState,
    transform: TransformState,
    tracker: InputGestureTracker,
    source: Option<SourceImage>,
    frame: Option<DecodedImage>,
    latest_ticket: LoadTicket,
    /// Capture changes the host has not collected yet.
    pending_captures: Vec<CaptureRequest>,
    scroll: Option<ScrollSuppression>,
}

impl EditorController {
    /// Open a session without a host scroll seam.
    pub fn new(config: EditorConfig) -> Self {
        Self::open_with_host(config, Box::new(NoBackgroundScroll))
    }

    /// Open a session, suppressing host background scrolling until close.
    pub fn open_with_host(config: EditorConfig, host: Box<dyn BackgroundScroll>) -> Self {
        let tracker = InputGestureTracker::new(config.effective_pinch_sensitivity());
        Self {
            config,
            state: EditorState::Idle,
            transform: TransformState::default(),
            tracker,
            source: None,
            frame: None,
            latest_ticket: LoadTicket(0),
            pending_captures: Vec::new(),
            scroll: Some(ScrollSuppression::acquire(host)),
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == EditorState::Closed
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    /// The current preview frame, if an image is loaded.
    pub fn preview(&self) -> Option<&DecodedImage> {
        self.frame.as_ref()
    }

    pub fn preview_surface(&self) -> Option<PreviewSurface> {
        self.source.as_ref().map(SourceImage::surface)
    }

    /// Start loading `handle`, superseding any load still in flight.
    ///
    /// Returns `None` once the session is closed.
    pub fn begin_load(&mut self, handle: ImageHandle, viewport: Viewport) -> Option<LoadRequest> {
        if self.is_closed() {
            warn!("load ignored: editor is closed");
            return None;
        }
        self.latest_ticket = LoadTicket(self.latest_ticket.0 + 1);
        debug!(ticket = self.latest_ticket.0, name = %handle.name, "load started");

        Some(LoadRequest {
            ticket: self.latest_ticket,
            handle,
            viewport,
            margin: self.config.preview_margin,
        })
    }

    /// Install a decoded image. Returns whether the session now shows it.
    ///
    /// Outcomes from superseded loads are dropped. A failed decode leaves
    /// the session idle with nothing rendered.
    pub fn finish_load(&mut self, outcome: LoadOutcome) -> bool {
        if self.is_closed() {
            return false;
        }
        if outcome.ticket != self.latest_ticket {
            debug!(
                ticket = outcome.ticket.0,
                latest = self.latest_ticket.0,
                "stale load dropped"
            );
            return false;
        }

        self.drop_gesture("load");
        self.transform.reset();

        match outcome.result {
            Ok(source) => {
                info!(
                    name = source.name(),
                    width = source.width(),
                    height = source.height(),
                    preview_width = source.surface().width,
                    preview_height = source.surface().height,
                    "image loaded"
                );
                self.source = Some(source);
                self.state = EditorState::Loaded;
                self.refresh_preview();
                true
            }
            Err(err) => {
                warn!(error = %err, "image load failed");
                self.source = None;
                self.frame = None;
                self.state = EditorState::Idle;
                false
            }
        }
    }

    /// Decode and install `handle` synchronously.
    pub fn load(&mut self, handle: ImageHandle, viewport: Viewport) -> bool {
        match self.begin_load(handle, viewport) {
            Some(request) => self.finish_load(request.decode()),
            None => false,
        }
    }

    pub fn rotate_left(&mut self) {
        self.mutate(|t| t.rotate_by(-ROTATION_STEP));
    }

    pub fn rotate_right(&mut self) {
        self.mutate(|t| t.rotate_by(ROTATION_STEP));
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.mutate(|t| t.set_zoom(zoom));
    }

    pub fn set_pan(&mut self, offset: PanOffset) {
        self.mutate(|t| t.set_pan(offset));
    }

    pub fn reset_all(&mut self) {
        self.mutate(TransformState::reset);
    }

    /// Feed one pointer event from the preview surface.
    ///
    /// Returns every pending pointer capture change, oldest first.
    pub fn handle_pointer(&mut self, input: &PointerInput) -> Vec<CaptureRequest> {
        if self.source.is_none() || self.is_closed() {
            return self.take_capture_requests();
        }

        let update = self.tracker.handle(input, self.transform.pan());
        let mut changed = false;
        for intent in &update.intents {
            match *intent {
                GestureIntent::PanMove { offset, .. } => {
                    self.transform.set_pan(offset);
                    changed = true;
                }
                GestureIntent::PinchMove { zoom_delta, .. } => {
                    self.transform.zoom_by(zoom_delta);
                    changed = true;
                }
                GestureIntent::PanStart { .. }
                | GestureIntent::PanEnd
                | GestureIntent::PinchStart { .. }
                | GestureIntent::PinchEnd => {}
            }
        }

        self.state = if self.tracker.is_active() {
            EditorState::Editing
        } else {
            EditorState::Loaded
        };
        if changed {
            self.refresh_preview();
        }
        self.pending_captures.extend(update.captures);
        self.take_capture_requests()
    }

    /// Collect capture changes the host still owes, such as the release of
    /// a pointer whose drag was cut short by a load or by closing.
    pub fn take_capture_requests(&mut self) -> Vec<CaptureRequest> {
        std::mem::take(&mut self.pending_captures)
    }

    /// React to a key press. Returns whether the key was handled.
    pub fn handle_key(&mut self, key: EditorKey) -> bool {
        match key {
            EditorKey::Escape if !self.is_closed() => {
                self.cancel();
                true
            }
            _ => false,
        }
    }

    /// Render and encode the export.
    ///
    /// On success the session closes and the result is returned. On any
    /// failure the session stays open and `None` is returned so the caller
    /// can retry.
    pub fn apply(&mut self) -> Option<EditResult> {
        if self.is_closed() {
            warn!("apply ignored: editor is closed");
            return None;
        }

        let composer = ExportComposer {
            transform: self.transform,
            preview: self.preview_surface(),
            quality: self.config.jpeg_quality(),
        };
        let source = self.source.as_ref();
        let result = composer.compose(
            source.map(|s| s.full().as_ref()),
            source.map(SourceImage::name).unwrap_or_default(),
        );

        match result {
            Ok(edit) => {
                info!(filename = %edit.filename, bytes = edit.bytes.len(), "edit applied");
                self.close();
                Some(edit)
            }
            Err(err) => {
                warn!(error = %err, "apply produced no result");
                None
            }
        }
    }

    /// End the session without a result.
    pub fn cancel(&mut self) {
        if self.is_closed() {
            return;
        }
        info!("edit cancelled");
        self.close();
    }

    fn close(&mut self) {
        self.drop_gesture("close");
        self.source = None;
        self.frame = None;
        self.state = EditorState::Closed;
        // Dropping the guard restores background scrolling
        self.scroll = None;
    }

    fn drop_gesture(&mut self, reason: &'static str) {
        if let Some(release) = self.tracker.reset() {
            debug!(?release, reason, "gesture dropped");
            self.pending_captures.push(release);
        }
    }

    fn mutate(&mut self, f: impl FnOnce(&mut TransformState)) {
        if self.source.is_none() || self.is_closed() {
            debug!(state = self.state.as_str(), "transform command ignored");
            return;
        }
        f(&mut self.transform);
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        self.frame = self
            .source
            .as_ref()
            .map(|source| render_preview(source.preview_bitmap(), source.surface(), &self.transform));
    }
}
