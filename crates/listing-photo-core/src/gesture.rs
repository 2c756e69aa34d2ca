//! Normalization of raw pointer/touch input into pan and pinch intents.
//!
//! Every input event carries the full list of points that are down after
//! the event, the way touch events report `touches`. A mouse is a single
//! point. From that list the tracker derives one of two gestures:
//!
//! - **Pan**: one point. The offset is recomputed from the fixed start of
//!   the drag (`start_offset + (current - start)`), never accumulated, so
//!   rounding cannot drift.
//! - **Pinch**: two or more points. Zoom changes by the distance delta
//!   since the previous move divided by the pinch sensitivity, which gives
//!   velocity-proportional zoom rather than ratio-to-start zoom.
//!
//! Two points always win over one. Dropping from two points to one ends
//! the pinch and starts a fresh pan at the remaining point's current
//! position.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::transform::PanOffset;

/// A point in preview-surface pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One active pointer as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub pointer_id: i32,
    pub x: f64,
    pub y: f64,
}

impl PointerSample {
    pub fn new(pointer_id: i32, x: f64, y: f64) -> Self {
        Self { pointer_id, x, y }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Raw input from the preview surface.
///
/// Each variant lists the points still down after the event.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Start(Vec<PointerSample>),
    Move(Vec<PointerSample>),
    End(Vec<PointerSample>),
    /// The host aborted the interaction; treated as every point lifting.
    Cancel,
}

/// Intents derived from raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    PanStart { origin: Point },
    /// `offset` is the absolute pan to apply: start offset plus `delta`.
    PanMove { delta: PanOffset, offset: PanOffset },
    PanEnd,
    PinchStart { distance: f64 },
    /// `zoom_delta` is `distance_delta / sensitivity`.
    PinchMove { distance_delta: f64, zoom_delta: f64 },
    PinchEnd,
}

/// Pointer capture the host should perform.
///
/// Acquire routes later move/up events to the surface even when the
/// pointer leaves it. Release is best-effort on the host side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    Acquire(i32),
    Release(i32),
}

/// Result of feeding one input event to the tracker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureUpdate {
    pub intents: Vec<GestureIntent>,
    /// Capture changes in the order the host should perform them.
    pub captures: Vec<CaptureRequest>,
}

/// State kept between the start and end of one gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSession {
    Pan {
        pointer_id: i32,
        start: Point,
        start_offset: PanOffset,
    },
    Pinch {
        last_distance: f64,
    },
}

/// Turns pointer input into [`GestureIntent`]s.
///
/// Each tracker owns its session, so independent editors never share
/// gesture state.
#[derive(Debug, Clone)]
pub struct InputGestureTracker {
    sensitivity: f64,
    session: Option<GestureSession>,
    captured: Option<i32>,
}

impl InputGestureTracker {
    /// Create a tracker with the given pinch sensitivity (pixels per 1.0 zoom).
    pub fn new(sensitivity: f64) -> Self {
        Self {
            sensitivity,
            session: None,
            captured: None,
        }
    }

    /// Whether a gesture is in flight.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Feed one input event.
    ///
    /// `current_pan` is the pan offset at this instant; it seeds the start
    /// offset whenever a pan (re)starts.
    pub fn handle(&mut self, input: &PointerInput, current_pan: PanOffset) -> GestureUpdate {
        let mut update = GestureUpdate::default();
        match input {
            PointerInput::Start(points) => self.on_points(points, current_pan, true, &mut update),
            PointerInput::Move(points) => self.on_points(points, current_pan, false, &mut update),
            PointerInput::End(remaining) => {
                if remaining.is_empty() {
                    self.finish(&mut update);
                } else {
                    self.on_points(remaining, current_pan, true, &mut update);
                }
            }
            PointerInput::Cancel => self.finish(&mut update),
        }
        update
    }

    /// Drop any session, returning the capture release the host still owes.
    pub fn reset(&mut self) -> Option<CaptureRequest> {
        let mut update = GestureUpdate::default();
        self.finish(&mut update);
        update.captures.pop()
    }

    /// React to the current point list. `rebaseline` is set when the set of
    /// points changed (start/end), so the session must be re-seeded rather
    /// than advanced.
    fn on_points(
        &mut self,
        points: &[PointerSample],
        current_pan: PanOffset,
        rebaseline: bool,
        update: &mut GestureUpdate,
    ) {
        match points {
            [] => {}
            [point] => self.on_single(*point, current_pan, rebaseline, update),
            [a, b, ..] => self.on_pinch(a.position().distance(b.position()), rebaseline, update),
        }
    }

    fn on_single(
        &mut self,
        point: PointerSample,
        current_pan: PanOffset,
        rebaseline: bool,
        update: &mut GestureUpdate,
    ) {
        match self.session {
            Some(GestureSession::Pinch { .. }) => {
                // Never reuse a stale pan start after a pinch
                update.intents.push(GestureIntent::PinchEnd);
                self.begin_pan(point, current_pan, update);
            }
            Some(GestureSession::Pan {
                pointer_id,
                start,
                start_offset,
            }) => {
                if rebaseline && pointer_id != point.pointer_id {
                    update.intents.push(GestureIntent::PanEnd);
                    self.begin_pan(point, current_pan, update);
                } else if !rebaseline {
                    let delta = PanOffset::new(point.x - start.x, point.y - start.y);
                    update.intents.push(GestureIntent::PanMove {
                        delta,
                        offset: start_offset + delta,
                    });
                }
            }
            None if rebaseline => self.begin_pan(point, current_pan, update),
            // Hover without a press
            None => {}
        }
    }

    fn on_pinch(&mut self, distance: f64, rebaseline: bool, update: &mut GestureUpdate) {
        match self.session {
            Some(GestureSession::Pinch { last_distance }) if !rebaseline => {
                let distance_delta = distance - last_distance;
                let zoom_delta = distance_delta / self.sensitivity;
                update.intents.push(GestureIntent::PinchMove {
                    distance_delta,
                    zoom_delta,
                });
                self.session = Some(GestureSession::Pinch {
                    last_distance: distance,
                });
            }
            Some(GestureSession::Pinch { .. }) => {
                // Finger set changed mid-pinch: measure from here on
                self.session = Some(GestureSession::Pinch {
                    last_distance: distance,
                });
            }
            previous => {
                if matches!(previous, Some(GestureSession::Pan { .. })) {
                    update.intents.push(GestureIntent::PanEnd);
                }
                debug!(distance, "pinch started");
                update.intents.push(GestureIntent::PinchStart { distance });
                self.session = Some(GestureSession::Pinch {
                    last_distance: distance,
                });
            }
        }
    }

    fn begin_pan(&mut self, point: PointerSample, current_pan: PanOffset, update: &mut GestureUpdate) {
        let origin = point.position();
        debug!(x = origin.x, y = origin.y, pointer_id = point.pointer_id, "pan started");
        update.intents.push(GestureIntent::PanStart { origin });
        self.session = Some(GestureSession::Pan {
            pointer_id: point.pointer_id,
            start: origin,
            start_offset: current_pan,
        });
        // The dragging pointer must own capture; hand it over from a lifted one
        if self.captured != Some(point.pointer_id) {
            if let Some(previous) = self.captured.take() {
                update.captures.push(CaptureRequest::Release(previous));
            }
            self.captured = Some(point.pointer_id);
            update.captures.push(CaptureRequest::Acquire(point.pointer_id));
        }
    }

    fn finish(&mut self, update: &mut GestureUpdate) {
        match self.session.take() {
            Some(GestureSession::Pan { .. }) => update.intents.push(GestureIntent::PanEnd),
            Some(GestureSession::Pinch { .. }) => update.intents.push(GestureIntent::PinchEnd),
            None => {}
        }
        if let Some(pointer_id) = self.captured.take() {
            update.captures.push(CaptureRequest::Release(pointer_id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> InputGestureTracker {
        InputGestureTracker::new(200.0)
    }

    fn one(x: f64, y: f64) -> Vec<PointerSample> {
        vec![PointerSample::new(1, x, y)]
    }

    fn two(distance: f64) -> Vec<PointerSample> {
        vec![
            PointerSample::new(1, 0.0, 0.0),
            PointerSample::new(2, distance, 0.0),
        ]
    }

    #[test]
    fn test_drag_recomputes_from_start() {
        let mut t = tracker();
        let start = t.handle(&PointerInput::Start(one(100.0, 100.0)), PanOffset::default());
        assert_eq!(
            start.intents,
            vec![GestureIntent::PanStart {
                origin: Point::new(100.0, 100.0)
            }]
        );
        assert_eq!(start.captures, vec![CaptureRequest::Acquire(1)]);

        let moved = t.handle(&PointerInput::Move(one(150.0, 130.0)), PanOffset::default());
        assert_eq!(
            moved.intents,
            vec![GestureIntent::PanMove {
                delta: PanOffset::new(50.0, 30.0),
                offset: PanOffset::new(50.0, 30.0),
            }]
        );
    }

    #[test]
    fn test_drag_adds_to_start_offset() {
        let mut t = tracker();
        t.handle(&PointerInput::Start(one(0.0, 0.0)), PanOffset::new(10.0, -5.0));

        // The current pan passed on move is ignored; the start offset is fixed
        let moved = t.handle(&PointerInput::Move(one(3.0, 4.0)), PanOffset::new(999.0, 999.0));
        assert_eq!(
            moved.intents,
            vec![GestureIntent::PanMove {
                delta: PanOffset::new(3.0, 4.0),
                offset: PanOffset::new(13.0, -1.0),
            }]
        );
    }

    #[test]
    fn test_hover_without_press_is_ignored() {
        let mut t = tracker();
        let update = t.handle(&PointerInput::Move(one(5.0, 5.0)), PanOffset::default());
        assert!(update.intents.is_empty());
        assert!(!t.is_active());
    }

    #[test]
    fn test_release_ends_pan_and_capture() {
        let mut t = tracker();
        t.handle(&PointerInput::Start(one(0.0, 0.0)), PanOffset::default());
        let end = t.handle(&PointerInput::End(vec![]), PanOffset::default());

        assert_eq!(end.intents, vec![GestureIntent::PanEnd]);
        assert_eq!(end.captures, vec![CaptureRequest::Release(1)]);
        assert!(!t.is_active());
    }

    #[test]
    fn test_pinch_zoom_delta_uses_previous_distance() {
        let mut t = tracker();
        let start = t.handle(&PointerInput::Start(two(100.0)), PanOffset::default());
        assert_eq!(start.intents, vec![GestureIntent::PinchStart { distance: 100.0 }]);

        let first = t.handle(&PointerInput::Move(two(140.0)), PanOffset::default());
        assert_eq!(
            first.intents,
            vec![GestureIntent::PinchMove {
                distance_delta: 40.0,
                zoom_delta: 0.2,
            }]
        );

        // Second move is relative to 140, not to the initial 100
        let second = t.handle(&PointerInput::Move(two(120.0)), PanOffset::default());
        assert_eq!(
            second.intents,
            vec![GestureIntent::PinchMove {
                distance_delta: -20.0,
                zoom_delta: -0.1,
            }]
        );
    }

    #[test]
    fn test_second_finger_suppresses_pan() {
        let mut t = tracker();
        t.handle(&PointerInput::Start(one(0.0, 0.0)), PanOffset::default());
        let update = t.handle(&PointerInput::Start(two(50.0)), PanOffset::default());

        assert_eq!(
            update.intents,
            vec![
                GestureIntent::PanEnd,
                GestureIntent::PinchStart { distance: 50.0 }
            ]
        );
        assert!(matches!(t.session(), Some(GestureSession::Pinch { .. })));

        let moved = t.handle(&PointerInput::Move(two(60.0)), PanOffset::default());
        assert!(moved
            .intents
            .iter()
            .all(|i| !matches!(i, GestureIntent::PanMove { .. })));
    }

    #[test]
    fn test_two_to_one_recaptures_pan_start() {
        let mut t = tracker();
        t.handle(&PointerInput::Start(two(100.0)), PanOffset::default());
        t.handle(&PointerInput::Move(two(150.0)), PanOffset::default());

        let remaining = vec![PointerSample::new(2, 150.0, 0.0)];
        let lifted = t.handle(&PointerInput::End(remaining), PanOffset::new(7.0, 7.0));
        assert_eq!(
            lifted.intents,
            vec![
                GestureIntent::PinchEnd,
                GestureIntent::PanStart {
                    origin: Point::new(150.0, 0.0)
                }
            ]
        );

        // No jump: moving from the remaining point's position starts at zero delta
        let moved = t.handle(
            &PointerInput::Move(vec![PointerSample::new(2, 155.0, 0.0)]),
            PanOffset::new(7.0, 7.0),
        );
        assert_eq!(
            moved.intents,
            vec![GestureIntent::PanMove {
                delta: PanOffset::new(5.0, 0.0),
                offset: PanOffset::new(12.0, 7.0),
            }]
        );
    }

    #[test]
    fn test_pan_after_pinch_moves_capture_to_remaining_pointer() {
        let mut t = tracker();
        let first = t.handle(&PointerInput::Start(one(0.0, 0.0)), PanOffset::default());
        assert_eq!(first.captures, vec![CaptureRequest::Acquire(1)]);

        let pinch = t.handle(&PointerInput::Start(two(100.0)), PanOffset::default());
        assert!(pinch.captures.is_empty());

        // Pointer 1 lifts; pointer 2 keeps dragging and needs capture
        let remaining = vec![PointerSample::new(2, 100.0, 0.0)];
        let lifted = t.handle(&PointerInput::End(remaining), PanOffset::default());
        assert_eq!(
            lifted.captures,
            vec![CaptureRequest::Release(1), CaptureRequest::Acquire(2)]
        );

        let done = t.handle(&PointerInput::End(vec![]), PanOffset::default());
        assert_eq!(done.captures, vec![CaptureRequest::Release(2)]);
    }

    #[test]
    fn test_same_pointer_rebaseline_keeps_capture() {
        let mut t = tracker();
        t.handle(&PointerInput::Start(two(100.0)), PanOffset::default());

        // Pinch that started without a pan: the remaining pointer acquires once
        let lifted = t.handle(&PointerInput::End(one(0.0, 0.0)), PanOffset::default());
        assert_eq!(lifted.captures, vec![CaptureRequest::Acquire(1)]);

        let again = t.handle(&PointerInput::Start(two(80.0)), PanOffset::default());
        assert!(again.captures.is_empty());
        let back = t.handle(&PointerInput::End(one(0.0, 0.0)), PanOffset::default());
        assert!(back.captures.is_empty());
    }

    #[test]
    fn test_cancel_clears_session() {
        let mut t = tracker();
        t.handle(&PointerInput::Start(two(80.0)), PanOffset::default());
        let update = t.handle(&PointerInput::Cancel, PanOffset::default());

        assert_eq!(update.intents, vec![GestureIntent::PinchEnd]);
        assert!(t.session().is_none());
    }

    #[test]
    fn test_third_finger_rebaselines_pinch() {
        let mut t = tracker();
        t.handle(&PointerInput::Start(two(100.0)), PanOffset::default());

        let mut three = two(300.0);
        three.push(PointerSample::new(3, 10.0, 10.0));
        let update = t.handle(&PointerInput::Start(three), PanOffset::default());
        assert!(update.intents.is_empty());

        let moved = t.handle(&PointerInput::Move(two(310.0)), PanOffset::default());
        assert_eq!(
            moved.intents,
            vec![GestureIntent::PinchMove {
                distance_delta: 10.0,
                zoom_delta: 0.05,
            }]
        );
    }

    #[test]
    fn test_reset_returns_outstanding_release() {
        let mut t = tracker();
        assert_eq!(t.reset(), None);

        t.handle(&PointerInput::Start(one(1.0, 1.0)), PanOffset::default());
        assert_eq!(t.reset(), Some(CaptureRequest::Release(1)));
        assert!(!t.is_active());
    }
}
