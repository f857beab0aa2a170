//! Discrete gesture events and the callback surface consumers implement.

use super::snapshot::GestureSnapshot;
use crate::sexp::format_event;

/// Events emitted by one engine update, in firing order.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    /// A quick pinch was released.
    Select,
    /// Spread change while five-finger mode is held.
    FiveFingerZoom { delta: f32 },
    /// Raw index fingertip height while scrolling.
    ScrollMove { y: f32 },
    /// Smoothed index fingertip position.
    IndexMove { x: f32, y: f32 },
    /// Dead-zoned index fingertip movement since the previous frame.
    DeltaMove { dx: f32, dy: f32 },
}

impl GestureEvent {
    /// String representation for logging and status output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::FiveFingerZoom { .. } => "five-finger-zoom",
            Self::ScrollMove { .. } => "scroll-move",
            Self::IndexMove { .. } => "index-move",
            Self::DeltaMove { .. } => "delta-move",
        }
    }

    /// Convert the event to an s-expression.
    pub fn to_sexp(&self) -> String {
        let fields = match self {
            Self::Select => vec![],
            Self::FiveFingerZoom { delta } => vec![("delta", format!("{:.4}", delta))],
            Self::ScrollMove { y } => vec![("y", format!("{:.4}", y))],
            Self::IndexMove { x, y } => {
                vec![("x", format!("{:.4}", x)), ("y", format!("{:.4}", y))]
            }
            Self::DeltaMove { dx, dy } => {
                vec![("dx", format!("{:.4}", dx)), ("dy", format!("{:.4}", dy))]
            }
        };
        format_event(self.as_str(), &fields)
    }
}

/// Receiver for gesture output. Every method is optional.
///
/// Events arrive synchronously in the frame that produced them, with no
/// batching. `on_snapshot` is the throttled channel.
pub trait GestureHandler {
    fn on_select(&mut self) {}
    fn on_index_move(&mut self, _x: f32, _y: f32) {}
    fn on_delta_move(&mut self, _dx: f32, _dy: f32) {}
    /// Reserved for a generic zoom gesture; no current predicate fires it.
    fn on_zoom(&mut self, _delta: f32) {}
    fn on_five_finger_zoom(&mut self, _delta: f32) {}
    fn on_scroll_move(&mut self, _y: f32) {}
    fn on_snapshot(&mut self, _snapshot: &GestureSnapshot) {}
}

/// Deliver events to a handler in order.
pub fn dispatch<H: GestureHandler + ?Sized>(events: &[GestureEvent], handler: &mut H) {
    for event in events {
        match *event {
            GestureEvent::Select => handler.on_select(),
            GestureEvent::FiveFingerZoom { delta } => handler.on_five_finger_zoom(delta),
            GestureEvent::ScrollMove { y } => handler.on_scroll_move(y),
            GestureEvent::IndexMove { x, y } => handler.on_index_move(x, y),
            GestureEvent::DeltaMove { dx, dy } => handler.on_delta_move(dx, dy),
        }
    }
}

/// Handler that records everything it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingHandler {
    pub events: Vec<GestureEvent>,
    pub snapshots: Vec<GestureSnapshot>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.as_str() == name).count()
    }
}

impl GestureHandler for RecordingHandler {
    fn on_select(&mut self) {
        self.events.push(GestureEvent::Select);
    }

    fn on_index_move(&mut self, x: f32, y: f32) {
        self.events.push(GestureEvent::IndexMove { x, y });
    }

    fn on_delta_move(&mut self, dx: f32, dy: f32) {
        self.events.push(GestureEvent::DeltaMove { dx, dy });
    }

    fn on_five_finger_zoom(&mut self, delta: f32) {
        self.events.push(GestureEvent::FiveFingerZoom { delta });
    }

    fn on_scroll_move(&mut self, y: f32) {
        self.events.push(GestureEvent::ScrollMove { y });
    }

    fn on_snapshot(&mut self, snapshot: &GestureSnapshot) {
        self.snapshots.push(snapshot.clone());
    }
}
