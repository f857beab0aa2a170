//! The externally visible gesture state and its throttled publication.

use tracing::trace;

use super::arbiter::ActiveMode;
use super::config::GestureConfig;
use crate::sexp::bool_sexp;

/// Gesture state for one frame. Replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureSnapshot {
    pub hand_detected: bool,
    pub mode: ActiveMode,
    /// 2D thumb-to-index distance.
    pub pinch_distance: f32,
    /// Middle-finger knuckle position, a stable palm centre.
    pub palm_position: (f32, f32),
    /// Smoothed index fingertip position.
    pub index_position: (f32, f32),
    /// A select fired this frame.
    pub is_tap: bool,
    pub is_pinching: bool,
    pub is_five_finger: bool,
    pub is_scrolling: bool,
    /// Five-finger mode with a spread change above the zoom threshold.
    pub is_zooming: bool,
    pub spread: f32,
    pub spread_delta: f32,
    pub rotation_multiplier: f32,
    /// Raw index tip Y while scrolling.
    pub scroll_y: Option<f32>,
    pub delta_x: f32,
    pub delta_y: f32,
}

impl Default for GestureSnapshot {
    fn default() -> Self {
        Self {
            hand_detected: false,
            mode: ActiveMode::Pointer,
            pinch_distance: 0.0,
            palm_position: (0.0, 0.0),
            index_position: (0.0, 0.0),
            is_tap: false,
            is_pinching: false,
            is_five_finger: false,
            is_scrolling: false,
            is_zooming: false,
            spread: 0.0,
            spread_delta: 0.0,
            rotation_multiplier: 1.0,
            scroll_y: None,
            delta_x: 0.0,
            delta_y: 0.0,
        }
    }
}

fn close(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

fn close_pair(a: (f32, f32), b: (f32, f32), tol: f32) -> bool {
    close(a.0, b.0, tol) && close(a.1, b.1, tol)
}

impl GestureSnapshot {
    /// Approximate equality: flags must match exactly, continuous values
    /// within tolerance.
    pub fn approx_eq(&self, other: &Self, position_tol: f32, scroll_tol: f32) -> bool {
        let flags_match = self.hand_detected == other.hand_detected
            && self.mode == other.mode
            && self.is_tap == other.is_tap
            && self.is_pinching == other.is_pinching
            && self.is_five_finger == other.is_five_finger
            && self.is_scrolling == other.is_scrolling
            && self.is_zooming == other.is_zooming;
        if !flags_match {
            return false;
        }

        let scroll_match = match (self.scroll_y, other.scroll_y) {
            (Some(a), Some(b)) => close(a, b, scroll_tol),
            (None, None) => true,
            _ => false,
        };

        scroll_match
            && close(self.pinch_distance, other.pinch_distance, position_tol)
            && close_pair(self.palm_position, other.palm_position, position_tol)
            && close_pair(self.index_position, other.index_position, position_tol)
            && close(self.spread, other.spread, position_tol)
            && close(self.spread_delta, other.spread_delta, position_tol)
            && close(self.rotation_multiplier, other.rotation_multiplier, position_tol)
            && close(self.delta_x, other.delta_x, position_tol)
            && close(self.delta_y, other.delta_y, position_tol)
    }

    /// Generate s-expression for status output.
    pub fn to_sexp(&self) -> String {
        let scroll_y = self
            .scroll_y
            .map(|y| format!("{:.4}", y))
            .unwrap_or_else(|| "nil".to_string());
        format!(
            "(:hand {} :mode :{} :pinch-distance {:.4} :palm ({:.4} {:.4}) :index ({:.4} {:.4}) :tap {} :pinching {} :five-finger {} :scrolling {} :zooming {} :spread {:.4} :spread-delta {:.4} :rotation-multiplier {:.1} :scroll-y {} :delta ({:.4} {:.4}))",
            bool_sexp(self.hand_detected),
            self.mode.as_str(),
            self.pinch_distance,
            self.palm_position.0,
            self.palm_position.1,
            self.index_position.0,
            self.index_position.1,
            bool_sexp(self.is_tap),
            bool_sexp(self.is_pinching),
            bool_sexp(self.is_five_finger),
            bool_sexp(self.is_scrolling),
            bool_sexp(self.is_zooming),
            self.spread,
            self.spread_delta,
            self.rotation_multiplier,
            scroll_y,
            self.delta_x,
            self.delta_y,
        )
    }
}

/// Rate-limits snapshot publication to slower consumers.
///
/// Publishes at most once per interval while the state is steady, but
/// immediately whenever it changes beyond tolerance.
#[derive(Debug, Clone)]
pub struct SnapshotThrottle {
    interval_ms: f64,
    position_tol: f32,
    scroll_tol: f32,
    last: Option<(GestureSnapshot, f64)>,
}

impl SnapshotThrottle {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            interval_ms: config.publish_interval_ms,
            position_tol: config.position_tolerance,
            scroll_tol: config.scroll_tolerance,
            last: None,
        }
    }

    /// Whether `snapshot` should be published at `now_ms`. Records it as
    /// the last published snapshot if so.
    pub fn offer(&mut self, snapshot: &GestureSnapshot, now_ms: f64) -> bool {
        let publish = match &self.last {
            None => true,
            Some((prev, at)) => {
                now_ms - at >= self.interval_ms
                    || !snapshot.approx_eq(prev, self.position_tol, self.scroll_tol)
            }
        };
        if publish {
            trace!("Publishing snapshot at {:.0}ms", now_ms);
            self.last = Some((snapshot.clone(), now_ms));
        }
        publish
    }

    /// Last published snapshot.
    pub fn last_published(&self) -> Option<&GestureSnapshot> {
        self.last.as_ref().map(|(s, _)| s)
    }
}
