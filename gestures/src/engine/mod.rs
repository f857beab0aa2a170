//! Gesture classification engine.
//!
//! Turns a per-frame stream of hand samples into one debounced
//! interaction mode plus smoothed pointer signals:
//! - `landmarks`: validated 21-point hand samples
//! - `geometry`: distances, finger extension, spread
//! - `smoothing`: pointer EMA and dead-zoned deltas
//! - `classifier`: pinch/tap, five-finger and scroll predicates
//! - `arbiter`: priority resolution into one `ActiveMode`
//! - `snapshot`, `events`: output state and callbacks

pub mod arbiter;
pub mod classifier;
pub mod config;
pub mod events;
pub mod geometry;
pub mod landmarks;
pub mod smoothing;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod poses;

pub use arbiter::ActiveMode;
pub use config::GestureConfig;
pub use events::{dispatch, GestureEvent, GestureHandler, RecordingHandler};
pub use landmarks::{HandLandmark, HandSample, Landmark, SampleError, LANDMARK_COUNT};
pub use snapshot::GestureSnapshot;

use tracing::debug;

use arbiter::ModeArbiter;
use smoothing::{DeltaTracker, PointerSmoother};
use snapshot::SnapshotThrottle;

/// Output of one engine update.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Immediate events, in firing order.
    pub events: Vec<GestureEvent>,
    /// The frame's gesture state.
    pub snapshot: GestureSnapshot,
    /// Whether the throttle let this snapshot through to slow consumers.
    pub published: bool,
}

/// Per-session classification state.
///
/// Create one when tracking is enabled and drop it when disabled.
pub struct GestureEngine {
    config: GestureConfig,
    arbiter: ModeArbiter,
    smoother: PointerSmoother,
    delta: DeltaTracker,
    throttle: SnapshotThrottle,
    last_snapshot: GestureSnapshot,
    frames: u64,
    rejected: u64,
}

impl GestureEngine {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            arbiter: ModeArbiter::new(),
            smoother: PointerSmoother::new(config.smoothing_factor),
            delta: DeltaTracker::new(config.delta_dead_zone),
            throttle: SnapshotThrottle::new(&config),
            last_snapshot: GestureSnapshot::default(),
            frames: 0,
            rejected: 0,
            config,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify raw landmarks from the pose model.
    ///
    /// An empty slice means no hand. Malformed input is treated the same
    /// way so one bad frame cannot break the control loop.
    pub fn update_raw(&mut self, landmarks: &[Landmark], now_ms: f64) -> FrameOutput {
        if landmarks.is_empty() {
            return self.update(None, now_ms);
        }
        match HandSample::from_landmarks(landmarks) {
            Ok(sample) => self.update(Some(&sample), now_ms),
            Err(e) => {
                self.rejected += 1;
                debug!("Rejected hand sample: {}", e);
                self.update(None, now_ms)
            }
        }
    }

    /// Process one frame. `None` means no hand was detected.
    pub fn update(&mut self, sample: Option<&HandSample>, now_ms: f64) -> FrameOutput {
        self.frames += 1;
        let (events, snapshot) = match sample {
            Some(sample) => self.classify(sample, now_ms),
            None => (Vec::new(), self.hand_lost()),
        };
        let published = self.throttle.offer(&snapshot, now_ms);
        self.last_snapshot = snapshot.clone();
        FrameOutput {
            events,
            snapshot,
            published,
        }
    }

    fn classify(&mut self, sample: &HandSample, now_ms: f64) -> (Vec<GestureEvent>, GestureSnapshot) {
        let cfg = &self.config;
        let a = self.arbiter.evaluate(sample, cfg, now_ms);

        let tip = sample.get(HandLandmark::IndexTip);
        let index_position = self.smoother.update((tip.x, tip.y));
        let (delta_x, delta_y) = self.delta.update((tip.x, tip.y));
        let palm = sample.get(HandLandmark::MiddleMcp);

        let mut events = Vec::new();
        if a.pinch.selected {
            events.push(GestureEvent::Select);
        }
        if let Some(delta) = a.five_finger.zoom {
            events.push(GestureEvent::FiveFingerZoom { delta });
        }
        if let Some(y) = a.scroll_y {
            events.push(GestureEvent::ScrollMove { y });
        }
        if !a.mode.suppresses_pointer() {
            events.push(GestureEvent::IndexMove {
                x: index_position.0,
                y: index_position.1,
            });
            events.push(GestureEvent::DeltaMove {
                dx: delta_x,
                dy: delta_y,
            });
        }

        let is_five_finger = a.five_finger.active;
        let snapshot = GestureSnapshot {
            hand_detected: true,
            mode: a.mode,
            pinch_distance: a.pinch.distance,
            palm_position: (palm.x, palm.y),
            index_position,
            is_tap: a.pinch.selected,
            is_pinching: a.pinch.active,
            is_five_finger,
            is_scrolling: a.scroll_y.is_some(),
            is_zooming: is_five_finger && a.five_finger.spread_delta.abs() > cfg.zoom_threshold,
            spread: a.five_finger.spread,
            spread_delta: a.five_finger.spread_delta,
            rotation_multiplier: if is_five_finger {
                cfg.five_finger_rotation_multiplier
            } else {
                1.0
            },
            scroll_y: a.scroll_y,
            delta_x,
            delta_y,
        };
        (events, snapshot)
    }

    /// Reset per-hand state for a frame without a hand.
    fn hand_lost(&mut self) -> GestureSnapshot {
        if self.last_snapshot.hand_detected {
            debug!("Hand lost");
        }
        self.delta.hand_lost();
        self.arbiter.hand_lost();
        GestureSnapshot {
            index_position: self.smoother.estimate().unwrap_or((0.0, 0.0)),
            ..GestureSnapshot::default()
        }
    }

    /// Most recent snapshot, published or not.
    pub fn snapshot(&self) -> &GestureSnapshot {
        &self.last_snapshot
    }

    /// Most recent snapshot that passed the throttle.
    pub fn published(&self) -> Option<&GestureSnapshot> {
        self.throttle.last_published()
    }

    pub fn mode(&self) -> ActiveMode {
        self.arbiter.mode()
    }

    /// Generate s-expression for status output.
    pub fn status_sexp(&self) -> String {
        let last_select = self
            .arbiter
            .pinch()
            .last_select_ms()
            .map(|t| format!("{:.0}", t))
            .unwrap_or_else(|| "nil".to_string());
        format!(
            "(:mode :{} :hand {} :frames {} :rejected {} :pinch-stability {} :five-finger-stability {} :last-select-ms {})",
            self.mode().as_str(),
            crate::sexp::bool_sexp(self.delta.is_visible()),
            self.frames,
            self.rejected,
            self.arbiter.pinch().stability(),
            self.arbiter.five_finger().stability(),
            last_select,
        )
    }
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

// ── Tests ──────────────────────────────────────────────────
