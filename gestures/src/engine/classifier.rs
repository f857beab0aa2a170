//! Per-mode gesture predicates and their debounce state.
//!
//! Each predicate is a pure geometric test over one sample. Pinch and
//! five-finger are debounced by a [`StabilityCounter`]; scroll switches
//! immediately because its compound predicate rarely fires by accident.

use tracing::debug;

use super::config::GestureConfig;
use super::geometry::{hand_spread, is_finger_extended, landmark_distance_2d};
use super::landmarks::{HandLandmark, HandSample};

// ── Stability counter ──────────────────────────────────────

/// Consecutive-success counter for a gesture predicate.
///
/// Drops to zero the moment the predicate fails.
#[derive(Debug, Clone, Default)]
pub struct StabilityCounter {
    count: u32,
}

impl StabilityCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame's predicate result and return the new count.
    pub fn record(&mut self, holds: bool) -> u32 {
        self.count = if holds {
            self.count.saturating_add(1)
        } else {
            0
        };
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the predicate has held for at least `frames` frames.
    pub fn is_stable(&self, frames: u32) -> bool {
        self.count >= frames
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

// ── Predicates ─────────────────────────────────────────────

/// Thumb touches index while staying clear of the other three tips.
///
/// The loose exclusion keeps a closed fist from reading as a pinch.
pub fn pinch_predicate(sample: &HandSample, config: &GestureConfig) -> bool {
    let d = |other: HandLandmark| landmark_distance_2d(sample, HandLandmark::ThumbTip, other);
    d(HandLandmark::IndexTip) < config.pinch_threshold
        && d(HandLandmark::MiddleTip) > config.pinch_exclusion
        && d(HandLandmark::RingTip) > config.pinch_exclusion
        && d(HandLandmark::PinkyTip) > config.pinch_exclusion
}

/// All five fingers extended.
pub fn five_finger_predicate(sample: &HandSample, config: &GestureConfig) -> bool {
    HandLandmark::finger_chains()
        .iter()
        .all(|(tip, mcp)| is_finger_extended(sample, *tip, *mcp, config.extension_ratio))
}

/// Thumb, middle, ring and pinky folded together with the index pointing out.
pub fn scroll_predicate(sample: &HandSample, config: &GestureConfig) -> bool {
    use HandLandmark::{IndexMcp, IndexTip, MiddleTip, PinkyTip, RingTip, ThumbTip};

    let clump_pairs = [
        (ThumbTip, MiddleTip),
        (ThumbTip, RingTip),
        (ThumbTip, PinkyTip),
        (MiddleTip, RingTip),
        (RingTip, PinkyTip),
    ];
    let clumped = clump_pairs
        .iter()
        .all(|(a, b)| landmark_distance_2d(sample, *a, *b) < config.clump_threshold);

    clumped
        && landmark_distance_2d(sample, ThumbTip, IndexTip) > config.index_extension_threshold
        && is_finger_extended(sample, IndexTip, IndexMcp, config.extension_ratio)
}

// ── Pinch / tap ────────────────────────────────────────────

/// Result of one pinch classification step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchOutcome {
    /// 2D thumb-to-index distance.
    pub distance: f32,
    /// Pinch is held and debounced.
    pub active: bool,
    /// A quick pinch was just released: fire select.
    pub selected: bool,
}

/// Debounced pinch with tap-on-release detection.
#[derive(Debug, Clone, Default)]
pub struct PinchClassifier {
    counter: StabilityCounter,
    active: bool,
    pinch_start_ms: Option<f64>,
    last_select_ms: Option<f64>,
}

impl PinchClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(
        &mut self,
        sample: &HandSample,
        config: &GestureConfig,
        now_ms: f64,
    ) -> PinchOutcome {
        let distance =
            landmark_distance_2d(sample, HandLandmark::ThumbTip, HandLandmark::IndexTip);
        let mut selected = false;

        if pinch_predicate(sample, config) {
            self.counter.record(true);
            if !self.active && self.counter.is_stable(config.pinch_stability_frames) {
                self.active = true;
                self.pinch_start_ms = Some(now_ms);
                debug!("Pinch started at {:.0}ms", now_ms);
            }
        } else {
            if self.active {
                selected = self.release(config, now_ms);
            }
            self.counter.reset();
            self.active = false;
        }

        PinchOutcome {
            distance,
            active: self.active,
            selected,
        }
    }

    /// Decide whether the pinch that just ended was a tap.
    fn release(&mut self, config: &GestureConfig, now_ms: f64) -> bool {
        let duration = self.pinch_start_ms.map_or(0.0, |start| now_ms - start);
        let since_select = self
            .last_select_ms
            .map_or(f64::INFINITY, |last| now_ms - last);
        self.pinch_start_ms = None;

        let quick = duration >= config.min_hold_ms && duration <= config.max_hold_ms;
        if quick && since_select >= config.select_cooldown_ms {
            self.last_select_ms = Some(now_ms);
            debug!("Select: pinch held {:.0}ms", duration);
            true
        } else {
            debug!(
                "Pinch released without select: held {:.0}ms, {:.0}ms since last select",
                duration, since_select
            );
            false
        }
    }

    /// Drop any pinch in progress without firing select.
    ///
    /// The select cooldown is kept.
    pub fn hand_lost(&mut self) {
        self.counter.reset();
        self.active = false;
        self.pinch_start_ms = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stability(&self) -> u32 {
        self.counter.count()
    }

    pub fn last_select_ms(&self) -> Option<f64> {
        self.last_select_ms
    }
}

// ── Five-finger rotate/zoom ────────────────────────────────

/// Result of one five-finger classification step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveFingerOutcome {
    pub active: bool,
    /// Current hand spread.
    pub spread: f32,
    /// Scaled spread change since the previous active frame.
    pub spread_delta: f32,
    /// Zoom amount to emit this frame, if above threshold.
    pub zoom: Option<f32>,
}

/// Debounced open-hand mode; spread changes drive zoom.
#[derive(Debug, Clone, Default)]
pub struct FiveFingerClassifier {
    counter: StabilityCounter,
    active: bool,
    last_spread: Option<f32>,
}

impl FiveFingerClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// `pinch_active` gates the mode off entirely.
    pub fn update(
        &mut self,
        sample: &HandSample,
        config: &GestureConfig,
        pinch_active: bool,
    ) -> FiveFingerOutcome {
        let spread = hand_spread(sample);
        let holds = !pinch_active && five_finger_predicate(sample, config);

        if !holds {
            if self.active {
                debug!("Five-finger mode ended");
            }
            self.hand_lost();
            return FiveFingerOutcome {
                active: false,
                spread,
                spread_delta: 0.0,
                zoom: None,
            };
        }

        self.counter.record(true);
        if !self.counter.is_stable(config.five_finger_stability_frames) {
            return FiveFingerOutcome {
                active: false,
                spread,
                spread_delta: 0.0,
                zoom: None,
            };
        }

        let was_active = self.active;
        if !was_active {
            debug!("Five-finger mode started, spread {:.3}", spread);
        }
        self.active = true;

        let spread_delta = match self.last_spread {
            Some(last) if was_active => (spread - last) * config.spread_sensitivity,
            _ => 0.0,
        };
        self.last_spread = Some(spread);

        FiveFingerOutcome {
            active: true,
            spread,
            spread_delta,
            zoom: (spread_delta.abs() > config.zoom_threshold).then_some(spread_delta),
        }
    }

    /// Clear the counter, active flag and cached spread.
    pub fn hand_lost(&mut self) {
        self.counter.reset();
        self.active = false;
        self.last_spread = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stability(&self) -> u32 {
        self.counter.count()
    }

    pub fn last_spread(&self) -> Option<f32> {
        self.last_spread
    }
}

// ── Tests ──────────────────────────────────────────────────
