//! Resolves the mode classifiers into one active interaction mode per frame.
//!
//! Priority is pinch, then five-finger, then scroll. Each lower mode is
//! only evaluated while every higher one is inactive.

use tracing::debug;

use super::classifier::{
    scroll_predicate, FiveFingerClassifier, FiveFingerOutcome, PinchClassifier, PinchOutcome,
};
use super::config::GestureConfig;
use super::landmarks::{HandLandmark, HandSample};

/// The single primary mode for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveMode {
    /// No gesture: plain pointer tracking.
    #[default]
    Pointer,
    Pinch,
    FiveFinger,
    Scroll,
}

impl ActiveMode {
    /// String representation for status output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pointer => "pointer",
            Self::Pinch => "pinch",
            Self::FiveFinger => "five-finger",
            Self::Scroll => "scroll",
        }
    }

    /// Scroll claims the index finger, so pointer and delta moves are withheld.
    pub fn suppresses_pointer(&self) -> bool {
        matches!(self, Self::Scroll)
    }
}

/// Pick the primary mode from the individual classifier results.
pub fn arbitrate(pinch_active: bool, five_finger_active: bool, scroll_pose: bool) -> ActiveMode {
    if pinch_active {
        ActiveMode::Pinch
    } else if five_finger_active {
        ActiveMode::FiveFinger
    } else if scroll_pose {
        ActiveMode::Scroll
    } else {
        ActiveMode::Pointer
    }
}

/// Everything the arbiter decided for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arbitration {
    pub mode: ActiveMode,
    pub pinch: PinchOutcome,
    pub five_finger: FiveFingerOutcome,
    /// Raw index tip Y while scrolling.
    pub scroll_y: Option<f32>,
}

/// Owns the stateful classifiers and runs them in priority order.
#[derive(Debug, Clone, Default)]
pub struct ModeArbiter {
    pinch: PinchClassifier,
    five_finger: FiveFingerClassifier,
    mode: ActiveMode,
}

impl ModeArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(
        &mut self,
        sample: &HandSample,
        config: &GestureConfig,
        now_ms: f64,
    ) -> Arbitration {
        let pinch = self.pinch.update(sample, config, now_ms);
        let five_finger = self.five_finger.update(sample, config, pinch.active);
        let scroll_pose =
            !pinch.active && !five_finger.active && scroll_predicate(sample, config);

        let mode = arbitrate(pinch.active, five_finger.active, scroll_pose);
        if mode != self.mode {
            debug!("Mode {} -> {}", self.mode.as_str(), mode.as_str());
            self.mode = mode;
        }

        Arbitration {
            mode,
            pinch,
            five_finger,
            scroll_y: scroll_pose.then(|| sample.get(HandLandmark::IndexTip).y),
        }
    }

    /// Reset the debounced classifiers after a frame without a hand.
    pub fn hand_lost(&mut self) {
        self.pinch.hand_lost();
        self.five_finger.hand_lost();
        if self.mode != ActiveMode::Pointer {
            debug!("Mode {} -> pointer (hand lost)", self.mode.as_str());
        }
        self.mode = ActiveMode::Pointer;
    }

    pub fn mode(&self) -> ActiveMode {
        self.mode
    }

    pub fn pinch(&self) -> &PinchClassifier {
        &self.pinch
    }

    pub fn five_finger(&self) -> &FiveFingerClassifier {
        &self.five_finger
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::poses;

    fn run(arbiter: &mut ModeArbiter, points: &[crate::engine::Landmark], t: f64) -> Arbitration {
        arbiter.evaluate(&poses::sample(points), &GestureConfig::default(), t)
    }

    #[test]
    fn test_arbitrate_priority() {
        assert_eq!(arbitrate(false, false, false), ActiveMode::Pointer);
        assert_eq!(arbitrate(true, true, true), ActiveMode::Pinch);
        assert_eq!(arbitrate(true, false, true), ActiveMode::Pinch);
        assert_eq!(arbitrate(false, true, true), ActiveMode::FiveFinger);
        assert_eq!(arbitrate(false, false, true), ActiveMode::Scroll);
    }

    #[test]
    fn test_mode_as_str() {
        assert_eq!(ActiveMode::Pointer.as_str(), "pointer");
        assert_eq!(ActiveMode::FiveFinger.as_str(), "five-finger");
        assert!(ActiveMode::Scroll.suppresses_pointer());
        assert!(!ActiveMode::Pinch.suppresses_pointer());
    }

    #[test]
    fn test_scroll_is_immediate() {
        let mut arbiter = ModeArbiter::new();
        let a = run(&mut arbiter, &poses::scroll_at(0.42), 0.0);
        assert_eq!(a.mode, ActiveMode::Scroll);
        let y = a.scroll_y.expect("scroll y");
        assert!((y - 0.42).abs() < 1e-6);

        let a = run(&mut arbiter, &poses::fist(), 33.0);
        assert_eq!(a.mode, ActiveMode::Pointer);
        assert!(a.scroll_y.is_none());
    }

    #[test]
    fn test_five_finger_needs_stability() {
        let mut arbiter = ModeArbiter::new();
        assert_eq!(run(&mut arbiter, &poses::open_hand(), 0.0).mode, ActiveMode::Pointer);
        assert_eq!(run(&mut arbiter, &poses::open_hand(), 33.0).mode, ActiveMode::Pointer);
        assert_eq!(run(&mut arbiter, &poses::open_hand(), 66.0).mode, ActiveMode::FiveFinger);
        assert_eq!(arbiter.mode(), ActiveMode::FiveFinger);
    }

    #[test]
    fn test_modes_exclusive_over_sequence() {
        let mut arbiter = ModeArbiter::new();
        let script = [
            poses::open_hand(),
            poses::open_hand(),
            poses::open_hand(),
            poses::scroll(),
            poses::pinch(),
            poses::pinch(),
            poses::pinch(),
            poses::scroll(),
            poses::open_hand(),
            poses::fist(),
        ];
        for (i, points) in script.iter().enumerate() {
            let a = run(&mut arbiter, points, i as f64 * 33.0);
            let flags = [
                a.pinch.active,
                a.five_finger.active,
                a.scroll_y.is_some(),
            ];
            assert!(
                flags.iter().filter(|f| **f).count() <= 1,
                "frame {}: more than one mode active: {:?}",
                i,
                a
            );
        }
    }

    #[test]
    fn test_pinch_preempts_five_finger_counter() {
        let mut arbiter = ModeArbiter::new();
        for i in 0..3 {
            run(&mut arbiter, &poses::pinch(), i as f64 * 33.0);
        }
        assert!(arbiter.pinch().is_active());
        // An open hand releases the pinch; five-finger starts counting from zero.
        let a = run(&mut arbiter, &poses::open_hand(), 100.0);
        assert_eq!(a.mode, ActiveMode::Pointer);
        assert_eq!(arbiter.five_finger().stability(), 1);
    }

    #[test]
    fn test_hand_lost_resets_mode() {
        let mut arbiter = ModeArbiter::new();
        for i in 0..3 {
            run(&mut arbiter, &poses::open_hand(), i as f64 * 33.0);
        }
        assert_eq!(arbiter.mode(), ActiveMode::FiveFinger);
        arbiter.hand_lost();
        assert_eq!(arbiter.mode(), ActiveMode::Pointer);
        assert_eq!(arbiter.five_finger().stability(), 0);
        assert_eq!(arbiter.pinch().stability(), 0);
    }
}
