//! Pointer smoothing and frame-to-frame delta tracking for the index fingertip.

/// Exponential moving average over a 2D point.
#[derive(Debug, Clone)]
pub struct PointerSmoother {
    factor: f32,
    estimate: Option<(f32, f32)>,
}

impl PointerSmoother {
    pub fn new(factor: f32) -> Self {
        Self {
            factor,
            estimate: None,
        }
    }

    /// Fold in a raw observation and return the new estimate.
    ///
    /// The first observation seeds the estimate directly.
    pub fn update(&mut self, raw: (f32, f32)) -> (f32, f32) {
        let next = match self.estimate {
            Some((ex, ey)) => (
                ex + (raw.0 - ex) * self.factor,
                ey + (raw.1 - ey) * self.factor,
            ),
            None => raw,
        };
        self.estimate = Some(next);
        next
    }

    /// Current estimate, if anything has been observed.
    pub fn estimate(&self) -> Option<(f32, f32)> {
        self.estimate
    }
}

/// Dead-zoned frame-to-frame movement of a tracked point.
#[derive(Debug, Clone)]
pub struct DeltaTracker {
    dead_zone: f32,
    last: Option<(f32, f32)>,
    visible: bool,
}

impl DeltaTracker {
    pub fn new(dead_zone: f32) -> Self {
        Self {
            dead_zone,
            last: None,
            visible: false,
        }
    }

    /// Record the point for a frame with a hand and return (dx, dy).
    ///
    /// Returns zero when there is no previous visible frame to diff against.
    pub fn update(&mut self, current: (f32, f32)) -> (f32, f32) {
        let delta = match self.last {
            Some((lx, ly)) if self.visible => (
                self.apply_dead_zone(current.0 - lx),
                self.apply_dead_zone(current.1 - ly),
            ),
            _ => (0.0, 0.0),
        };
        self.last = Some(current);
        self.visible = true;
        delta
    }

    /// Forget the last point so the next visible frame starts fresh.
    pub fn hand_lost(&mut self) {
        self.last = None;
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn last(&self) -> Option<(f32, f32)> {
        self.last
    }

    fn apply_dead_zone(&self, d: f32) -> f32 {
        if d.abs() < self.dead_zone {
            0.0
        } else {
            d
        }
    }
}
