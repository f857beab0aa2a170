//! Tunable thresholds for gesture classification.

use lexpr::Value;

use crate::sexp;

/// Configuration for gesture recognition thresholds.
///
/// Distances are in normalized image units, times in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Maximum thumb-to-index distance for a pinch.
    pub pinch_threshold: f32,
    /// Minimum thumb-to-other-fingertip distance during a pinch.
    pub pinch_exclusion: f32,
    /// Consecutive frames before a pinch becomes active.
    pub pinch_stability_frames: u32,
    /// Shortest pinch that counts as a tap.
    pub min_hold_ms: f64,
    /// Longest pinch that counts as a tap.
    pub max_hold_ms: f64,
    /// Minimum time between two select events.
    pub select_cooldown_ms: f64,
    /// Consecutive frames before five-finger mode becomes active.
    pub five_finger_stability_frames: u32,
    /// Multiplier from spread change to zoom delta.
    pub spread_sensitivity: f32,
    /// Rotation speed multiplier while five-finger mode is held.
    pub five_finger_rotation_multiplier: f32,
    /// Minimum |spread delta| that fires a zoom.
    pub zoom_threshold: f32,
    /// Maximum pairwise distance for the folded fingers in scroll mode.
    pub clump_threshold: f32,
    /// Minimum thumb-to-index distance in scroll mode.
    pub index_extension_threshold: f32,
    /// Tip must be this many times further from the wrist than its knuckle.
    pub extension_ratio: f32,
    /// Exponential smoothing factor for the pointer (0-1).
    pub smoothing_factor: f32,
    /// Per-axis deltas below this are zeroed.
    pub delta_dead_zone: f32,
    /// Snapshot republish interval during steady tracking.
    pub publish_interval_ms: f64,
    /// Equality tolerance for positions, deltas and spread values.
    pub position_tolerance: f32,
    /// Equality tolerance for scroll Y.
    pub scroll_tolerance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.06,
            pinch_exclusion: 0.10,
            pinch_stability_frames: 3,
            min_hold_ms: 150.0,
            max_hold_ms: 600.0,
            select_cooldown_ms: 500.0,
            five_finger_stability_frames: 3,
            spread_sensitivity: 15.0,
            five_finger_rotation_multiplier: 2.0,
            zoom_threshold: 0.01,
            clump_threshold: 0.12,
            index_extension_threshold: 0.15,
            extension_ratio: 1.05,
            smoothing_factor: 0.3,
            delta_dead_zone: 0.002,
            publish_interval_ms: 100.0,
            position_tolerance: 0.01,
            scroll_tolerance: 0.02,
        }
    }
}

impl GestureConfig {
    /// Apply overrides from a keyword plist such as
    /// `(:pinch-threshold 0.05 :select-cooldown-ms 400)`.
    ///
    /// All keys are checked before any is applied, so a rejected plist
    /// leaves the config untouched.
    pub fn apply_sexp(&mut self, value: &Value) -> Result<(), String> {
        let pairs = sexp::plist_pairs(value)
            .ok_or_else(|| "config must be a keyword plist".to_string())?;

        let mut updated = self.clone();
        for (key, raw) in pairs {
            let n = sexp::as_number(raw)
                .ok_or_else(|| format!("invalid :{} (expected a number)", key))?;
            updated.set(key, n)?;
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn set(&mut self, key: &str, n: f64) -> Result<(), String> {
        let frames = |n: f64| -> Result<u32, String> {
            if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
                Ok(n as u32)
            } else {
                Err(format!("invalid :{} (positive integer)", key))
            }
        };
        match key {
            "pinch-threshold" => self.pinch_threshold = n as f32,
            "pinch-exclusion" => self.pinch_exclusion = n as f32,
            "pinch-stability-frames" => self.pinch_stability_frames = frames(n)?,
            "min-hold-ms" => self.min_hold_ms = n,
            "max-hold-ms" => self.max_hold_ms = n,
            "select-cooldown-ms" => self.select_cooldown_ms = n,
            "five-finger-stability-frames" => self.five_finger_stability_frames = frames(n)?,
            "spread-sensitivity" => self.spread_sensitivity = n as f32,
            "rotation-multiplier" => self.five_finger_rotation_multiplier = n as f32,
            "zoom-threshold" => self.zoom_threshold = n as f32,
            "clump-threshold" => self.clump_threshold = n as f32,
            "index-extension-threshold" => self.index_extension_threshold = n as f32,
            "extension-ratio" => self.extension_ratio = n as f32,
            "smoothing-factor" => self.smoothing_factor = n as f32,
            "delta-dead-zone" => self.delta_dead_zone = n as f32,
            "publish-interval-ms" => self.publish_interval_ms = n,
            "position-tolerance" => self.position_tolerance = n as f32,
            "scroll-tolerance" => self.scroll_tolerance = n as f32,
            other => return Err(format!("unknown config key :{}", other)),
        }
        Ok(())
    }

    /// Check cross-field and range constraints.
    pub fn validate(&self) -> Result<(), String> {
        let distances = [
            ("pinch-threshold", self.pinch_threshold),
            ("pinch-exclusion", self.pinch_exclusion),
            ("zoom-threshold", self.zoom_threshold),
            ("clump-threshold", self.clump_threshold),
            ("index-extension-threshold", self.index_extension_threshold),
            ("delta-dead-zone", self.delta_dead_zone),
            ("position-tolerance", self.position_tolerance),
            ("scroll-tolerance", self.scroll_tolerance),
        ];
        for (name, v) in distances {
            if !(v >= 0.0 && v.is_finite()) {
                return Err(format!("invalid :{} (must be >= 0)", name));
            }
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err("invalid :smoothing-factor (0-1]".to_string());
        }
        if !(self.extension_ratio > 0.0 && self.extension_ratio.is_finite()) {
            return Err("invalid :extension-ratio (must be > 0)".to_string());
        }
        if !(self.min_hold_ms >= 0.0 && self.min_hold_ms <= self.max_hold_ms) {
            return Err("invalid hold window (0 <= min-hold-ms <= max-hold-ms)".to_string());
        }
        if !(self.select_cooldown_ms >= 0.0 && self.publish_interval_ms >= 0.0) {
            return Err("invalid timing (cooldown and publish interval must be >= 0)".to_string());
        }
        Ok(())
    }

    /// Generate s-expression for status output.
    pub fn config_sexp(&self) -> String {
        format!(
            "(:pinch-threshold {:.3} :pinch-exclusion {:.3} :pinch-stability-frames {} :min-hold-ms {:.0} :max-hold-ms {:.0} :select-cooldown-ms {:.0} :five-finger-stability-frames {} :spread-sensitivity {:.1} :rotation-multiplier {:.1} :zoom-threshold {:.3} :clump-threshold {:.3} :index-extension-threshold {:.3} :extension-ratio {:.2} :smoothing-factor {:.2} :delta-dead-zone {:.3} :publish-interval-ms {:.0} :position-tolerance {:.3} :scroll-tolerance {:.3})",
            self.pinch_threshold,
            self.pinch_exclusion,
            self.pinch_stability_frames,
            self.min_hold_ms,
            self.max_hold_ms,
            self.select_cooldown_ms,
            self.five_finger_stability_frames,
            self.spread_sensitivity,
            self.five_finger_rotation_multiplier,
            self.zoom_threshold,
            self.clump_threshold,
            self.index_extension_threshold,
            self.extension_ratio,
            self.smoothing_factor,
            self.delta_dead_zone,
            self.publish_interval_ms,
            self.position_tolerance,
            self.scroll_tolerance,
        )
    }
}
