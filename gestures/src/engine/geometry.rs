//! Distance and finger-shape measurements over a hand sample.

use super::landmarks::{HandLandmark, HandSample, Landmark};

/// Euclidean distance between two landmarks.
pub fn distance_3d(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Distance in the image plane, ignoring depth.
///
/// Depth from a monocular pose model is noisy, so the contact-style
/// checks (pinch, clump) measure in 2D only.
pub fn distance_2d(a: &Landmark, b: &Landmark) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// 2D distance between two landmarks of the same sample.
pub fn landmark_distance_2d(sample: &HandSample, a: HandLandmark, b: HandLandmark) -> f32 {
    distance_2d(&sample.get(a), &sample.get(b))
}

/// Whether a finger reaches further from the wrist than its knuckle by `ratio`.
///
/// `ratio` above 1.0 leaves a margin so a half-bent finger does not flicker.
pub fn is_finger_extended(
    sample: &HandSample,
    tip: HandLandmark,
    mcp: HandLandmark,
    ratio: f32,
) -> bool {
    let wrist = sample.get(HandLandmark::Wrist);
    distance_3d(&wrist, &sample.get(tip)) > ratio * distance_3d(&wrist, &sample.get(mcp))
}

/// Mean wrist-to-fingertip distance over all five fingers.
pub fn hand_spread(sample: &HandSample) -> f32 {
    let wrist = sample.get(HandLandmark::Wrist);
    let tips = HandLandmark::fingertips();
    let total: f32 = tips
        .iter()
        .map(|tip| distance_3d(&wrist, &sample.get(*tip)))
        .sum();
    total / tips.len() as f32
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::poses;

    #[test]
    fn test_distance_3d() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 12.0);
        assert!((distance_3d(&a, &b) - 13.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_2d_ignores_depth() {
        let a = Landmark::new(0.0, 0.0, 0.0);
        let b = Landmark::new(3.0, 4.0, 12.0);
        assert!((distance_2d(&a, &b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Landmark::new(0.1, 0.7, -0.2);
        let b = Landmark::new(0.4, 0.3, 0.1);
        assert_eq!(distance_3d(&a, &b), distance_3d(&b, &a));
        assert_eq!(distance_2d(&a, &b), distance_2d(&b, &a));
    }

    #[test]
    fn test_open_hand_all_extended() {
        let sample = poses::sample(&poses::open_hand());
        for (tip, mcp) in HandLandmark::finger_chains() {
            assert!(
                is_finger_extended(&sample, tip, mcp, 1.05),
                "{} should be extended",
                tip.as_str()
            );
        }
    }

    #[test]
    fn test_fist_none_extended() {
        let sample = poses::sample(&poses::fist());
        for (tip, mcp) in HandLandmark::finger_chains() {
            assert!(
                !is_finger_extended(&sample, tip, mcp, 1.05),
                "{} should be curled",
                tip.as_str()
            );
        }
    }

    #[test]
    fn test_extension_margin() {
        // Tip exactly 1.03x as far as the knuckle: extended at 1.0, not at 1.05.
        let mut points = poses::fist();
        points[HandLandmark::Wrist.index()] = Landmark::new(0.0, 0.0, 0.0);
        points[HandLandmark::IndexMcp.index()] = Landmark::new(0.0, 0.10, 0.0);
        points[HandLandmark::IndexTip.index()] = Landmark::new(0.0, 0.103, 0.0);
        let sample = poses::sample(&points);
        assert!(is_finger_extended(
            &sample,
            HandLandmark::IndexTip,
            HandLandmark::IndexMcp,
            1.0
        ));
        assert!(!is_finger_extended(
            &sample,
            HandLandmark::IndexTip,
            HandLandmark::IndexMcp,
            1.05
        ));
    }

    #[test]
    fn test_hand_spread_mean() {
        let mut points = poses::fist();
        points[HandLandmark::Wrist.index()] = Landmark::new(0.0, 0.0, 0.0);
        let lengths = [0.1, 0.2, 0.3, 0.4, 0.5];
        for (tip, len) in HandLandmark::fingertips().iter().zip(lengths) {
            points[tip.index()] = Landmark::new(len, 0.0, 0.0);
        }
        let sample = poses::sample(&points);
        assert!((hand_spread(&sample) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_hand_spread_scales() {
        let sample = poses::sample(&poses::open_hand_with_spread(0.30));
        assert!((hand_spread(&sample) - 0.30).abs() < 1e-4);
    }
}
