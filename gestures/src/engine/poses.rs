//! Canned hand poses for tests.
//!
//! Wrist sits at (0.5, 0.8); fingers point up the image (decreasing y).

use super::geometry::hand_spread;
use super::landmarks::{HandLandmark, HandSample, Landmark, LANDMARK_COUNT};

fn build(points: &[(f32, f32); LANDMARK_COUNT]) -> Vec<Landmark> {
    points.iter().map(|&(x, y)| Landmark::new(x, y, 0.0)).collect()
}

/// Validate a pose into a sample.
pub fn sample(points: &[Landmark]) -> HandSample {
    HandSample::from_landmarks(points).expect("test pose must be a valid sample")
}

/// All five fingers straight and spread.
pub fn open_hand() -> Vec<Landmark> {
    build(&[
        (0.50, 0.80),
        (0.44, 0.76), (0.40, 0.72), (0.36, 0.68), (0.32, 0.64),
        (0.45, 0.65), (0.44, 0.58), (0.435, 0.53), (0.43, 0.48),
        (0.50, 0.64), (0.50, 0.57), (0.50, 0.51), (0.50, 0.45),
        (0.55, 0.65), (0.56, 0.58), (0.565, 0.53), (0.57, 0.48),
        (0.59, 0.68), (0.60, 0.63), (0.615, 0.59), (0.63, 0.55),
    ])
}

/// Open hand scaled about the wrist so its spread equals `spread`.
pub fn open_hand_with_spread(spread: f32) -> Vec<Landmark> {
    let points = open_hand();
    let k = spread / hand_spread(&sample(&points));
    let wrist = points[HandLandmark::Wrist.index()];
    points
        .iter()
        .map(|p| {
            Landmark::new(
                wrist.x + (p.x - wrist.x) * k,
                wrist.y + (p.y - wrist.y) * k,
                wrist.z + (p.z - wrist.z) * k,
            )
        })
        .collect()
}

/// Thumb and index tips touching, middle straight, ring and pinky curled.
pub fn pinch() -> Vec<Landmark> {
    build(&[
        (0.50, 0.80),
        (0.44, 0.76), (0.40, 0.72), (0.41, 0.67), (0.42, 0.62),
        (0.45, 0.65), (0.43, 0.61), (0.41, 0.60), (0.40, 0.60),
        (0.50, 0.64), (0.50, 0.57), (0.50, 0.51), (0.50, 0.45),
        (0.55, 0.65), (0.56, 0.62), (0.565, 0.66), (0.56, 0.70),
        (0.59, 0.68), (0.60, 0.66), (0.605, 0.69), (0.60, 0.72),
    ])
}

/// All fingertips folded together near the palm.
pub fn fist() -> Vec<Landmark> {
    build(&[
        (0.50, 0.80),
        (0.44, 0.76), (0.40, 0.72), (0.44, 0.69), (0.48, 0.68),
        (0.45, 0.65), (0.47, 0.60), (0.49, 0.63), (0.50, 0.67),
        (0.50, 0.64), (0.51, 0.60), (0.52, 0.64), (0.52, 0.68),
        (0.55, 0.65), (0.55, 0.61), (0.545, 0.65), (0.54, 0.69),
        (0.59, 0.68), (0.58, 0.65), (0.57, 0.68), (0.56, 0.70),
    ])
}

/// Index finger pointing up, the other four tips clumped together.
pub fn scroll() -> Vec<Landmark> {
    build(&[
        (0.50, 0.80),
        (0.44, 0.76), (0.40, 0.72), (0.46, 0.70), (0.50, 0.70),
        (0.45, 0.65), (0.445, 0.57), (0.442, 0.50), (0.44, 0.45),
        (0.50, 0.64), (0.51, 0.61), (0.52, 0.65), (0.53, 0.69),
        (0.55, 0.65), (0.555, 0.62), (0.553, 0.66), (0.55, 0.70),
        (0.59, 0.68), (0.585, 0.66), (0.575, 0.69), (0.57, 0.71),
    ])
}

/// Scroll pose with the index tip moved to height `y`.
pub fn scroll_at(y: f32) -> Vec<Landmark> {
    let mut points = scroll();
    points[HandLandmark::IndexTip.index()].y = y;
    points
}

/// Every landmark shifted by (dx, dy).
pub fn translated(points: &[Landmark], dx: f32, dy: f32) -> Vec<Landmark> {
    points
        .iter()
        .map(|p| Landmark::new(p.x + dx, p.y + dy, p.z))
        .collect()
}
