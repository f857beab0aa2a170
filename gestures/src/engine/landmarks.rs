//! Hand landmark definitions and validated per-frame samples.
//!
//! Models the 21 landmarks a single-hand pose model reports per frame,
//! in normalized camera coordinates (x/y in 0-1, z relative depth).

use std::fmt;

// ── Landmark definitions ───────────────────────────────────

/// The 21 hand landmarks, in model output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// Total number of landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

impl HandLandmark {
    /// Convert landmark enum to array index (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// String representation for status output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wrist => "wrist",
            Self::ThumbCmc => "thumb-cmc",
            Self::ThumbMcp => "thumb-mcp",
            Self::ThumbIp => "thumb-ip",
            Self::ThumbTip => "thumb-tip",
            Self::IndexMcp => "index-mcp",
            Self::IndexPip => "index-pip",
            Self::IndexDip => "index-dip",
            Self::IndexTip => "index-tip",
            Self::MiddleMcp => "middle-mcp",
            Self::MiddlePip => "middle-pip",
            Self::MiddleDip => "middle-dip",
            Self::MiddleTip => "middle-tip",
            Self::RingMcp => "ring-mcp",
            Self::RingPip => "ring-pip",
            Self::RingDip => "ring-dip",
            Self::RingTip => "ring-tip",
            Self::PinkyMcp => "pinky-mcp",
            Self::PinkyPip => "pinky-pip",
            Self::PinkyDip => "pinky-dip",
            Self::PinkyTip => "pinky-tip",
        }
    }

    /// Fingertips, thumb first.
    pub fn fingertips() -> [HandLandmark; 5] {
        [
            Self::ThumbTip,
            Self::IndexTip,
            Self::MiddleTip,
            Self::RingTip,
            Self::PinkyTip,
        ]
    }

    /// (tip, base knuckle) pairs used by the finger-extension test.
    pub fn finger_chains() -> [(HandLandmark, HandLandmark); 5] {
        [
            (Self::ThumbTip, Self::ThumbMcp),
            (Self::IndexTip, Self::IndexMcp),
            (Self::MiddleTip, Self::MiddleMcp),
            (Self::RingTip, Self::RingMcp),
            (Self::PinkyTip, Self::PinkyMcp),
        ]
    }
}

// ── Landmark point ─────────────────────────────────────────

/// A single landmark position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// ── Sample validation ──────────────────────────────────────

/// Why a raw landmark list was refused as a hand sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleError {
    /// The list did not hold exactly 21 points.
    WrongCount(usize),
    /// A coordinate at this landmark index was NaN or infinite.
    NonFinite(usize),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongCount(n) => {
                write!(f, "expected {} landmarks, got {}", LANDMARK_COUNT, n)
            }
            Self::NonFinite(i) => write!(f, "non-finite coordinate at landmark {}", i),
        }
    }
}

impl std::error::Error for SampleError {}

// ── Hand sample ────────────────────────────────────────────

/// One frame's worth of hand landmarks, guaranteed complete and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct HandSample {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandSample {
    /// Validate a raw landmark list from the pose model.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, SampleError> {
        if landmarks.len() != LANDMARK_COUNT {
            return Err(SampleError::WrongCount(landmarks.len()));
        }
        if let Some(i) = landmarks.iter().position(|p| !p.is_finite()) {
            return Err(SampleError::NonFinite(i));
        }
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points.copy_from_slice(landmarks);
        Ok(Self { points })
    }

    /// Position of a landmark.
    pub fn get(&self, landmark: HandLandmark) -> Landmark {
        self.points[landmark.index()]
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}

// ── Tests ──────────────────────────────────────────────────
