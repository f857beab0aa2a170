//! Frame scripts for offline replay.
//!
//! One frame per top-level form:
//!
//! ```text
//! ; comment
//! (:t 0 :hand ((0.50 0.80 0.0) (0.44 0.76 0.0) ...))
//! (:t 33 :hand nil)
//! ```
//!
//! Points may omit z, which then reads as 0. The number of points is not
//! checked here; the engine rejects malformed hands itself.

use std::fmt;

use lexpr::Value;
use tracing::warn;

use crate::engine::Landmark;
use crate::sexp;
use crate::source::Frame;

#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// The script is not readable as s-expressions.
    Syntax(String),
    /// Form `index` (zero-based) is not a valid frame.
    Form { index: usize, reason: String },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(e) => write!(f, "script syntax error: {}", e),
            Self::Form { index, reason } => write!(f, "frame {}: {}", index, reason),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Parse a whole script into frames, in file order.
pub fn parse_script(text: &str) -> Result<Vec<Frame>, ReplayError> {
    let wrapped = format!("(\n{}\n)", text);
    let value = lexpr::from_str(&wrapped).map_err(|e| ReplayError::Syntax(e.to_string()))?;
    let forms = sexp::list_items(&value)
        .ok_or_else(|| ReplayError::Syntax("unbalanced top-level forms".to_string()))?;

    let mut frames = Vec::with_capacity(forms.len());
    let mut last_t = f64::NEG_INFINITY;
    for (index, form) in forms.into_iter().enumerate() {
        let frame = parse_frame(form).map_err(|reason| ReplayError::Form { index, reason })?;
        if frame.timestamp_ms < last_t {
            warn!(
                "Frame {} goes back in time ({:.0}ms after {:.0}ms)",
                index, frame.timestamp_ms, last_t
            );
        }
        last_t = frame.timestamp_ms;
        frames.push(frame);
    }
    Ok(frames)
}

/// Parse one `(:t MS :hand POINTS)` form.
pub fn parse_frame(form: &Value) -> Result<Frame, String> {
    let pairs = sexp::plist_pairs(form).ok_or_else(|| "expected a keyword plist".to_string())?;

    let mut timestamp = None;
    let mut hand = None;
    for (key, value) in pairs {
        match key {
            "t" => {
                let t = sexp::as_number(value)
                    .filter(|t| t.is_finite())
                    .ok_or_else(|| "invalid :t (expected milliseconds)".to_string())?;
                timestamp = Some(t);
            }
            "hand" => hand = Some(parse_hand(value)?),
            other => return Err(format!("unknown key :{}", other)),
        }
    }

    Ok(Frame {
        timestamp_ms: timestamp.ok_or_else(|| "missing :t".to_string())?,
        landmarks: hand.ok_or_else(|| "missing :hand".to_string())?,
    })
}

fn parse_hand(value: &Value) -> Result<Option<Vec<Landmark>>, String> {
    if sexp::is_nil(value) {
        return Ok(None);
    }
    let points = sexp::list_items(value)
        .ok_or_else(|| "invalid :hand (expected a list of points or nil)".to_string())?;
    points
        .into_iter()
        .enumerate()
        .map(|(i, p)| parse_point(p).ok_or_else(|| format!("invalid point {}", i)))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_point(value: &Value) -> Option<Landmark> {
    let coords = sexp::list_items(value)?
        .into_iter()
        .map(sexp::as_number)
        .collect::<Option<Vec<f64>>>()?;
    match coords.as_slice() {
        [x, y] => Some(Landmark::new(*x as f32, *y as f32, 0.0)),
        [x, y, z] => Some(Landmark::new(*x as f32, *y as f32, *z as f32)),
        _ => None,
    }
}

/// Render a frame back into script form.
pub fn format_frame(frame: &Frame) -> String {
    let hand = match &frame.landmarks {
        None => "nil".to_string(),
        Some(points) => {
            let pts: Vec<String> = points
                .iter()
                .map(|p| format!("({:.4} {:.4} {:.4})", p.x, p.y, p.z))
                .collect();
            format!("({})", pts.join(" "))
        }
    };
    format!("(:t {:.0} :hand {})", frame.timestamp_ms, hand)
}
