//! Landmark acquisition.
//!
//! A `FrameSource` hands the controller one frame at a time: a timestamp
//! and the raw landmarks of the tracked hand, if any. Camera or model
//! backends implement it; `ScriptedSource` replays a fixed sequence.

use std::collections::VecDeque;

use tracing::debug;

use crate::engine::Landmark;

/// One acquired frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub timestamp_ms: f64,
    /// Raw landmarks, unvalidated. `None` when no hand was detected.
    pub landmarks: Option<Vec<Landmark>>,
}

impl Frame {
    pub fn hand(timestamp_ms: f64, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms,
            landmarks: Some(landmarks),
        }
    }

    pub fn empty(timestamp_ms: f64) -> Self {
        Self {
            timestamp_ms,
            landmarks: None,
        }
    }
}

/// Anything that can deliver landmark frames.
pub trait FrameSource {
    /// Acquire the underlying device or model.
    fn start(&mut self) -> anyhow::Result<()>;

    /// Next frame, or `None` once the source is exhausted or stopped.
    fn next_frame(&mut self) -> Option<Frame>;

    /// Release the underlying device or model.
    fn stop(&mut self);
}

// ── Scripted source ────────────────────────────────────────

/// In-memory frame queue, used for replay and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    frames: VecDeque<Frame>,
    running: bool,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            running: false,
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push_back(frame);
    }

    /// Frames not yet delivered.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl FrameSource for ScriptedSource {
    fn start(&mut self) -> anyhow::Result<()> {
        if self.running {
            anyhow::bail!("scripted source already started");
        }
        debug!("Scripted source started with {} frames", self.frames.len());
        self.running = true;
        Ok(())
    }

    fn next_frame(&mut self) -> Option<Frame> {
        if !self.running {
            return None;
        }
        self.frames.pop_front()
    }

    fn stop(&mut self) {
        if self.running {
            debug!("Scripted source stopped, {} frames left", self.frames.len());
        }
        self.running = false;
    }
}
