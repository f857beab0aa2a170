//! Tracking lifecycle: owns the frame source and, while enabled, the engine.
//!
//! The engine only exists between `enable` and `disable`, so no gesture
//! state carries over a disable/enable cycle.

use tracing::{info, warn};

use crate::engine::{dispatch, FrameOutput, GestureConfig, GestureEngine, GestureHandler};
use crate::source::FrameSource;

pub struct TrackingController<S: FrameSource> {
    source: S,
    config: GestureConfig,
    engine: Option<GestureEngine>,
    frames: u64,
}

impl<S: FrameSource> TrackingController<S> {
    pub fn new(source: S, config: GestureConfig) -> Self {
        Self {
            source,
            config,
            engine: None,
            frames: 0,
        }
    }

    /// Start the source and create a fresh engine.
    pub fn enable(&mut self) -> anyhow::Result<()> {
        if self.engine.is_some() {
            warn!("Tracking already enabled");
            return Ok(());
        }
        self.source.start()?;
        self.engine = Some(GestureEngine::new(self.config.clone()));
        self.frames = 0;
        info!("Hand tracking enabled");
        Ok(())
    }

    /// Stop the source and drop all gesture state.
    pub fn disable(&mut self) {
        if self.engine.take().is_some() {
            self.source.stop();
            info!("Hand tracking disabled after {} frames", self.frames);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.engine.is_some()
    }

    pub fn engine(&self) -> Option<&GestureEngine> {
        self.engine.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Pull one frame through the engine and deliver its output.
    ///
    /// Returns `None` when disabled or the source has no more frames.
    pub fn pump<H: GestureHandler + ?Sized>(&mut self, handler: &mut H) -> Option<FrameOutput> {
        let engine = self.engine.as_mut()?;
        let frame = self.source.next_frame()?;
        self.frames += 1;

        let landmarks = frame.landmarks.as_deref().unwrap_or(&[]);
        let output = engine.update_raw(landmarks, frame.timestamp_ms);
        dispatch(&output.events, handler);
        if output.published {
            handler.on_snapshot(&output.snapshot);
        }
        Some(output)
    }

    /// Pump until the source is exhausted. Returns the number of frames processed.
    pub fn run_to_end<H: GestureHandler + ?Sized>(&mut self, handler: &mut H) -> u64 {
        let mut n = 0;
        while self.pump(handler).is_some() {
            n += 1;
        }
        n
    }
}

impl<S: FrameSource> Drop for TrackingController<S> {
    fn drop(&mut self) {
        self.disable();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{poses, ActiveMode, RecordingHandler};
    use crate::source::{Frame, ScriptedSource};

    fn controller(frames: Vec<Frame>) -> TrackingController<ScriptedSource> {
        TrackingController::new(ScriptedSource::new(frames), GestureConfig::default())
    }

    fn open_frames(start: f64, n: usize) -> Vec<Frame> {
        (0..n)
            .map(|i| Frame::hand(start + i as f64 * 33.0, poses::open_hand()))
            .collect()
    }

    #[test]
    fn test_disabled_pump_is_noop() {
        let mut c = controller(open_frames(0.0, 3));
        let mut h = RecordingHandler::new();
        assert!(!c.is_enabled());
        assert!(c.pump(&mut h).is_none());
        assert!(h.events.is_empty());
        assert_eq!(c.source().remaining(), 3, "no frame consumed while disabled");
    }

    #[test]
    fn test_enable_and_run() {
        let mut c = controller(open_frames(0.0, 4));
        let mut h = RecordingHandler::new();
        c.enable().expect("enable");
        assert!(c.is_enabled());
        assert_eq!(c.run_to_end(&mut h), 4);
        assert_eq!(c.engine().map(|e| e.mode()), Some(ActiveMode::FiveFinger));
        assert_eq!(h.count("index-move"), 4);
        assert!(!h.snapshots.is_empty());
        assert!(h.snapshots[0].hand_detected);
    }

    #[test]
    fn test_enable_twice_is_harmless() {
        let mut c = controller(open_frames(0.0, 1));
        c.enable().expect("enable");
        c.enable().expect("second enable is a no-op");
        assert!(c.source().is_running());
    }

    #[test]
    fn test_disable_stops_source() {
        let mut c = controller(open_frames(0.0, 3));
        c.enable().expect("enable");
        c.disable();
        assert!(!c.is_enabled());
        assert!(!c.source().is_running());
        assert!(c.engine().is_none());
    }

    #[test]
    fn test_no_state_survives_disable() {
        let mut frames = open_frames(0.0, 3);
        frames.extend(open_frames(1000.0, 2));
        let mut c = controller(frames);
        let mut h = RecordingHandler::new();

        c.enable().expect("enable");
        for _ in 0..3 {
            c.pump(&mut h);
        }
        assert_eq!(c.engine().map(|e| e.mode()), Some(ActiveMode::FiveFinger));

        c.disable();
        c.enable().expect("re-enable");
        assert_eq!(c.engine().map(|e| e.mode()), Some(ActiveMode::Pointer));
        // Two more open frames are not enough to re-activate.
        let out = c.pump(&mut h).expect("frame");
        assert!(!out.snapshot.is_five_finger);
        let out = c.pump(&mut h).expect("frame");
        assert!(!out.snapshot.is_five_finger);
    }

    #[test]
    fn test_empty_frames_reach_engine_as_no_hand() {
        let mut c = controller(vec![
            Frame::hand(0.0, poses::fist()),
            Frame::empty(33.0),
            Frame::hand(66.0, poses::translated(&poses::fist(), 0.2, 0.0)),
        ]);
        let mut h = RecordingHandler::new();
        c.enable().expect("enable");
        c.pump(&mut h);
        let out = c.pump(&mut h).expect("frame");
        assert!(!out.snapshot.hand_detected);
        let out = c.pump(&mut h).expect("frame");
        assert_eq!(out.snapshot.delta_x, 0.0, "no delta across the gap");
    }

    #[test]
    fn test_snapshots_are_throttled() {
        let frames = (0..6).map(|i| Frame::hand(i as f64 * 20.0, poses::fist())).collect();
        let mut c = controller(frames);
        let mut h = RecordingHandler::new();
        c.enable().expect("enable");
        c.run_to_end(&mut h);
        // Steady pose over 100ms: published at 0 and 100.
        assert_eq!(h.snapshots.len(), 2);
        assert_eq!(h.count("index-move"), 6);
    }
}
