//! memtree-gestures: hand-gesture classification for the memory tree viewer.
//!
//! A per-frame engine turns 21-point hand landmarks into one debounced
//! interaction mode (pointer, pinch/tap, five-finger rotate/zoom, scroll)
//! plus smoothed pointer signals, delivered as callbacks and a throttled
//! state snapshot.

pub mod controller;
pub mod engine;
pub mod replay;
pub mod sexp;
pub mod source;

pub use controller::TrackingController;
pub use engine::{
    ActiveMode, FrameOutput, GestureConfig, GestureEngine, GestureEvent, GestureHandler,
    GestureSnapshot, HandSample, Landmark,
};
pub use source::{Frame, FrameSource, ScriptedSource};
