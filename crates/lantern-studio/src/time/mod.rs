//! Frame timing.
//!
//! One [`FrameClock`] drives the main loop; `tick()` is called once per
//! presented frame and its delta feeds the GUI context.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
