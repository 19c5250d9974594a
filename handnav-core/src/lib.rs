//! Stateful side of hand navigation: the scroll gesture mapper, the
//! camera-driven frame loop and the display tone controller.
//!
//! Everything that touches the operating system (camera, preview window,
//! scroll injection, gamma ramps) sits behind a trait so the loop can be
//! driven by fakes in tests.

pub mod frame_loop;
pub mod scroll;
pub mod tone;

pub use frame_loop::{
    annotate, CameraDevice, CameraSource, FrameLoop, PreviewSink, ScrollInjector, TickOutcome,
    TrackingCue, TICK_INTERVAL,
};
pub use scroll::{ScrollMapper, SCROLL_THRESHOLD};
pub use tone::{GammaRamp, ToneController, ToneDevice};
