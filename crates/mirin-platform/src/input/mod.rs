//! Input subsystem.
//!
//! Converts raw per-pointer motion records into engine touch events.
//! Key events and key-code translation are handled by the host.

mod capture;
mod frame;
mod state;
mod types;

pub use capture::{NoCapture, PointerCapture, TouchSink};
pub use frame::TouchFrame;
pub use state::{PointerSlot, PointerTracker};
pub use types::{
    action,
    MotionAction,
    MotionEvent,
    PointerAxes,
    TouchAction,
    TouchEvent,
};
