use super::types::TouchEvent;

/// UI layer that may claim pointer input for itself.
///
/// It is fed every pointer update, claimed or not, so its decision for the
/// next event is based on the real pointer state.
pub trait PointerCapture {
    fn add_pointer_pos(&mut self, x: f32, y: f32);

    /// Primary button state: `true` when a contact starts, `false` when it ends.
    fn add_pointer_button(&mut self, down: bool);

    /// Whether the UI wants pointer input this frame.
    fn wants_pointer_input(&self) -> bool;
}

/// Capture layer for hosts without a UI overlay. Never claims input.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn add_pointer_pos(&mut self, _x: f32, _y: f32) {}

    fn add_pointer_button(&mut self, _down: bool) {}

    fn wants_pointer_input(&self) -> bool {
        false
    }
}

/// Receiver of engine-facing touch events.
pub trait TouchSink {
    fn on_touch_event(&mut self, event: TouchEvent);
}

impl TouchSink for Vec<TouchEvent> {
    fn on_touch_event(&mut self, event: TouchEvent) {
        self.push(event);
    }
}
