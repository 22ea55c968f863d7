use super::capture::{PointerCapture, TouchSink};
use super::types::{MotionAction, MotionEvent, TouchAction, TouchEvent};

/// Last known state of one touch contact.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct PointerSlot {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

impl PointerSlot {
    /// Stores the position; returns whether either coordinate changed.
    fn set_pos(&mut self, x: f32, y: f32) -> bool {
        let changed = self.x != x || self.y != y;
        self.x = x;
        self.y = y;
        changed
    }

    fn event(&self, index: usize, action: TouchAction) -> TouchEvent {
        TouchEvent {
            index,
            xpos: self.x,
            ypos: self.y,
            action,
        }
    }
}

/// Turns raw motion records into deduplicated touch events.
///
/// Slots are indexed by the pointer's position in the motion record, grow
/// on demand and are never removed. A slot emits `Down` only when it was
/// idle, `Up` only when it was active, and `Move` whenever a slot present
/// in the record was actually displaced. Nothing reaches the sink while the capture layer
/// wants pointer input, but slot state and the capture layer are updated
/// either way.
#[derive(Debug, Default)]
pub struct PointerTracker {
    slots: Vec<PointerSlot>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one motion record.
    pub fn notify<C, S>(&mut self, event: &MotionEvent, capture: &mut C, sink: &mut S)
    where
        C: PointerCapture + ?Sized,
        S: TouchSink + ?Sized,
    {
        match event.decode() {
            MotionAction::PointerDown(index) => self.activate(index, event, capture, sink),
            MotionAction::PointerUp(index) => self.deactivate(index, event, capture, sink),
            MotionAction::Down => self.activate(0, event, capture, sink),
            MotionAction::Up => self.deactivate(0, event, capture, sink),
            MotionAction::Move => self.update_movements(event, capture, sink),
            MotionAction::Other(code) => {
                log::warn!("unhandled motion input action: {code}");
            }
        }
    }

    /// Applies every record of one input buffer, in order.
    pub fn notify_batch<C, S>(&mut self, events: &[MotionEvent], capture: &mut C, sink: &mut S)
    where
        C: PointerCapture + ?Sized,
        S: TouchSink + ?Sized,
    {
        for event in events {
            self.notify(event, capture, sink);
        }
    }

    pub fn slot(&self, index: usize) -> Option<&PointerSlot> {
        self.slots.get(index)
    }

    /// Number of slots ever referenced.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.active).count()
    }

    fn slot_mut(&mut self, index: usize) -> &mut PointerSlot {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, PointerSlot::default());
        }
        &mut self.slots[index]
    }

    fn activate<C, S>(&mut self, index: usize, event: &MotionEvent, capture: &mut C, sink: &mut S)
    where
        C: PointerCapture + ?Sized,
        S: TouchSink + ?Sized,
    {
        let Some(axes) = event.pointers.get(index) else {
            log::warn!(
                "pointer down references index {index} but the event carries {} pointers",
                event.pointers.len()
            );
            return;
        };

        let slot = self.slot_mut(index);
        slot.set_pos(axes.x, axes.y);
        capture.add_pointer_pos(slot.x, slot.y);
        if slot.active {
            return;
        }

        slot.active = true;
        capture.add_pointer_button(true);
        if !capture.wants_pointer_input() {
            sink.on_touch_event(slot.event(index, TouchAction::Down));
        }
    }

    fn deactivate<C, S>(&mut self, index: usize, event: &MotionEvent, capture: &mut C, sink: &mut S)
    where
        C: PointerCapture + ?Sized,
        S: TouchSink + ?Sized,
    {
        let Some(axes) = event.pointers.get(index) else {
            log::warn!(
                "pointer up references index {index} but the event carries {} pointers",
                event.pointers.len()
            );
            return;
        };

        let slot = self.slot_mut(index);
        slot.set_pos(axes.x, axes.y);
        capture.add_pointer_pos(slot.x, slot.y);
        if !slot.active {
            return;
        }

        slot.active = false;
        capture.add_pointer_button(false);
        if !capture.wants_pointer_input() {
            sink.on_touch_event(slot.event(index, TouchAction::Up));
        }
    }

    fn update_movements<C, S>(&mut self, event: &MotionEvent, capture: &mut C, sink: &mut S)
    where
        C: PointerCapture + ?Sized,
        S: TouchSink + ?Sized,
    {
        let count = event.pointers.len().min(self.slots.len());

        for (index, (slot, axes)) in self.slots[..count]
            .iter_mut()
            .zip(&event.pointers)
            .enumerate()
        {
            if !slot.set_pos(axes.x, axes.y) {
                continue;
            }

            capture.add_pointer_pos(slot.x, slot.y);
            if !capture.wants_pointer_input() {
                sink.on_touch_event(slot.event(index, TouchAction::Move));
            }
        }
    }
}
