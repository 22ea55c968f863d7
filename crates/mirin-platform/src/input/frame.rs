use super::capture::TouchSink;
use super::types::{TouchAction, TouchEvent};

/// Touch events produced during one poll tick, in arrival order.
#[derive(Debug, Default)]
pub struct TouchFrame {
    pub events: Vec<TouchEvent>,
}

impl TouchFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push_event(&mut self, ev: TouchEvent) {
        self.events.push(ev);
    }

    /// Events of one kind, e.g. all contacts that started this tick.
    pub fn with_action(&self, action: TouchAction) -> impl Iterator<Item = &TouchEvent> + '_ {
        self.events.iter().filter(move |e| e.action == action)
    }
}

impl TouchSink for TouchFrame {
    fn on_touch_event(&mut self, event: TouchEvent) {
        self.push_event(event);
    }
}
