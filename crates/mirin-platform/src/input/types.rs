/// Raw motion action codes, as packed by the platform into `MotionEvent::action`.
///
/// The low byte is the action; for pointer-down/up the next byte is the
/// index of the pointer that changed.
pub mod action {
    pub const ACTION_MASK: i32 = 0xff;
    pub const ACTION_POINTER_INDEX_MASK: i32 = 0xff00;
    pub const ACTION_POINTER_INDEX_SHIFT: u32 = 8;

    pub const DOWN: i32 = 0;
    pub const UP: i32 = 1;
    pub const MOVE: i32 = 2;
    pub const CANCEL: i32 = 3;
    pub const OUTSIDE: i32 = 4;
    pub const POINTER_DOWN: i32 = 5;
    pub const POINTER_UP: i32 = 6;
    pub const HOVER_MOVE: i32 = 7;
}

/// Axis data of one pointer inside a motion event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerAxes {
    /// Platform pointer id. Not used for slot lookup.
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

impl PointerAxes {
    pub fn new(id: i32, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }
}

/// One raw motion record from the platform input buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionEvent {
    pub action: i32,
    pub pointers: Vec<PointerAxes>,
}

impl MotionEvent {
    pub fn new(action: i32, pointers: Vec<PointerAxes>) -> Self {
        Self { action, pointers }
    }

    /// Builds a pointer-down/up style action code carrying `index`.
    pub fn indexed(action: i32, index: usize, pointers: Vec<PointerAxes>) -> Self {
        let index = (index as i32) << action::ACTION_POINTER_INDEX_SHIFT;
        Self::new(action | (index & action::ACTION_POINTER_INDEX_MASK), pointers)
    }

    pub fn masked_action(&self) -> i32 {
        self.action & action::ACTION_MASK
    }

    pub fn pointer_index(&self) -> usize {
        ((self.action & action::ACTION_POINTER_INDEX_MASK) >> action::ACTION_POINTER_INDEX_SHIFT)
            as usize
    }

    pub fn decode(&self) -> MotionAction {
        match self.masked_action() {
            action::DOWN => MotionAction::Down,
            action::UP => MotionAction::Up,
            action::MOVE => MotionAction::Move,
            action::POINTER_DOWN => MotionAction::PointerDown(self.pointer_index()),
            action::POINTER_UP => MotionAction::PointerUp(self.pointer_index()),
            other => MotionAction::Other(other),
        }
    }
}

/// Decoded form of [`MotionEvent::action`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MotionAction {
    /// First pointer went down; always slot 0.
    Down,
    /// Last pointer went up; always slot 0.
    Up,
    Move,
    PointerDown(usize),
    PointerUp(usize),
    /// Any masked action the tracker does not handle.
    Other(i32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TouchAction {
    Down,
    Up,
    Move,
}

/// Engine-facing touch event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TouchEvent {
    /// Tracker slot of the contact.
    pub index: usize,
    pub xpos: f32,
    pub ypos: f32,
    pub action: TouchAction,
}
