//! Input events and the current-pointer-state query.
//!
//! Events are plain values fed in by whatever drives the frame loop; there
//! is no OS event pump here. Widgets that care about the pointer read its
//! position from [`PointerState`], not from the event payload, the way a
//! mouse-state query is separate from the event that woke the loop.

use crate::geom::Point;

/// A single input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    PointerMotion { x: f32, y: f32 },
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    KeyDown { key: u32 },
    Quit,
}

impl Event {
    /// Whether this is one of the pointer event kinds widgets consume.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Event::PointerMotion { .. } | Event::PointerDown { .. } | Event::PointerUp { .. }
        )
    }
}

/// The driver-maintained "where is the pointer right now" answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub position: Point,
}

impl PointerState {
    /// Fold an event into the tracked position. Non-pointer events leave
    /// the position unchanged.
    pub fn apply(&mut self, event: &Event) {
        match *event {
            Event::PointerMotion { x, y }
            | Event::PointerDown { x, y }
            | Event::PointerUp { x, y } => {
                self.position = Point::new(x, y);
            }
            _ => {}
        }
    }
}

/// Queue of pending events, drained once per frame in arrival order.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.pending.push(event);
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
