//! Reusable frame-loop driver.
//!
//! Every small rendering demo repeats the same scaffolding: poll events,
//! update widgets, clear, render, present. The harness factors that into
//! one place. A frame is two phases called in
//! order: [`dispatch_events`](Harness::dispatch_events) folds every pending
//! event into widget state, then [`render_frame`](Harness::render_frame)
//! clears and draws once. "Present" is a frame counter; the canvas can be
//! read back or saved at any point.

use crate::canvas::Canvas;
use crate::event::{Event, EventQueue, PointerState};
use crate::geom::Color;

/// Owns the render target, the pending-event queue, and the pointer state,
/// and drives the per-frame cycle.
#[derive(Debug)]
pub struct Harness {
    canvas: Canvas,
    events: EventQueue,
    pointer: PointerState,
    frames: u64,
}

impl Harness {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            events: EventQueue::new(),
            pointer: PointerState::default(),
            frames: 0,
        }
    }

    /// Queue an input event for the next dispatch.
    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drain pending events in arrival order, updating the pointer state
    /// before each dispatch so `update` always sees current coordinates.
    ///
    /// Returns `false` if a [`Event::Quit`] was drained; the caller's loop
    /// should stop without rendering.
    pub fn dispatch_events(&mut self, mut update: impl FnMut(&Event, &PointerState)) -> bool {
        let mut quit = false;
        for event in self.events.drain() {
            if matches!(event, Event::Quit) {
                quit = true;
                continue;
            }
            self.pointer.apply(&event);
            update(&event, &self.pointer);
        }
        !quit
    }

    /// Clear the canvas and draw one frame, advancing the frame counter.
    pub fn render_frame(&mut self, clear_color: Color, render: impl FnOnce(&mut Canvas)) {
        self.canvas.clear(clear_color);
        render(&mut self.canvas);
        self.frames += 1;
    }
}
