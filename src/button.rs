//! Mouse-hover button widget.
//!
//! A [`HoverButton`] tracks one rectangular hot zone and a discrete visual
//! state driven by pointer events. It owns no pixels of its own: at render
//! time it picks one clip out of a shared sprite atlas based on its state,
//! so any number of buttons can share a single [`Texture`].

use std::collections::HashMap;

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::event::{Event, PointerState};
use crate::geom::{Point, Rect};
use crate::texture::Texture;

/// Visual state of a button, one sprite clip per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    /// Pointer outside the button.
    #[default]
    Idle,
    /// Pointer moving inside the button.
    Hover,
    /// Pointer button held down inside the button.
    Pressed,
    /// Pointer button released inside the button.
    Released,
}

impl ButtonState {
    /// All states, in sprite-sheet order.
    pub const ALL: [ButtonState; 4] = [
        ButtonState::Idle,
        ButtonState::Hover,
        ButtonState::Pressed,
        ButtonState::Released,
    ];

    fn index(self) -> usize {
        match self {
            ButtonState::Idle => 0,
            ButtonState::Hover => 1,
            ButtonState::Pressed => 2,
            ButtonState::Released => 3,
        }
    }
}

/// State-to-clip table for a button sprite atlas.
///
/// Total by construction: every [`ButtonState`] has a clip, so render never
/// has to handle a missing entry and the table cannot be built incomplete.
#[derive(Debug, Clone)]
pub struct ButtonClips {
    clips: [Rect; 4],
}

impl ButtonClips {
    /// Build from one clip per state.
    pub fn new(idle: Rect, hover: Rect, pressed: Rect, released: Rect) -> Self {
        Self {
            clips: [idle, hover, pressed, released],
        }
    }

    /// Build from a state-to-clip map, rejecting incomplete tables.
    pub fn from_map(map: &HashMap<ButtonState, Rect>) -> Result<Self> {
        let mut clips = [Rect::default(); 4];
        for state in ButtonState::ALL {
            let clip = map.get(&state).ok_or(Error::MissingClip(state))?;
            clips[state.index()] = *clip;
        }
        Ok(Self { clips })
    }

    /// Clips for a sheet with the four state sprites stacked vertically in
    /// [`ButtonState::ALL`] order, each `width` x `height`.
    pub fn vertical_strip(width: f32, height: f32) -> Self {
        let mut clips = [Rect::default(); 4];
        for (i, clip) in clips.iter_mut().enumerate() {
            *clip = Rect::new(0.0, i as f32 * height, width, height);
        }
        Self { clips }
    }

    pub fn get(&self, state: ButtonState) -> Rect {
        self.clips[state.index()]
    }
}

/// A fixed-size button that reacts to pointer hover, press and release.
#[derive(Debug)]
pub struct HoverButton {
    position: Point,
    width: f32,
    height: f32,
    state: ButtonState,
}

impl HoverButton {
    /// Create a button at (0, 0) in the idle state.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            position: Point::default(),
            width,
            height,
            state: ButtonState::Idle,
        }
    }

    /// Set the top-left corner. No validation; placement is the caller's.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Point::new(x, y);
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Hot zone rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Update the visual state from one input event.
    ///
    /// Only pointer motion/down/up are consumed; everything else is a
    /// no-op. The position comes from the pointer-state query, not the
    /// event payload. The machine is memoryless: the new state depends only
    /// on containment and the event kind, and any out-of-bounds report
    /// resets to idle no matter what was pressed before.
    pub fn handle_event(&mut self, event: &Event, pointer: &PointerState) {
        let inside_state = match event {
            Event::PointerMotion { .. } => ButtonState::Hover,
            Event::PointerDown { .. } => ButtonState::Pressed,
            Event::PointerUp { .. } => ButtonState::Released,
            _ => return,
        };

        self.state = if self.bounds().contains(pointer.position) {
            inside_state
        } else {
            ButtonState::Idle
        };
    }

    /// Draw the sprite for the current state from the shared atlas.
    pub fn render(&self, canvas: &mut Canvas, atlas: &Texture, clips: &ButtonClips) {
        atlas.render_clip(canvas, self.position.x, self.position.y, clips.get(self.state));
    }
}
