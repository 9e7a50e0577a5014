//! Software 2D sprite kit.
//!
//! The reusable core of a family of small rendering programs: a texture
//! wrapper that owns decoded pixels and blits with clipping, rotation,
//! mirroring and modulation; a mouse-hover button widget driven by pointer
//! events against a shared sprite atlas; and the software canvas and frame
//! harness they run on, all headless and deterministic.

pub mod button;
pub mod canvas;
pub mod config;
pub mod error;
pub mod event;
pub mod font;
pub mod geom;
pub mod harness;
pub mod texture;

pub use button::{ButtonClips, ButtonState, HoverButton};
pub use canvas::{BlendMode, Canvas};
pub use error::{Error, Result};
pub use event::{Event, EventQueue, PointerState};
pub use font::FontBook;
pub use geom::{Color, Point, Rect};
pub use harness::Harness;
pub use texture::{Flip, Texture, TextureData};
