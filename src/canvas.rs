//! Software RGBA render target.
//!
//! The canvas plays the role the hardware renderer plays in a windowed
//! build: textures blit onto it, primitives draw onto it, and a frame is
//! "presented" by reading the pixels back (or saving them as a PNG). All
//! composition happens on the CPU so rendering is deterministic and
//! testable without a display.

use std::path::Path;

use image::RgbaImage;

use crate::geom::{Color, Rect};

/// Per-draw composition mode, applied when a texture pixel lands on the
/// canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Overwrite the destination (including alpha).
    #[default]
    None,
    /// Source-over alpha blending.
    Blend,
    /// Additive: destination + source scaled by source alpha, saturating.
    Add,
    /// Multiplicative: destination * source.
    Mod,
}

/// Integer viewport derived from a `Rect`, clipped to canvas bounds at use.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

/// CPU-side RGBA render target with a draw color and an optional viewport.
///
/// Primitive draws are translated by the viewport origin and clipped to the
/// viewport; `clear` ignores the viewport and resets the whole target.
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    draw_color: Color,
    viewport: Option<Viewport>,
}

impl Canvas {
    /// Create a canvas cleared to opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            pixels: vec![0u8; (width * height * 4) as usize],
            draw_color: Color::BLACK,
            viewport: None,
        };
        canvas.clear(Color::BLACK);
        canvas
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the entire target with `color`, ignoring any viewport.
    pub fn clear(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = color.a;
        }
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    /// Restrict subsequent draws to `rect` and make its top-left corner the
    /// new origin. `None` restores the full target.
    pub fn set_viewport(&mut self, rect: Option<Rect>) {
        self.viewport = rect.map(|r| Viewport {
            x: r.x as i32,
            y: r.y as i32,
            w: r.w as i32,
            h: r.h as i32,
        });
    }

    /// Translate viewport-relative coordinates to a pixel index, or `None`
    /// if the position falls outside the viewport or the target.
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let (x, y) = match self.viewport {
            Some(vp) => {
                if x < 0 || y < 0 || x >= vp.w || y >= vp.h {
                    return None;
                }
                (x + vp.x, y + vp.y)
            }
            None => (x, y),
        };
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(((y as u32 * self.width + x as u32) * 4) as usize)
    }

    /// Read a pixel in absolute target coordinates (viewport not applied).
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some(Color::rgba(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ))
    }

    /// Draw a single point with the current draw color.
    pub fn draw_point(&mut self, x: i32, y: i32) {
        let color = self.draw_color;
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color.r;
            self.pixels[i + 1] = color.g;
            self.pixels[i + 2] = color.b;
            self.pixels[i + 3] = color.a;
        }
    }

    /// Draw a line with the current draw color (Bresenham).
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.draw_point(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill a rectangle with the current draw color.
    pub fn fill_rect(&mut self, rect: Rect) {
        let x0 = rect.x as i32;
        let y0 = rect.y as i32;
        let w = rect.w as i32;
        let h = rect.h as i32;
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.draw_point(x, y);
            }
        }
    }

    /// Outline a rectangle with the current draw color.
    pub fn draw_rect(&mut self, rect: Rect) {
        let x0 = rect.x as i32;
        let y0 = rect.y as i32;
        let x1 = x0 + rect.w as i32 - 1;
        let y1 = y0 + rect.h as i32 - 1;
        self.draw_line(x0, y0, x1, y0);
        self.draw_line(x0, y1, x1, y1);
        self.draw_line(x0, y0, x0, y1);
        self.draw_line(x1, y0, x1, y1);
    }

    /// Composite a source pixel onto the canvas under the given blend mode.
    ///
    /// Coordinates are viewport-relative, like primitive draws. This is the
    /// entry point texture blits go through.
    pub fn blend_pixel(&mut self, x: i32, y: i32, src: Color, mode: BlendMode) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        match mode {
            BlendMode::None => {
                self.pixels[i] = src.r;
                self.pixels[i + 1] = src.g;
                self.pixels[i + 2] = src.b;
                self.pixels[i + 3] = src.a;
            }
            BlendMode::Blend => {
                let sa = src.a as u16;
                self.pixels[i] = blend_channel(src.r, self.pixels[i], sa);
                self.pixels[i + 1] = blend_channel(src.g, self.pixels[i + 1], sa);
                self.pixels[i + 2] = blend_channel(src.b, self.pixels[i + 2], sa);
                // dstA = srcA + dstA * (1 - srcA)
                let da = self.pixels[i + 3] as u16;
                self.pixels[i + 3] = (sa + da * (255 - sa) / 255).min(255) as u8;
            }
            BlendMode::Add => {
                let sa = src.a as u16;
                self.pixels[i] = add_channel(src.r, self.pixels[i], sa);
                self.pixels[i + 1] = add_channel(src.g, self.pixels[i + 1], sa);
                self.pixels[i + 2] = add_channel(src.b, self.pixels[i + 2], sa);
            }
            BlendMode::Mod => {
                self.pixels[i] = mod_channel(src.r, self.pixels[i]);
                self.pixels[i + 1] = mod_channel(src.g, self.pixels[i + 1]);
                self.pixels[i + 2] = mod_channel(src.b, self.pixels[i + 2]);
            }
        }
    }

    /// Copy the canvas contents into an owned `RgbaImage`.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .expect("pixel buffer matches canvas dimensions")
    }

    /// Save the canvas as a PNG.
    pub fn save_png(&self, path: &Path) -> crate::Result<()> {
        self.to_image().save(path)?;
        Ok(())
    }
}

/// Source-over blend for one channel: `src * a + dst * (1 - a)`.
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    ((src as u16 * alpha + dst as u16 * (255 - alpha)) / 255) as u8
}

/// Additive blend for one channel, saturating at 255.
fn add_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    (dst as u16 + src as u16 * alpha / 255).min(255) as u8
}

/// Multiplicative blend for one channel.
fn mod_channel(src: u8, dst: u8) -> u8 {
    (src as u16 * dst as u16 / 255) as u8
}
