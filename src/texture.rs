//! Texture ownership and blitting.
//!
//! A [`Texture`] owns one decoded RGBA image and knows how to draw itself
//! onto a [`Canvas`] with an optional source clip, rotation about a pivot,
//! mirroring, and color/alpha modulation. Loaded-ness is a tagged option:
//! there is no null handle to dereference, and rendering an unloaded
//! texture is a no-op rather than undefined behavior.

use std::path::Path;

use crate::canvas::{BlendMode, Canvas};
use crate::error::Result;
use crate::font::FontBook;
use crate::geom::{Color, Point, Rect};

/// The color treated as fully transparent when loading image files.
///
/// Legacy palette-style sprite sheets mark their background with this exact
/// cyan; the key is applied on file load only, never to rendered text or
/// externally decoded data.
pub const COLOR_KEY: Color = Color::rgb(0, 255, 255);

/// Decoded RGBA pixel data.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>, // RGBA
}

/// Mirroring applied at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

/// A drawable image with render-time modulation state.
#[derive(Debug, Default)]
pub struct Texture {
    data: Option<TextureData>,
    color_mod: [u8; 3],
    alpha_mod: u8,
    blend: BlendMode,
}

impl Texture {
    /// Create an empty (unloaded) texture.
    pub fn new() -> Self {
        Self {
            data: None,
            color_mod: [255, 255, 255],
            alpha_mod: 255,
            blend: BlendMode::Blend,
        }
    }

    /// Wrap externally decoded pixel data. No color key is applied.
    pub fn from_data(data: TextureData) -> Self {
        let mut texture = Self::new();
        texture.load_from_data(data);
        texture
    }

    /// Replace the held pixels with externally decoded data.
    pub fn load_from_data(&mut self, data: TextureData) {
        self.free();
        self.data = Some(data);
    }

    /// Load an image file, keying [`COLOR_KEY`] pixels to transparent.
    ///
    /// Any previously held pixels are released first. On failure the
    /// texture is left empty and the error is returned; callers decide
    /// whether a missing asset aborts the program.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        self.free();

        let img = image::open(path)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut data = TextureData {
            width,
            height,
            pixels: rgba.into_raw(),
        };
        apply_color_key(&mut data, COLOR_KEY);

        tracing::debug!("Loaded texture {} ({}x{})", path.display(), width, height);
        self.data = Some(data);
        Ok(())
    }

    /// Load from one line of text rasterized in the given font.
    ///
    /// Same ownership contract as [`load_from_file`](Self::load_from_file):
    /// the old pixels are released first, and on failure the texture stays
    /// empty. No color key is applied to rendered text.
    pub fn load_from_rendered_text(
        &mut self,
        fonts: &mut FontBook,
        text: &str,
        family: Option<&str>,
        size: f32,
        color: Color,
    ) -> Result<()> {
        self.free();
        let data = fonts.rasterize_line(text, family, size, color)?;
        self.data = Some(data);
        Ok(())
    }

    /// Release the held pixels. Idempotent; safe on an empty texture.
    pub fn free(&mut self) {
        self.data = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Width of the loaded image, 0 if unloaded.
    pub fn width(&self) -> u32 {
        self.data.as_ref().map_or(0, |d| d.width)
    }

    /// Height of the loaded image, 0 if unloaded.
    pub fn height(&self) -> u32 {
        self.data.as_ref().map_or(0, |d| d.height)
    }

    /// Set the color modulation multiplied into every rendered pixel.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.color_mod = [r, g, b];
    }

    /// Set the alpha modulation multiplied into every rendered pixel.
    pub fn set_alpha(&mut self, a: u8) {
        self.alpha_mod = a;
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Draw the whole texture at `(x, y)`.
    pub fn render(&self, canvas: &mut Canvas, x: f32, y: f32) {
        self.render_ex(canvas, x, y, None, 0.0, None, Flip::None);
    }

    /// Draw the sub-rectangle `clip` at `(x, y)`, sized to the clip.
    pub fn render_clip(&self, canvas: &mut Canvas, x: f32, y: f32, clip: Rect) {
        self.render_ex(canvas, x, y, Some(clip), 0.0, None, Flip::None);
    }

    /// Draw with every knob: source clip, clockwise rotation in degrees
    /// about `pivot` (destination-relative; defaults to the destination
    /// center), and mirroring.
    ///
    /// An unloaded texture renders nothing. That usually means a load
    /// failure went unchecked, so it gets a diagnostic rather than silence.
    pub fn render_ex(
        &self,
        canvas: &mut Canvas,
        x: f32,
        y: f32,
        clip: Option<Rect>,
        angle_degrees: f64,
        pivot: Option<Point>,
        flip: Flip,
    ) {
        let Some(data) = &self.data else {
            tracing::warn!("render called on an unloaded texture");
            return;
        };

        let clip = clip.unwrap_or(Rect::new(0.0, 0.0, data.width as f32, data.height as f32));
        let (cx, cy, cw, ch) = clamp_clip(&clip, data.width, data.height);
        if cw == 0 || ch == 0 {
            return;
        }

        let sample = |u: u32, v: u32| -> Color {
            let su = match flip {
                Flip::Horizontal => cw - 1 - u,
                _ => u,
            };
            let sv = match flip {
                Flip::Vertical => ch - 1 - v,
                _ => v,
            };
            let i = (((cy + sv) * data.width + cx + su) * 4) as usize;
            Color::rgba(
                modulate(data.pixels[i], self.color_mod[0]),
                modulate(data.pixels[i + 1], self.color_mod[1]),
                modulate(data.pixels[i + 2], self.color_mod[2]),
                modulate(data.pixels[i + 3], self.alpha_mod),
            )
        };

        if angle_degrees == 0.0 {
            let dx0 = x.round() as i32;
            let dy0 = y.round() as i32;
            for v in 0..ch {
                for u in 0..cw {
                    canvas.blend_pixel(dx0 + u as i32, dy0 + v as i32, sample(u, v), self.blend);
                }
            }
            return;
        }

        render_rotated(canvas, x, y, cw, ch, angle_degrees, pivot, &sample, self.blend);
    }
}

/// Rotated blit via inverse mapping with pixel-center sampling.
///
/// The angle is clockwise on screen (y grows downward), matching the
/// convention of hardware 2D renderers.
#[allow(clippy::too_many_arguments)]
fn render_rotated(
    canvas: &mut Canvas,
    x: f32,
    y: f32,
    cw: u32,
    ch: u32,
    angle_degrees: f64,
    pivot: Option<Point>,
    sample: &dyn Fn(u32, u32) -> Color,
    blend: BlendMode,
) {
    let theta = angle_degrees.to_radians();
    let (sin, cos) = theta.sin_cos();

    let pivot = pivot.unwrap_or(Point::new(cw as f32 / 2.0, ch as f32 / 2.0));
    let px = x as f64 + pivot.x as f64;
    let py = y as f64 + pivot.y as f64;

    // Bounding box of the rotated destination quad.
    let corners = [
        (x as f64, y as f64),
        (x as f64 + cw as f64, y as f64),
        (x as f64, y as f64 + ch as f64),
        (x as f64 + cw as f64, y as f64 + ch as f64),
    ];
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    for (corner_x, corner_y) in corners {
        let rel_x = corner_x - px;
        let rel_y = corner_y - py;
        let rot_x = px + rel_x * cos - rel_y * sin;
        let rot_y = py + rel_x * sin + rel_y * cos;
        min_x = min_x.min(rot_x);
        min_y = min_y.min(rot_y);
        max_x = max_x.max(rot_x);
        max_y = max_y.max(rot_y);
    }

    for dy in min_y.floor() as i32..max_y.ceil() as i32 {
        for dx in min_x.floor() as i32..max_x.ceil() as i32 {
            // Inverse-rotate the destination pixel center back into the
            // unrotated destination rectangle.
            let rel_x = dx as f64 + 0.5 - px;
            let rel_y = dy as f64 + 0.5 - py;
            let local_x = px + rel_x * cos + rel_y * sin - x as f64;
            let local_y = py - rel_x * sin + rel_y * cos - y as f64;
            if local_x < 0.0 || local_y < 0.0 {
                continue;
            }
            let u = local_x.floor() as u32;
            let v = local_y.floor() as u32;
            if u >= cw || v >= ch {
                continue;
            }
            canvas.blend_pixel(dx, dy, sample(u, v), blend);
        }
    }
}

/// Scale one channel by a modulation factor out of 255.
fn modulate(channel: u8, factor: u8) -> u8 {
    (channel as u16 * factor as u16 / 255) as u8
}

/// Clamp a clip rectangle to the texture bounds, returning integer texel
/// coordinates.
fn clamp_clip(clip: &Rect, width: u32, height: u32) -> (u32, u32, u32, u32) {
    let cx = (clip.x.max(0.0) as u32).min(width);
    let cy = (clip.y.max(0.0) as u32).min(height);
    let cw = (clip.w.max(0.0) as u32).min(width - cx);
    let ch = (clip.h.max(0.0) as u32).min(height - cy);
    (cx, cy, cw, ch)
}

/// Set alpha to zero on every pixel whose RGB exactly matches `key`.
fn apply_color_key(data: &mut TextureData, key: Color) {
    for px in data.pixels.chunks_exact_mut(4) {
        if px[0] == key.r && px[1] == key.g && px[2] == key.b {
            px[3] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: Color) -> TextureData {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        TextureData { width, height, pixels }
    }

    /// 2x2 texture with four distinct corner colors.
    fn quad2x2() -> Texture {
        let mut pixels = Vec::new();
        for c in [Color::RED, Color::GREEN, Color::BLUE, Color::WHITE] {
            pixels.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
        Texture::from_data(TextureData { width: 2, height: 2, pixels })
    }

    #[test]
    fn new_texture_is_unloaded() {
        let t = Texture::new();
        assert!(!t.is_loaded());
        assert_eq!(t.width(), 0);
        assert_eq!(t.height(), 0);
    }

    #[test]
    fn free_is_idempotent() {
        let mut t = Texture::from_data(solid(3, 2, Color::RED));
        t.free();
        t.free();
        assert_eq!((t.width(), t.height()), (0, 0));

        let mut never_loaded = Texture::new();
        never_loaded.free();
        assert_eq!((never_loaded.width(), never_loaded.height()), (0, 0));
    }

    #[test]
    fn load_from_data_replaces_previous_pixels() {
        let mut t = Texture::from_data(solid(3, 2, Color::RED));
        t.load_from_data(solid(5, 7, Color::BLUE));
        assert_eq!((t.width(), t.height()), (5, 7));
    }

    #[test]
    fn render_unloaded_is_a_no_op() {
        let t = Texture::new();
        let mut canvas = Canvas::new(4, 4);
        t.render(&mut canvas, 0.0, 0.0);
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn render_places_pixels_at_destination() {
        let t = quad2x2();
        let mut canvas = Canvas::new(8, 8);
        t.render(&mut canvas, 3.0, 4.0);
        assert_eq!(canvas.pixel(3, 4), Some(Color::RED));
        assert_eq!(canvas.pixel(4, 4), Some(Color::GREEN));
        assert_eq!(canvas.pixel(3, 5), Some(Color::BLUE));
        assert_eq!(canvas.pixel(4, 5), Some(Color::WHITE));
        assert_eq!(canvas.pixel(5, 4), Some(Color::BLACK), "outside dest untouched");
    }

    #[test]
    fn render_clip_draws_only_the_clip() {
        let t = quad2x2();
        let mut canvas = Canvas::new(4, 4);
        t.render_clip(&mut canvas, 0.0, 0.0, Rect::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(1, 0), Some(Color::BLACK));
    }

    #[test]
    fn horizontal_flip_mirrors_columns() {
        let t = quad2x2();
        let mut canvas = Canvas::new(4, 4);
        t.render_ex(&mut canvas, 0.0, 0.0, None, 0.0, None, Flip::Horizontal);
        assert_eq!(canvas.pixel(0, 0), Some(Color::GREEN));
        assert_eq!(canvas.pixel(1, 0), Some(Color::RED));
        assert_eq!(canvas.pixel(0, 1), Some(Color::WHITE));
    }

    #[test]
    fn vertical_flip_mirrors_rows() {
        let t = quad2x2();
        let mut canvas = Canvas::new(4, 4);
        t.render_ex(&mut canvas, 0.0, 0.0, None, 0.0, None, Flip::Vertical);
        assert_eq!(canvas.pixel(0, 0), Some(Color::BLUE));
        assert_eq!(canvas.pixel(1, 1), Some(Color::GREEN));
    }

    #[test]
    fn rotation_180_about_center() {
        let t = quad2x2();
        let mut canvas = Canvas::new(16, 16);
        t.render_ex(&mut canvas, 10.0, 10.0, None, 180.0, None, Flip::None);
        // 180 degrees about the center maps each texel to its opposite corner.
        assert_eq!(canvas.pixel(10, 10), Some(Color::WHITE));
        assert_eq!(canvas.pixel(11, 10), Some(Color::BLUE));
        assert_eq!(canvas.pixel(10, 11), Some(Color::GREEN));
        assert_eq!(canvas.pixel(11, 11), Some(Color::RED));
    }

    #[test]
    fn rotation_stays_near_the_destination() {
        let t = Texture::from_data(solid(4, 2, Color::RED));
        let mut canvas = Canvas::new(32, 32);
        t.render_ex(&mut canvas, 12.0, 12.0, None, 45.0, None, Flip::None);
        // The quad's half-diagonal is sqrt(2^2 + 1^2) < 3, so nothing may
        // land outside a 3-pixel margin around the pivot at (14, 13).
        for x in 0..32u32 {
            for y in 0..32u32 {
                if canvas.pixel(x, y) == Some(Color::RED) {
                    assert!((10..=18).contains(&x), "x={x} outside rotated bounds");
                    assert!((9..=17).contains(&y), "y={y} outside rotated bounds");
                }
            }
        }
    }

    #[test]
    fn color_modulation_scales_channels() {
        let mut t = Texture::from_data(solid(1, 1, Color::WHITE));
        t.set_color(255, 128, 0);
        let mut canvas = Canvas::new(1, 1);
        t.render(&mut canvas, 0.0, 0.0);
        let px = canvas.pixel(0, 0).unwrap();
        assert_eq!((px.r, px.g, px.b), (255, 128, 0));
    }

    #[test]
    fn alpha_modulation_blends_with_destination() {
        let mut t = Texture::from_data(solid(1, 1, Color::WHITE));
        t.set_alpha(0);
        let mut canvas = Canvas::new(1, 1);
        canvas.clear(Color::rgb(9, 9, 9));
        t.render(&mut canvas, 0.0, 0.0);
        let px = canvas.pixel(0, 0).unwrap();
        assert_eq!((px.r, px.g, px.b), (9, 9, 9), "alpha 0 leaves destination");
    }

    #[test]
    fn color_key_zeroes_matching_alpha() {
        let mut data = solid(2, 1, COLOR_KEY);
        // Second pixel is one channel off the key color.
        data.pixels[4..8].copy_from_slice(&[0, 255, 254, 255]);
        apply_color_key(&mut data, COLOR_KEY);
        assert_eq!(data.pixels[3], 0, "key pixel keyed out");
        assert_eq!(data.pixels[7], 255, "near-miss pixel untouched");
    }

    #[test]
    fn oversized_clip_is_clamped() {
        let t = quad2x2();
        let mut canvas = Canvas::new(8, 8);
        t.render_clip(&mut canvas, 0.0, 0.0, Rect::new(1.0, 0.0, 10.0, 10.0));
        assert_eq!(canvas.pixel(0, 0), Some(Color::GREEN));
        assert_eq!(canvas.pixel(0, 1), Some(Color::WHITE));
        assert_eq!(canvas.pixel(1, 0), Some(Color::BLACK));
    }
}
