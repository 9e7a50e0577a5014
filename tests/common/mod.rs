//! Shared test helpers.

use sprite_sim::{ButtonClips, Color, Texture, TextureData};

/// Fill colors for the four button states, in sprite-sheet order.
#[allow(dead_code)]
pub const STATE_COLORS: [Color; 4] = [
    Color::rgb(10, 10, 10),   // idle
    Color::rgb(20, 20, 20),   // hover
    Color::rgb(30, 30, 30),   // pressed
    Color::rgb(40, 40, 40),   // released
];

/// Build a four-state sprite atlas (solid color per state, stacked
/// vertically) plus the matching clip table.
#[allow(dead_code)]
pub fn state_atlas(width: u32, height: u32) -> (Texture, ButtonClips) {
    let mut pixels = Vec::with_capacity((width * height * 4 * 4) as usize);
    for color in STATE_COLORS {
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
    let atlas = Texture::from_data(TextureData {
        width,
        height: height * 4,
        pixels,
    });
    let clips = ButtonClips::vertical_strip(width as f32, height as f32);
    (atlas, clips)
}

/// Write a solid-color PNG into `dir` and return its path.
#[allow(dead_code)]
pub fn write_png(
    dir: &std::path::Path,
    name: &str,
    width: u32,
    height: u32,
    color: Color,
) -> std::path::PathBuf {
    let img = image::RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([color.r, color.g, color.b, color.a]),
    );
    let path = dir.join(name);
    img.save(&path).expect("failed to write test PNG");
    path
}
