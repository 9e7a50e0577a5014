//! Font loading and text rasterization using cosmic-text.
//!
//! Holds a `FontSystem` with only explicitly loaded TTF files (no system
//! fonts) plus a `SwashCache` for glyph rasterization. Text is shaped one
//! line at a time and composited into a tight RGBA buffer suitable for
//! [`Texture::load_from_rendered_text`](crate::texture::Texture::load_from_rendered_text).

use std::path::Path;

use cosmic_text::{fontdb, Attrs, Buffer, Family, Metrics, Shaping, SwashContent};

use crate::error::{Error, Result};
use crate::geom::Color;
use crate::texture::TextureData;

/// Manages loaded fonts and rasterizes text lines.
pub struct FontBook {
    font_system: cosmic_text::FontSystem,
    swash_cache: cosmic_text::SwashCache,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook").finish_non_exhaustive()
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBook {
    /// Create an empty font book. No system fonts are loaded; every face
    /// comes from an explicit [`load_font`](Self::load_font) call.
    pub fn new() -> Self {
        let db = fontdb::Database::new();
        let font_system = cosmic_text::FontSystem::new_with_locale_and_db("en-US".to_string(), db);
        Self {
            font_system,
            swash_cache: cosmic_text::SwashCache::new(),
        }
    }

    /// Load a TTF/OTF file and return its family name.
    ///
    /// The family name is what `rasterize_line` takes to select the font.
    pub fn load_font(&mut self, path: &Path) -> Result<String> {
        let data = std::fs::read(path)?;
        let family = fontdb_family_name(&data)
            .ok_or_else(|| Error::TextRender(format!("no font face in {}", path.display())))?;
        self.font_system.db_mut().load_font_data(data);
        tracing::debug!("Loaded font {} -> family '{}'", path.display(), family);
        Ok(family)
    }

    /// Rasterize one line of text into RGBA pixels tinted with `color`.
    ///
    /// Fails if the text is empty or shaping produces no drawable glyphs
    /// (e.g. no matching font is loaded).
    pub fn rasterize_line(
        &mut self,
        text: &str,
        family: Option<&str>,
        size: f32,
        color: Color,
    ) -> Result<TextureData> {
        if text.is_empty() {
            return Err(Error::TextRender("empty text".into()));
        }

        let line_height = (size * 1.2).ceil();
        let metrics = Metrics::new(size, line_height);
        let attrs = match family {
            Some(name) => Attrs::new().family(Family::Name(name)),
            None => Attrs::new(),
        };

        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        // Wide enough that a single line never wraps.
        buffer.set_size(&mut self.font_system, Some(10_000.0), Some(line_height * 2.0));
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, true);

        let width = buffer
            .layout_runs()
            .map(|run| run.line_w.ceil() as u32)
            .max()
            .unwrap_or(0);
        let height = line_height as u32;
        if width == 0 {
            return Err(Error::TextRender(format!("no glyphs for {text:?}")));
        }

        let mut data = TextureData {
            width,
            height,
            pixels: vec![0u8; (width * height * 4) as usize],
        };

        let mut drew_any = false;
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let pg = glyph.physical((0.0, 0.0), 1.0);
                let Some(image) = self
                    .swash_cache
                    .get_image(&mut self.font_system, pg.cache_key)
                    .as_ref()
                else {
                    continue;
                };
                if image.placement.width == 0 || image.placement.height == 0 {
                    continue;
                }
                let origin_x = pg.x;
                let origin_y = run.line_y as i32 + pg.y - image.placement.top;
                write_glyph(&mut data, origin_x, origin_y, image, color);
                drew_any = true;
            }
        }

        if !drew_any {
            return Err(Error::TextRender(format!("no drawable glyphs for {text:?}")));
        }
        Ok(data)
    }
}

/// Composite one swash glyph image into the output buffer, tinted.
///
/// Mask and SubpixelMask content carry coverage only; the pixel color comes
/// from the requested text color. Color content (e.g. emoji) is used as-is.
fn write_glyph(
    data: &mut TextureData,
    origin_x: i32,
    origin_y: i32,
    image: &cosmic_text::SwashImage,
    color: Color,
) {
    let width = image.placement.width;
    let height = image.placement.height;

    for y in 0..height {
        for x in 0..width {
            let dst_x = origin_x + x as i32;
            let dst_y = origin_y + y as i32;
            if dst_x < 0 || dst_y < 0 || dst_x >= data.width as i32 || dst_y >= data.height as i32 {
                continue;
            }

            let (r, g, b, a) = match image.content {
                SwashContent::Mask => {
                    let coverage = image.data[(y * width + x) as usize];
                    (color.r, color.g, color.b, scale(coverage, color.a))
                }
                SwashContent::SubpixelMask => {
                    let coverage = image.data[((y * width + x) * 3) as usize];
                    (color.r, color.g, color.b, scale(coverage, color.a))
                }
                SwashContent::Color => {
                    let i = ((y * width + x) * 4) as usize;
                    (
                        image.data[i],
                        image.data[i + 1],
                        image.data[i + 2],
                        image.data[i + 3],
                    )
                }
            };

            let dst = ((dst_y as u32 * data.width + dst_x as u32) * 4) as usize;
            // Overlapping glyphs keep the higher coverage.
            if a >= data.pixels[dst + 3] {
                data.pixels[dst] = r;
                data.pixels[dst + 1] = g;
                data.pixels[dst + 2] = b;
                data.pixels[dst + 3] = a;
            }
        }
    }
}

fn scale(coverage: u8, alpha: u8) -> u8 {
    (coverage as u16 * alpha as u16 / 255) as u8
}

/// Extract the font family name from raw TTF data using a throwaway fontdb.
fn fontdb_family_name(data: &[u8]) -> Option<String> {
    let mut tmp_db = fontdb::Database::new();
    tmp_db.load_font_data(data.to_vec());
    tmp_db
        .faces()
        .next()
        .map(|face| face.families[0].0.clone())
}
