use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sprite_sim::config::DemoConfig;
use sprite_sim::{
    ButtonClips, Color, Event, FontBook, Harness, HoverButton, Rect, Texture, TextureData,
};

/// Headless four-button sprite demo: loads a sprite atlas, drives a short
/// scripted pointer session through the frame harness, and saves the final
/// frame as a PNG.
#[derive(Parser, Debug)]
#[command(name = "sprite-sim")]
struct Args {
    /// Canvas width (overrides config)
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height (overrides config)
    #[arg(long)]
    height: Option<u32>,

    /// Button sprite sheet: four states stacked vertically
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// TTF font for the caption texture
    #[arg(long)]
    font: Option<PathBuf>,

    /// Screenshot output path (overrides config)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = DemoConfig::load();
    if let Some(w) = args.width {
        config.canvas_width = w;
    }
    if let Some(h) = args.height {
        config.canvas_height = h;
    }
    if let Some(sheet) = args.sheet {
        config.sprite_sheet = Some(sheet);
    }
    if let Some(font) = args.font {
        config.font_file = Some(font);
    }
    if let Some(out) = args.out {
        config.screenshot = out;
    }
    config.save();

    let screen_w = config.canvas_width as f32;
    let screen_h = config.canvas_height as f32;
    let button_w = screen_w / 2.0;
    let button_h = screen_h / 2.0;

    // Sprite atlas: file if configured, otherwise a synthesized strip so
    // the demo shows state changes even without assets on disk.
    let mut atlas = Texture::new();
    if let Some(path) = &config.sprite_sheet {
        if let Err(e) = atlas.load_from_file(path) {
            tracing::warn!("Failed to load sprite sheet {}: {}", path.display(), e);
        }
    }
    let clips = if atlas.is_loaded() {
        ButtonClips::vertical_strip(atlas.width() as f32, atlas.height() as f32 / 4.0)
    } else {
        atlas.load_from_data(state_strip(button_w as u32, button_h as u32));
        ButtonClips::vertical_strip(button_w, button_h)
    };

    // Caption rendered from text, if a font is available.
    let mut caption = Texture::new();
    if let Some(font_path) = &config.font_file {
        let mut fonts = FontBook::new();
        match fonts.load_font(font_path) {
            Ok(family) => {
                if let Err(e) = caption.load_from_rendered_text(
                    &mut fonts,
                    "hover, press, release",
                    Some(&family),
                    28.0,
                    Color::WHITE,
                ) {
                    tracing::warn!("Caption rasterization failed: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to load font {}: {}", font_path.display(), e),
        }
    }

    // One button per screen corner.
    let mut buttons = [
        HoverButton::new(button_w, button_h),
        HoverButton::new(button_w, button_h),
        HoverButton::new(button_w, button_h),
        HoverButton::new(button_w, button_h),
    ];
    buttons[1].set_position(screen_w - button_w, 0.0);
    buttons[2].set_position(0.0, screen_h - button_h);
    buttons[3].set_position(screen_w - button_w, screen_h - button_h);

    let mut harness = Harness::new(config.canvas_width, config.canvas_height);

    // Scripted pointer session: hover the top-left button, press it, glide
    // to the bottom-right button, release there.
    let frames: &[&[Event]] = &[
        &[Event::PointerMotion { x: button_w / 2.0, y: button_h / 2.0 }],
        &[Event::PointerDown { x: button_w / 2.0, y: button_h / 2.0 }],
        &[
            Event::PointerMotion { x: screen_w - 10.0, y: screen_h - 10.0 },
            Event::PointerUp { x: screen_w - 10.0, y: screen_h - 10.0 },
        ],
    ];

    for events in frames {
        for &event in *events {
            harness.push_event(event);
        }
        let running = harness.dispatch_events(|event, pointer| {
            for button in &mut buttons {
                button.handle_event(event, pointer);
            }
        });
        if !running {
            break;
        }

        harness.render_frame(Color::rgb(20, 20, 28), |canvas| {
            for button in &buttons {
                button.render(canvas, &atlas, &clips);
            }

            // Caption in a top-strip viewport, centered.
            if caption.is_loaded() {
                canvas.set_viewport(Some(Rect::new(0.0, 0.0, screen_w, 60.0)));
                let cx = (screen_w - caption.width() as f32) / 2.0;
                caption.render(canvas, cx, 10.0);
                canvas.set_viewport(None);
            }

            // Primitive overlay: frame border and center crosshair.
            canvas.set_draw_color(Color::rgb(255, 210, 0));
            canvas.draw_rect(Rect::new(0.0, 0.0, screen_w, screen_h));
            canvas.set_draw_color(Color::rgba(255, 255, 255, 160));
            canvas.draw_line(0, screen_h as i32 / 2, screen_w as i32 - 1, screen_h as i32 / 2);
            for y in (0..screen_h as i32).step_by(8) {
                canvas.draw_point(screen_w as i32 / 2, y);
            }
        });

        for (i, button) in buttons.iter().enumerate() {
            tracing::info!("frame {}: button {} -> {:?}", harness.frames(), i, button.state());
        }
    }

    harness.canvas().save_png(&config.screenshot)?;
    tracing::info!("Saved {}", config.screenshot.display());
    Ok(())
}

/// Synthesize a four-state sprite strip (solid color per state).
fn state_strip(width: u32, height: u32) -> TextureData {
    let states = [
        Color::rgb(90, 90, 110),   // idle
        Color::rgb(70, 130, 200),  // hover
        Color::rgb(200, 120, 40),  // pressed
        Color::rgb(80, 180, 90),   // released
    ];
    let mut pixels = Vec::with_capacity((width * height * 4 * 4) as usize);
    for color in states {
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }
    TextureData {
        width,
        height: height * 4,
        pixels,
    }
}
