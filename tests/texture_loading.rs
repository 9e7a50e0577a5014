//! Texture loading lifecycle: dimensions, failure handling, reload, color key.

mod common;

use std::path::Path;

use common::write_png;
use sprite_sim::{Canvas, Color, FontBook, Texture, TextureData};

#[test]
fn load_reports_true_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "red.png", 5, 3, Color::RED);

    let mut texture = Texture::new();
    texture.load_from_file(&path).unwrap();
    assert_eq!(texture.width(), 5);
    assert_eq!(texture.height(), 3);
    assert!(texture.is_loaded());
}

#[test]
fn missing_file_leaves_texture_empty() {
    let mut texture = Texture::new();
    let result = texture.load_from_file(Path::new("/nonexistent/sprite.png"));
    assert!(result.is_err());
    assert!(!texture.is_loaded());
    assert_eq!((texture.width(), texture.height()), (0, 0));
}

#[test]
fn undecodable_file_leaves_texture_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.png");
    std::fs::write(&path, b"not a png at all").unwrap();

    let mut texture = Texture::new();
    assert!(texture.load_from_file(&path).is_err());
    assert_eq!((texture.width(), texture.height()), (0, 0));
}

#[test]
fn reload_replaces_previous_image() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_png(dir.path(), "first.png", 5, 3, Color::RED);
    let second = write_png(dir.path(), "second.png", 2, 7, Color::BLUE);

    let mut texture = Texture::new();
    texture.load_from_file(&first).unwrap();
    texture.load_from_file(&second).unwrap();
    assert_eq!((texture.width(), texture.height()), (2, 7));
}

#[test]
fn failed_reload_releases_the_old_image() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_png(dir.path(), "good.png", 4, 4, Color::GREEN);

    let mut texture = Texture::new();
    texture.load_from_file(&good).unwrap();
    assert!(texture.load_from_file(Path::new("/nonexistent.png")).is_err());
    // The old pixels were freed before the load attempt; no stale handle.
    assert!(!texture.is_loaded());
    assert_eq!((texture.width(), texture.height()), (0, 0));
}

#[test]
fn color_key_makes_cyan_transparent() {
    let dir = tempfile::tempdir().unwrap();
    let mut img = image::RgbaImage::from_pixel(2, 1, image::Rgba([255, 0, 0, 255]));
    img.put_pixel(1, 0, image::Rgba([0, 255, 255, 255])); // the key color
    let path = dir.path().join("keyed.png");
    img.save(&path).unwrap();

    let mut texture = Texture::new();
    texture.load_from_file(&path).unwrap();

    let mut canvas = Canvas::new(2, 1);
    canvas.clear(Color::BLUE);
    texture.render(&mut canvas, 0.0, 0.0);

    assert_eq!(canvas.pixel(0, 0), Some(Color::RED), "opaque pixel drawn");
    let keyed = canvas.pixel(1, 0).unwrap();
    assert_eq!((keyed.r, keyed.g, keyed.b), (0, 0, 255), "keyed pixel shows background");
}

#[test]
fn color_key_not_applied_to_external_data() {
    let data = TextureData {
        width: 1,
        height: 1,
        pixels: vec![0, 255, 255, 255], // cyan, but from decoded data
    };
    let texture = Texture::from_data(data);

    let mut canvas = Canvas::new(1, 1);
    texture.render(&mut canvas, 0.0, 0.0);
    assert_eq!(canvas.pixel(0, 0), Some(Color::rgb(0, 255, 255)));
}

#[test]
fn failed_text_load_frees_previous_pixels() {
    let mut texture = Texture::from_data(TextureData {
        width: 1,
        height: 1,
        pixels: vec![255, 255, 255, 255],
    });

    // No fonts loaded, so rasterization must fail; the replace contract
    // still released the old image first.
    let mut fonts = FontBook::new();
    let result = texture.load_from_rendered_text(&mut fonts, "hi", None, 14.0, Color::WHITE);
    assert!(result.is_err());
    assert!(!texture.is_loaded());
}
