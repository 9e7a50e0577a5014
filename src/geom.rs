//! Small geometry and color value types shared across the crate.

/// A 2D point in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Half-open containment test over `[x, x+w) × [y, y+h)`.
    ///
    /// A point exactly on the left or top edge is inside; a point exactly
    /// on the right or bottom edge is outside. Hover hit-testing depends on
    /// this asymmetry so adjacent buttons never both claim the shared edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10.0, 20.0, 320.0, 240.0);
        assert!(r.contains(Point::new(10.0, 20.0)), "top-left edge is inside");
        assert!(r.contains(Point::new(329.0, 259.0)));
        assert!(!r.contains(Point::new(330.0, 20.0)), "right edge is outside");
        assert!(!r.contains(Point::new(10.0, 260.0)), "bottom edge is outside");
        assert!(!r.contains(Point::new(9.0, 20.0)));
        assert!(!r.contains(Point::new(10.0, 19.0)));
    }

    #[test]
    fn contains_interior_point() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert!(r.contains(Point::new(1.5, 1.5)));
        assert!(!r.contains(Point::new(2.0, 1.0)));
    }
}
