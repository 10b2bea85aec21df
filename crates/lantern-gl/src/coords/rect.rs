use super::Vec2;

/// Clip rectangle as emitted by the GUI library: `min`/`max` corners in
/// virtual display coordinates (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClipRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ClipRect {
    #[inline]
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min: Vec2::new(x0, y0),
            max: Vec2::new(x1, y1),
        }
    }

    /// Moves the rectangle by `-origin` and scales it by `scale`.
    #[inline]
    pub fn to_framebuffer(self, origin: Vec2, scale: Vec2) -> Self {
        Self {
            min: (self.min - origin).scale(scale),
            max: (self.max - origin).scale(scale),
        }
    }
}

impl From<[f32; 4]> for ClipRect {
    #[inline]
    fn from(r: [f32; 4]) -> Self {
        ClipRect::new(r[0], r[1], r[2], r[3])
    }
}

/// Scissor box in framebuffer pixels, bottom-left origin, as passed to `glScissor`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ScissorRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScissorRect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}
