use crate::coords::Vec2;

/// Per-frame mapping from virtual display space to the framebuffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DisplayGeometry {
    /// Top-left corner of the display rectangle. `(0, 0)` unless multi-viewport.
    pub display_pos: Vec2,
    pub display_size: Vec2,
    /// `(1, 1)` on regular displays, typically `(2, 2)` on high-density ones.
    pub framebuffer_scale: Vec2,
}

impl DisplayGeometry {
    #[inline]
    pub const fn new(display_pos: Vec2, display_size: Vec2, framebuffer_scale: Vec2) -> Self {
        Self {
            display_pos,
            display_size,
            framebuffer_scale,
        }
    }

    /// Framebuffer dimensions in pixels, truncated toward zero.
    #[inline]
    pub fn framebuffer_size(&self) -> (i32, i32) {
        let fb = self.display_size.scale(self.framebuffer_scale);
        (fb.x as i32, fb.y as i32)
    }

    /// False for minimized windows and other degenerate surfaces.
    #[inline]
    pub fn has_area(&self) -> bool {
        let (w, h) = self.framebuffer_size();
        w > 0 && h > 0
    }
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self::new(Vec2::default(), Vec2::default(), Vec2::splat(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framebuffer_size_scales_and_truncates() {
        let g = DisplayGeometry::new(Vec2::default(), Vec2::new(640.5, 480.0), Vec2::splat(2.0));
        assert_eq!(g.framebuffer_size(), (1281, 960));
    }

    #[test]
    fn minimized_window_has_no_area() {
        let g = DisplayGeometry::new(Vec2::default(), Vec2::new(800.0, 0.0), Vec2::splat(1.0));
        assert!(!g.has_area());

        let tiny = DisplayGeometry::new(Vec2::default(), Vec2::new(0.4, 0.4), Vec2::splat(2.0));
        assert!(!tiny.has_area());
    }
}
