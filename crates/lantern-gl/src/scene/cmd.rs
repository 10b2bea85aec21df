use crate::coords::ClipRect;

/// GL texture name as seen by the GUI library.
///
/// `TextureId(0)` is the GL "no texture" name.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct TextureId(pub u32);

impl TextureId {
    #[inline]
    pub const fn new(name: u32) -> Self {
        Self(name)
    }

    #[inline]
    pub const fn name(self) -> u32 {
        self.0
    }
}

/// One indexed draw inside a [`DrawBatch`](super::DrawBatch).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCommand {
    /// Clip rectangle in virtual display coordinates.
    pub clip_rect: ClipRect,
    pub texture_id: TextureId,
    /// Number of indices to draw.
    pub count: usize,
    /// First index, in elements (not bytes).
    pub idx_offset: usize,
    /// First vertex; only honored by backends declaring vertex-offset support.
    pub vtx_offset: usize,
}

impl DrawCommand {
    #[inline]
    pub fn new(clip_rect: ClipRect, texture_id: TextureId, count: usize, idx_offset: usize) -> Self {
        Self {
            clip_rect,
            texture_id,
            count,
            idx_offset,
            vtx_offset: 0,
        }
    }
}
