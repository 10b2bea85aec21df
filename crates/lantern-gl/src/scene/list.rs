use super::{DisplayGeometry, DrawCommand, DrawIdx, DrawVert};

/// Vertex/index data shared by a run of draw commands.
///
/// Bytes are uploaded verbatim; the layout is [`DrawVert`] / [`DrawIdx`].
#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch<'a> {
    pub vertices: &'a [u8],
    pub indices: &'a [u8],
    pub commands: Vec<DrawCommand>,
}

impl<'a> DrawBatch<'a> {
    #[inline]
    pub fn new(vertices: &'a [u8], indices: &'a [u8], commands: Vec<DrawCommand>) -> Self {
        Self {
            vertices,
            indices,
            commands,
        }
    }

    /// Builds a batch from typed buffers.
    pub fn from_typed(
        vertices: &'a [DrawVert],
        indices: &'a [DrawIdx],
        commands: Vec<DrawCommand>,
    ) -> Self {
        Self::new(
            bytemuck::cast_slice(vertices),
            bytemuck::cast_slice(indices),
            commands,
        )
    }
}

/// One frame of GUI output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawFrame<'a> {
    pub geometry: DisplayGeometry,
    pub batches: Vec<DrawBatch<'a>>,
}

impl<'a> DrawFrame<'a> {
    #[inline]
    pub fn new(geometry: DisplayGeometry, batches: Vec<DrawBatch<'a>>) -> Self {
        Self { geometry, batches }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ClipRect;
    use crate::scene::TextureId;

    #[test]
    fn typed_batch_exposes_raw_bytes() {
        let verts = [DrawVert::default(); 3];
        let idx: [DrawIdx; 3] = [0, 1, 2];
        let batch = DrawBatch::from_typed(&verts, &idx, Vec::new());

        assert_eq!(batch.vertices.len(), 60);
        assert_eq!(batch.indices, &[0, 0, 1, 0, 2, 0]);
    }

    #[test]
    fn frame_without_batches_is_empty() {
        assert!(DrawFrame::default().is_empty());

        let cmd = DrawCommand::new(ClipRect::new(0.0, 0.0, 1.0, 1.0), TextureId(1), 3, 0);
        let frame = DrawFrame::new(
            DisplayGeometry::default(),
            vec![DrawBatch::new(&[], &[], vec![cmd])],
        );
        assert!(!frame.is_empty());
    }
}
