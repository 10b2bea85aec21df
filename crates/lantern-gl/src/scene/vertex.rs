use core::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};

/// Vertex record shared with the GUI library.
///
/// The layout is fixed by the producer: position and texcoord as two `f32`
/// each, then a packed RGBA8 color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub col: [u8; 4],
}

/// Index element type (`GL_UNSIGNED_SHORT`).
pub type DrawIdx = u16;

pub const VERTEX_STRIDE: i32 = size_of::<DrawVert>() as i32;
pub const INDEX_SIZE: usize = size_of::<DrawIdx>();

/// One `glVertexAttribPointer` description.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    /// Attribute name in the shader sources.
    pub name: &'static str,
    pub components: i32,
    pub data_type: u32,
    pub normalized: bool,
    pub offset: i32,
}

/// Attribute layout of [`DrawVert`], in shader location order.
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 3] = [
    VertexAttribute {
        name: "Position",
        components: 2,
        data_type: glow::FLOAT,
        normalized: false,
        offset: offset_of!(DrawVert, pos) as i32,
    },
    VertexAttribute {
        name: "UV",
        components: 2,
        data_type: glow::FLOAT,
        normalized: false,
        offset: offset_of!(DrawVert, uv) as i32,
    },
    VertexAttribute {
        name: "Color",
        components: 4,
        data_type: glow::UNSIGNED_BYTE,
        normalized: true,
        offset: offset_of!(DrawVert, col) as i32,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_producer() {
        assert_eq!(VERTEX_STRIDE, 20);
        assert_eq!(INDEX_SIZE, 2);

        let offsets: Vec<i32> = VERTEX_ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 8, 16]);
    }

    #[test]
    fn only_color_is_normalized() {
        let normalized: Vec<&str> = VERTEX_ATTRIBUTES
            .iter()
            .filter(|a| a.normalized)
            .map(|a| a.name)
            .collect();
        assert_eq!(normalized, vec!["Color"]);
    }
}
