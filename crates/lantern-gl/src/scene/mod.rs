//! Draw stream types.
//!
//! A [`DrawFrame`] is the renderer-side view of one frame of GUI output:
//! display geometry plus a sequence of [`DrawBatch`]es. Every batch borrows its
//! vertex and index bytes from the GUI library; nothing outlives the render call.

mod cmd;
mod geometry;
mod list;
mod vertex;

pub use cmd::{DrawCommand, TextureId};
pub use geometry::DisplayGeometry;
pub use list::{DrawBatch, DrawFrame};
pub use vertex::{DrawIdx, DrawVert, VertexAttribute, INDEX_SIZE, VERTEX_ATTRIBUTES, VERTEX_STRIDE};
