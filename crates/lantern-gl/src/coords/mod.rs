//! Coordinate and geometry types shared by the renderer and the host adapter.
//!
//! Two spaces are involved:
//! - virtual display space (GUI coordinates, origin top-left, +Y down)
//! - framebuffer space (physical pixels, origin bottom-left as GL expects)

mod rect;
mod vec2;

pub use rect::{ClipRect, ScissorRect};
pub use vec2::Vec2;
