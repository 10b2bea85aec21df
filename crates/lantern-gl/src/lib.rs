//! Lantern GL crate.
//!
//! OpenGL ES renderer backend for Dear ImGui draw data. The crate owns the GPU
//! resources (program, buffers, font texture) and the per-frame submission
//! protocol; the GUI library and the windowing layer stay outside.

pub mod coords;
pub mod error;
pub mod gl;
pub mod host;
pub mod logging;
pub mod render;
pub mod scene;

pub use error::{RendererError, ShaderStage};
pub use render::{GlRenderer, RenderStats, RendererConfig};
