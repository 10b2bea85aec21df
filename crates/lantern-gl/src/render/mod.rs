//! Renderer backend.
//!
//! [`GlRenderer`] turns a [`DrawFrame`](crate::scene::DrawFrame) into GL draw
//! calls. It owns the program, the vertex/index buffer pair and the font atlas
//! texture; everything else it touches during a frame is captured in a
//! [`GlStateSnapshot`] and put back afterwards.
//!
//! Convention:
//! - draw data arrives in virtual display coordinates (top-left origin)
//! - the vertex shader maps them to NDC through an orthographic `ProjMtx`
//! - scissor boxes are Y-flipped into GL's bottom-left framebuffer space

mod backend;
mod clip;
mod config;
mod program;
mod projection;
mod shaders;
mod state;

pub use backend::{DeviceObjects, GlRenderer, RenderStats, BACKEND_NAME};
pub use clip::project_clip;
pub use config::RendererConfig;
pub use projection::ortho_projection;
pub use shaders::{parse_glsl_version, ShaderSources, ShaderVariant, DEFAULT_GLSL_VERSION};
pub use state::GlStateSnapshot;
