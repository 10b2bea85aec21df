//! GL context + surface management.
//!
//! This module is responsible for:
//! - picking a platform display and a GLES 3 config
//! - creating the window surface and making the context current
//! - loading GL entry points into a `glow::Context`
//! - resizing and presenting the surface

mod context;

pub use context::{GlContext, GlContextConfig};
