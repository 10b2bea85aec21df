//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and windows, and wires them to the GL context,
//! the GUI context and the renderer. Secondary viewport windows live in
//! `viewports`.

mod runtime;
mod viewports;

pub use runtime::{Runtime, RuntimeConfig};
