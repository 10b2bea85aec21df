//! GL driver surface.
//!
//! The renderer never calls `glow` directly; it goes through [`GlApi`], which
//! mirrors the handful of entry points the backend needs with plain `u32`
//! object names (`0` meaning "none", as in GL itself). `glow::Context`
//! implements it for real drivers.

mod api;
mod glow_backend;
mod version;

#[cfg(test)]
pub(crate) mod fake;

pub use api::GlApi;
pub use version::GlVersion;
