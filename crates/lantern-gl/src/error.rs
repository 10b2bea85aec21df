use std::fmt;

use thiserror::Error;

/// Shader stage a compile error originates from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// GL shader type enum (`GL_VERTEX_SHADER` / `GL_FRAGMENT_SHADER`).
    #[inline]
    pub const fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors raised while creating or rebuilding renderer resources.
///
/// Per-frame rendering never fails; driver faults during a frame are not
/// observable through this type.
#[derive(Debug, Error)]
pub enum RendererError {
    /// The configured GLSL version string contains no digits.
    #[error("invalid GLSL version string {0:?}: expected a version number")]
    InvalidGlslVersion(String),

    /// Driver rejected a shader. `log` is the driver info log, verbatim.
    #[error("failed to compile {stage} shader:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    /// Driver rejected the program. `log` is the driver info log, verbatim.
    #[error("failed to link shader program:\n{log}")]
    ProgramLink { log: String },

    /// Driver refused to create an object.
    #[error("failed to create {what}: {reason}")]
    ResourceCreation { what: &'static str, reason: String },
}

impl RendererError {
    pub(crate) fn resource(what: &'static str, reason: impl Into<String>) -> Self {
        RendererError::ResourceCreation {
            what,
            reason: reason.into(),
        }
    }
}
