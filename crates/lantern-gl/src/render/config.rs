use super::shaders::DEFAULT_GLSL_VERSION;

/// Renderer construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RendererConfig {
    /// GLSL version string, bare (`"130"`) or as a directive
    /// (`"#version 300 es"`). `None` selects [`DEFAULT_GLSL_VERSION`].
    pub glsl_version: Option<String>,
}

impl RendererConfig {
    pub fn with_glsl_version(version: impl Into<String>) -> Self {
        Self {
            glsl_version: Some(version.into()),
        }
    }

    pub fn glsl_version(&self) -> &str {
        self.glsl_version.as_deref().unwrap_or(DEFAULT_GLSL_VERSION)
    }
}
