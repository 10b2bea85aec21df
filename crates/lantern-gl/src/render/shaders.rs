//! GLSL source selection.
//!
//! The configured version string picks one of three shader pairs by its first
//! embedded number: below 130 the GLSL 1.20 pair, 410 and above the GLSL ES
//! 3.00 pair with explicit attribute locations, otherwise the GLSL 1.30 pair.

use crate::error::RendererError;

/// Version used when the caller does not configure one.
pub const DEFAULT_GLSL_VERSION: &str = "430";

const LEGACY_VERT: &str = include_str!("shaders/legacy.vert");
const LEGACY_FRAG: &str = include_str!("shaders/legacy.frag");
const MIDDLE_VERT: &str = include_str!("shaders/middle.vert");
const MIDDLE_FRAG: &str = include_str!("shaders/middle.frag");
const CORE_VERT: &str = include_str!("shaders/core.vert");
const CORE_FRAG: &str = include_str!("shaders/core.frag");

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderVariant {
    /// GLSL 1.20 (`attribute` / `varying`, `gl_FragColor`).
    Legacy,
    /// GLSL 1.30 (`in` / `out`).
    Middle,
    /// GLSL ES 3.00 with layout-qualified attributes. Carries its own
    /// `#version` line.
    Core,
}

impl ShaderVariant {
    pub fn for_version(version: u32) -> Self {
        if version < 130 {
            ShaderVariant::Legacy
        } else if version >= 410 {
            ShaderVariant::Core
        } else {
            ShaderVariant::Middle
        }
    }
}

/// Extracts the first run of ASCII digits, e.g. `"#version 300 es"` -> 300.
pub fn parse_glsl_version(glsl_version: &str) -> Result<u32, RendererError> {
    let digits: String = glsl_version
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();

    digits
        .parse()
        .map_err(|_| RendererError::InvalidGlslVersion(glsl_version.to_string()))
}

/// Complete vertex and fragment sources for one version string.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSources {
    pub variant: ShaderVariant,
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn for_glsl_version(glsl_version: &str) -> Result<Self, RendererError> {
        let variant = ShaderVariant::for_version(parse_glsl_version(glsl_version)?);

        let (vertex, fragment) = match variant {
            ShaderVariant::Core => (CORE_VERT.to_string(), CORE_FRAG.to_string()),
            ShaderVariant::Legacy | ShaderVariant::Middle => {
                let directive = version_directive(glsl_version);
                let (vert, frag) = if variant == ShaderVariant::Legacy {
                    (LEGACY_VERT, LEGACY_FRAG)
                } else {
                    (MIDDLE_VERT, MIDDLE_FRAG)
                };
                (format!("{directive}\n{vert}"), format!("{directive}\n{frag}"))
            }
        };

        Ok(Self {
            variant,
            vertex,
            fragment,
        })
    }
}

fn version_directive(glsl_version: &str) -> String {
    let trimmed = glsl_version.trim();
    if trimmed.starts_with("#version") {
        trimmed.to_string()
    } else {
        format!("#version {trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_thresholds() {
        let variant = |s: &str| ShaderSources::for_glsl_version(s).map(|src| src.variant).ok();

        assert_eq!(variant("410"), Some(ShaderVariant::Core));
        assert_eq!(variant("#version 430 core"), Some(ShaderVariant::Core));
        assert_eq!(variant("120"), Some(ShaderVariant::Legacy));
        assert_eq!(variant("#version 300 es"), Some(ShaderVariant::Middle));
        assert_eq!(variant("130"), Some(ShaderVariant::Middle));
        assert_eq!(variant("409"), Some(ShaderVariant::Middle));
    }

    #[test]
    fn version_without_digits_is_rejected() {
        let err = ShaderSources::for_glsl_version("#version core").unwrap_err();
        assert!(matches!(err, RendererError::InvalidGlslVersion(ref s) if s == "#version core"));
        assert!(parse_glsl_version("").is_err());
    }

    #[test]
    fn first_digit_run_wins() {
        assert_eq!(parse_glsl_version("#version 150 core 2").unwrap(), 150);
    }

    #[test]
    fn core_sources_keep_their_own_directive() {
        let src = ShaderSources::for_glsl_version("430").unwrap();
        assert!(src.vertex.starts_with("#version 300 es\n"));
        assert!(src.fragment.starts_with("#version 300 es\n"));
        assert!(src.vertex.contains("layout (location = 0) in vec2 Position;"));
    }

    #[test]
    fn older_sources_are_prefixed_with_configured_version() {
        let bare = ShaderSources::for_glsl_version("120").unwrap();
        assert!(bare.vertex.starts_with("#version 120\nuniform mat4 ProjMtx;"));
        assert!(bare.fragment.contains("gl_FragColor"));

        let full = ShaderSources::for_glsl_version("#version 300 es").unwrap();
        assert!(full.vertex.starts_with("#version 300 es\nuniform mat4 ProjMtx;"));
        assert!(full.fragment.contains("out vec4 Out_Color;"));
    }

    #[test]
    fn default_version_selects_core() {
        let src = ShaderSources::for_glsl_version(DEFAULT_GLSL_VERSION).unwrap();
        assert_eq!(src.variant, ShaderVariant::Core);
    }
}
