use std::fmt;

use super::GlApi;

/// Context version as reported by `MAJOR_VERSION` / `MINOR_VERSION`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct GlVersion {
    pub major: i32,
    pub minor: i32,
}

impl GlVersion {
    pub fn read<G: GlApi + ?Sized>(gl: &G) -> Self {
        Self {
            major: gl.get_integer(glow::MAJOR_VERSION),
            minor: gl.get_integer(glow::MINOR_VERSION),
        }
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
