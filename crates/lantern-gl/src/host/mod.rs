//! GUI-host contract.
//!
//! The renderer never talks to the GUI library directly. Everything it needs
//! from the host at init time, and everything it reports back, goes through
//! [`GuiHost`]. Secondary platform windows are rendered through
//! [`ViewportRenderer`].

#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "imgui")]
mod imgui_adapter;

#[cfg(feature = "imgui")]
pub use imgui_adapter::{ImguiHost, ImguiViewportBackend, SharedRenderer};

use bitflags::bitflags;

use crate::gl::GlApi;
use crate::render::RenderStats;
use crate::scene::{DrawFrame, TextureId};

bitflags! {
    /// Renderer capabilities advertised to the GUI library.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct BackendFlags: u32 {
        /// Draw commands may carry a non-zero vertex offset.
        const RENDERER_HAS_VTX_OFFSET = 1 << 3;
        /// The renderer can draw secondary platform windows.
        const RENDERER_HAS_VIEWPORTS = 1 << 12;
    }
}

bitflags! {
    /// Per-viewport flags relevant to rendering.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct ViewportFlags: u32 {
        /// The platform window already cleared its framebuffer.
        const NO_RENDERER_CLEAR = 1 << 7;
    }
}

/// RGBA32 font atlas pixels, row-major, tightly packed.
#[derive(Debug, Copy, Clone)]
pub struct FontAtlasImage<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

/// A secondary platform window.
///
/// `id` is assigned by the host and only used for diagnostics.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub id: u32,
    pub flags: ViewportFlags,
}

/// Host side of the renderer contract.
pub trait GuiHost {
    fn set_backend_renderer_name(&mut self, name: &str);
    fn add_backend_flags(&mut self, flags: BackendFlags);

    /// True when the host renders additional OS windows.
    fn viewports_enabled(&self) -> bool;

    /// Builds (if needed) and returns the font atlas pixels.
    fn font_atlas_rgba32(&mut self) -> FontAtlasImage<'_>;

    /// Records the texture the host must reference for font glyphs.
    fn set_font_texture(&mut self, id: TextureId);

    /// Registers the renderer as the per-viewport render hook.
    fn install_viewport_renderer(&mut self) {}

    /// Tears down secondary platform windows and their render hook.
    fn destroy_platform_windows(&mut self) {}
}

/// Renders one secondary viewport into its own (current) framebuffer.
pub trait ViewportRenderer {
    fn render_viewport<G: GlApi + ?Sized>(
        &mut self,
        gl: &G,
        viewport: &Viewport,
        frame: &DrawFrame<'_>,
    ) -> RenderStats;
}
