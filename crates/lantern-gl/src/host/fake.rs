//! Recording [`GuiHost`] for tests.

use super::{BackendFlags, FontAtlasImage, GuiHost};
use crate::scene::TextureId;

#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub renderer_name: Option<String>,
    pub flags: BackendFlags,
    pub viewports: bool,
    pub font_texture: Option<TextureId>,
    pub atlas: (u32, u32, Vec<u8>),
    pub atlas_builds: usize,
    pub hook_installed: bool,
    pub platform_windows_destroyed: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            atlas: (4, 2, vec![0xff; 4 * 2 * 4]),
            ..Self::default()
        }
    }

    pub fn with_viewports() -> Self {
        Self {
            viewports: true,
            ..Self::new()
        }
    }
}

impl GuiHost for FakeHost {
    fn set_backend_renderer_name(&mut self, name: &str) {
        self.renderer_name = Some(name.to_string());
    }

    fn add_backend_flags(&mut self, flags: BackendFlags) {
        self.flags |= flags;
    }

    fn viewports_enabled(&self) -> bool {
        self.viewports
    }

    fn font_atlas_rgba32(&mut self) -> FontAtlasImage<'_> {
        self.atlas_builds += 1;
        FontAtlasImage {
            width: self.atlas.0,
            height: self.atlas.1,
            pixels: &self.atlas.2,
        }
    }

    fn set_font_texture(&mut self, id: TextureId) {
        self.font_texture = Some(id);
    }

    fn install_viewport_renderer(&mut self) {
        self.hook_installed = true;
    }

    fn destroy_platform_windows(&mut self) {
        self.hook_installed = false;
        self.platform_windows_destroyed = true;
    }
}
