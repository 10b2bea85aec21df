//! `imgui` crate adapter: host contract, draw data conversion and the
//! per-viewport render hook.

use core::ffi::c_void;
use core::ptr;
use std::cell::RefCell;
use std::rc::Rc;

use imgui::{ConfigFlags, DrawCmd, DrawCmdParams};

use super::{BackendFlags, FontAtlasImage, GuiHost, Viewport, ViewportFlags, ViewportRenderer};
use crate::coords::{ClipRect, Vec2};
use crate::gl::GlApi;
use crate::render::{GlRenderer, RenderStats};
use crate::scene::{
    DisplayGeometry, DrawBatch, DrawCommand, DrawFrame, DrawIdx, DrawVert, TextureId,
};

const _: () = assert!(size_of::<imgui::DrawVert>() == size_of::<DrawVert>());
const _: () = assert!(size_of::<imgui::DrawIdx>() == size_of::<DrawIdx>());

/// Renderer slot shared between the frame driver and the viewport hook.
///
/// Empty before `init` completes and after `dispose` takes the renderer out.
pub type SharedRenderer = Rc<RefCell<Option<GlRenderer>>>;

type BackendInstaller = Box<dyn FnOnce(&mut imgui::Context)>;

/// [`GuiHost`] over a borrowed `imgui::Context`.
///
/// Viewports count as enabled when the context has
/// `ConfigFlags::VIEWPORTS_ENABLE`. Installing the render hook needs a backend
/// supplied through [`with_viewport_backend`](Self::with_viewport_backend).
pub struct ImguiHost<'a> {
    ctx: &'a mut imgui::Context,
    installer: Option<BackendInstaller>,
}

impl<'a> ImguiHost<'a> {
    pub fn new(ctx: &'a mut imgui::Context) -> Self {
        Self {
            ctx,
            installer: None,
        }
    }

    /// Host that registers `backend` as imgui's renderer viewport backend when
    /// the renderer asks for the hook.
    pub fn with_viewport_backend<B>(ctx: &'a mut imgui::Context, backend: B) -> Self
    where
        B: imgui::RendererViewportBackend + 'static,
    {
        Self {
            ctx,
            installer: Some(Box::new(move |ctx: &mut imgui::Context| {
                ctx.set_renderer_backend(backend)
            })),
        }
    }
}

impl GuiHost for ImguiHost<'_> {
    fn set_backend_renderer_name(&mut self, name: &str) {
        self.ctx.set_renderer_name(Some(name.to_string()));
    }

    fn add_backend_flags(&mut self, flags: BackendFlags) {
        let io = self.ctx.io_mut();
        if flags.contains(BackendFlags::RENDERER_HAS_VTX_OFFSET) {
            io.backend_flags.insert(imgui::BackendFlags::RENDERER_HAS_VTX_OFFSET);
        }
        if flags.contains(BackendFlags::RENDERER_HAS_VIEWPORTS) {
            io.backend_flags.insert(imgui::BackendFlags::RENDERER_HAS_VIEWPORTS);
        }
    }

    fn viewports_enabled(&self) -> bool {
        self.ctx.io().config_flags.contains(ConfigFlags::VIEWPORTS_ENABLE)
    }

    fn font_atlas_rgba32(&mut self) -> FontAtlasImage<'_> {
        let tex = self.ctx.fonts().build_rgba32_texture();
        FontAtlasImage {
            width: tex.width,
            height: tex.height,
            pixels: tex.data,
        }
    }

    fn set_font_texture(&mut self, id: TextureId) {
        self.ctx.fonts().tex_id = imgui::TextureId::new(id.name() as usize);
    }

    fn install_viewport_renderer(&mut self) {
        match self.installer.take() {
            Some(install) => install(&mut *self.ctx),
            None => log::warn!("imgui viewports enabled without a viewport backend; secondary windows stay blank"),
        }
    }

    fn destroy_platform_windows(&mut self) {
        // SAFETY: imgui-rs allows a single live context, which is the one
        // borrowed here, so it is the current context.
        unsafe { imgui::sys::igDestroyPlatformWindows() };
    }
}

/// imgui renderer viewport backend drawing secondary windows with the
/// shared [`GlRenderer`].
///
/// The platform backend makes each window's surface current before
/// `render_window` and presents it afterwards.
pub struct ImguiViewportBackend<G: GlApi + 'static> {
    gl: Rc<G>,
    renderer: SharedRenderer,
    next_id: usize,
}

impl<G: GlApi + 'static> ImguiViewportBackend<G> {
    pub fn new(gl: Rc<G>, renderer: SharedRenderer) -> Self {
        Self {
            gl,
            renderer,
            next_id: 0,
        }
    }

    fn draw(&mut self, viewport: &Viewport, draw_data: &imgui::DrawData) -> Option<RenderStats> {
        let Ok(mut slot) = self.renderer.try_borrow_mut() else {
            log::warn!("viewport {} skipped: renderer already borrowed", viewport.id);
            return None;
        };
        let renderer = slot.as_mut()?;
        Some(renderer.render_viewport(&*self.gl, viewport, &DrawFrame::from_imgui(draw_data)))
    }
}

fn viewport_flags(flags: imgui::ViewportFlags) -> ViewportFlags {
    if flags.contains(imgui::ViewportFlags::NO_RENDERER_CLEAR) {
        ViewportFlags::NO_RENDERER_CLEAR
    } else {
        ViewportFlags::empty()
    }
}

impl<G: GlApi + 'static> imgui::RendererViewportBackend for ImguiViewportBackend<G> {
    fn create_window(&mut self, viewport: &mut imgui::Viewport) {
        self.next_id += 1;
        viewport.renderer_user_data = ptr::without_provenance_mut::<c_void>(self.next_id);
    }

    fn destroy_window(&mut self, viewport: &mut imgui::Viewport) {
        viewport.renderer_user_data = ptr::null_mut();
    }

    fn set_window_size(&mut self, _viewport: &mut imgui::Viewport, _size: [f32; 2]) {}

    fn render_window(&mut self, viewport: &mut imgui::Viewport) {
        let target = Viewport {
            id: viewport.renderer_user_data.addr() as u32,
            flags: viewport_flags(viewport.flags),
        };
        if let Some(stats) = self.draw(&target, viewport.draw_data()) {
            log::trace!("viewport {}: {} drawn, {} culled", target.id, stats.commands_drawn, stats.commands_culled);
        }
    }

    fn swap_buffers(&mut self, _viewport: &mut imgui::Viewport) {}
}

fn vertex_bytes(vertices: &[imgui::DrawVert]) -> &[u8] {
    // SAFETY: `imgui::DrawVert` is `repr(C)` with the same field layout as
    // `DrawVert` (size checked above) and has no padding.
    unsafe { core::slice::from_raw_parts(vertices.as_ptr().cast::<u8>(), size_of_val(vertices)) }
}

fn convert_command(cmd: DrawCmd) -> Option<DrawCommand> {
    match cmd {
        DrawCmd::Elements {
            count,
            cmd_params:
                DrawCmdParams {
                    clip_rect,
                    texture_id,
                    vtx_offset,
                    idx_offset,
                },
        } => Some(DrawCommand {
            clip_rect: ClipRect::from(clip_rect),
            texture_id: TextureId(texture_id.id() as u32),
            count,
            idx_offset,
            vtx_offset,
        }),
        DrawCmd::ResetRenderState => {
            log::trace!("imgui: ResetRenderState ignored");
            None
        }
        DrawCmd::RawCallback { .. } => {
            log::trace!("imgui: raw callback skipped");
            None
        }
    }
}

impl<'a> DrawFrame<'a> {
    /// Borrows a finished `imgui::DrawData` as a renderer frame.
    pub fn from_imgui(draw_data: &'a imgui::DrawData) -> Self {
        let geometry = DisplayGeometry::new(
            Vec2::from(draw_data.display_pos),
            Vec2::from(draw_data.display_size),
            Vec2::from(draw_data.framebuffer_scale),
        );

        let batches = draw_data
            .draw_lists()
            .map(|list| {
                let commands = list.commands().filter_map(convert_command).collect();
                DrawBatch::new(
                    vertex_bytes(list.vtx_buffer()),
                    bytemuck::cast_slice(list.idx_buffer()),
                    commands,
                )
            })
            .collect();

        DrawFrame::new(geometry, batches)
    }
}
