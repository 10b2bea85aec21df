use crate::error::RendererError;
use crate::gl::{GlApi, GlVersion};
use crate::host::{BackendFlags, GuiHost, Viewport, ViewportFlags, ViewportRenderer};
use crate::scene::{
    DisplayGeometry, DrawFrame, TextureId, INDEX_SIZE, VERTEX_ATTRIBUTES, VERTEX_STRIDE,
};

use super::clip::project_clip;
use super::config::RendererConfig;
use super::program::ShaderProgram;
use super::projection::ortho_projection;
use super::shaders::{ShaderSources, ShaderVariant};
use super::state::{BindingBackup, GlStateSnapshot};

/// Name reported to the GUI library.
pub const BACKEND_NAME: &str = "lantern-gl";

/// Per-frame diagnostics returned by [`GlRenderer::render`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderStats {
    pub batches: usize,
    pub commands_drawn: usize,
    pub commands_culled: usize,
}

/// GL objects owned by one renderer.
///
/// Names are raw GL names; `0` marks an object that was never created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceObjects {
    pub(crate) shaders: ShaderProgram,
    pub loc_texture: Option<u32>,
    pub loc_proj_mtx: Option<u32>,
    /// Attribute locations in `VERTEX_ATTRIBUTES` order: Position, UV, Color.
    pub attrib_locations: [u32; 3],
    pub vertex_buffer: u32,
    pub index_buffer: u32,
    pub font_texture: u32,
}

impl DeviceObjects {
    pub fn program(&self) -> u32 {
        self.shaders.program
    }

    pub fn vertex_shader(&self) -> u32 {
        self.shaders.vertex
    }

    pub fn fragment_shader(&self) -> u32 {
        self.shaders.fragment
    }

    fn create<G, H>(gl: &G, host: &mut H, glsl_version: &str) -> Result<(Self, ShaderVariant), RendererError>
    where
        G: GlApi + ?Sized,
        H: GuiHost + ?Sized,
    {
        let sources = ShaderSources::for_glsl_version(glsl_version)?;
        log::debug!("shader variant {:?} for GLSL {glsl_version:?}", sources.variant);

        let shaders = ShaderProgram::build(gl, &sources)?;
        let mut objects = DeviceObjects {
            shaders,
            ..DeviceObjects::default()
        };

        if let Err(err) = objects.create_resources(gl, host) {
            objects.destroy(gl);
            return Err(err);
        }

        Ok((objects, sources.variant))
    }

    fn create_resources<G, H>(&mut self, gl: &G, host: &mut H) -> Result<(), RendererError>
    where
        G: GlApi + ?Sized,
        H: GuiHost + ?Sized,
    {
        let program = self.shaders.program;

        self.loc_texture = gl.uniform_location(program, "Texture");
        self.loc_proj_mtx = gl.uniform_location(program, "ProjMtx");
        for (slot, attr) in self.attrib_locations.iter_mut().zip(VERTEX_ATTRIBUTES.iter()) {
            *slot = gl.attrib_location(program, attr.name).ok_or_else(|| {
                RendererError::resource("vertex attribute", format!("`{}` is not active", attr.name))
            })?;
        }

        self.vertex_buffer = gl
            .create_buffer()
            .map_err(|reason| RendererError::resource("vertex buffer", reason))?;
        self.index_buffer = gl
            .create_buffer()
            .map_err(|reason| RendererError::resource("index buffer", reason))?;

        self.font_texture = upload_font_texture(gl, host)?;
        Ok(())
    }

    fn destroy<G: GlApi + ?Sized>(&mut self, gl: &G) {
        if self.vertex_buffer != 0 {
            gl.delete_buffer(self.vertex_buffer);
        }
        if self.index_buffer != 0 {
            gl.delete_buffer(self.index_buffer);
        }
        self.shaders.delete(gl);
        if self.font_texture != 0 {
            gl.delete_texture(self.font_texture);
        }
        *self = DeviceObjects::default();
    }
}

fn upload_font_texture<G, H>(gl: &G, host: &mut H) -> Result<u32, RendererError>
where
    G: GlApi + ?Sized,
    H: GuiHost + ?Sized,
{
    let atlas = host.font_atlas_rgba32();
    let (width, height) = (atlas.width as i32, atlas.height as i32);

    let texture = gl
        .create_texture()
        .map_err(|reason| RendererError::resource("font texture", reason))?;

    gl.bind_texture(glow::TEXTURE_2D, texture);
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
    gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
    gl.tex_image_2d_rgba8(width, height, atlas.pixels);

    host.set_font_texture(TextureId(texture));
    log::debug!("font atlas {width}x{height} uploaded as texture {texture}");

    Ok(texture)
}

/// OpenGL ES renderer for GUI draw data.
///
/// Created with [`init`](Self::init) once the context is current, released
/// with [`dispose`](Self::dispose) before the context goes away. Must only be
/// used with the context it was created on.
#[derive(Debug)]
pub struct GlRenderer {
    objects: DeviceObjects,
    gl_version: GlVersion,
    variant: ShaderVariant,
    viewport_hook: bool,
    vtx_offset_warned: bool,
    disposed: bool,
}

impl GlRenderer {
    /// Creates the program, buffers and font texture and registers the
    /// backend with `host`.
    ///
    /// Texture, array-buffer and vertex-array bindings are left as found. On
    /// error nothing created here survives.
    pub fn init<G, H>(gl: &G, host: &mut H, config: &RendererConfig) -> Result<Self, RendererError>
    where
        G: GlApi + ?Sized,
        H: GuiHost + ?Sized,
    {
        let gl_version = GlVersion::read(gl);
        log::debug!("GL context version {gl_version}");

        host.set_backend_renderer_name(BACKEND_NAME);
        host.add_backend_flags(BackendFlags::RENDERER_HAS_VIEWPORTS);

        let bindings = BindingBackup::capture(gl);
        let created = DeviceObjects::create(gl, host, config.glsl_version());
        bindings.restore(gl);
        let (objects, variant) = created?;

        let viewport_hook = host.viewports_enabled();
        if viewport_hook {
            host.install_viewport_renderer();
        }

        log::info!(
            "{BACKEND_NAME} initialized (GL {gl_version}, {variant:?} shaders, viewports: {viewport_hook})"
        );

        Ok(Self {
            objects,
            gl_version,
            variant,
            viewport_hook,
            vtx_offset_warned: false,
            disposed: false,
        })
    }

    #[inline]
    pub fn device_objects(&self) -> &DeviceObjects {
        &self.objects
    }

    #[inline]
    pub fn font_texture(&self) -> TextureId {
        TextureId(self.objects.font_texture)
    }

    #[inline]
    pub fn gl_version(&self) -> GlVersion {
        self.gl_version
    }

    #[inline]
    pub fn shader_variant(&self) -> ShaderVariant {
        self.variant
    }

    #[inline]
    pub fn has_viewport_hook(&self) -> bool {
        self.viewport_hook
    }

    /// Rebuilds the font atlas texture from the host's current atlas.
    ///
    /// The previous texture is deleted first; exactly one font texture exists
    /// afterwards and the host references it. If the new texture cannot be
    /// created the host is pointed at texture 0 instead of the deleted name.
    pub fn update_fonts_texture<G, H>(&mut self, gl: &G, host: &mut H) -> Result<TextureId, RendererError>
    where
        G: GlApi + ?Sized,
        H: GuiHost + ?Sized,
    {
        let old = self.objects.font_texture;
        let mut last_texture = gl.get_integer(glow::TEXTURE_BINDING_2D) as u32;
        if last_texture == old {
            last_texture = 0;
        }

        if old != 0 {
            gl.delete_texture(old);
            self.objects.font_texture = 0;
        }

        let uploaded = upload_font_texture(gl, host);
        gl.bind_texture(glow::TEXTURE_2D, last_texture);

        match uploaded {
            Ok(texture) => {
                self.objects.font_texture = texture;
                Ok(self.font_texture())
            }
            Err(err) => {
                log::error!("font atlas rebuild failed: {err}");
                host.set_font_texture(TextureId(0));
                Err(err)
            }
        }
    }

    /// Draws one frame into the current framebuffer.
    ///
    /// Frames without batches or with an empty framebuffer issue no GL calls.
    /// Otherwise all state touched here is restored before returning.
    pub fn render<G: GlApi + ?Sized>(&mut self, gl: &G, frame: &DrawFrame<'_>) -> RenderStats {
        let mut stats = RenderStats::default();

        if frame.is_empty() || !frame.geometry.has_area() {
            return stats;
        }
        let (fb_width, fb_height) = frame.geometry.framebuffer_size();

        let saved = GlStateSnapshot::capture(gl);

        let vertex_array = match gl.create_vertex_array() {
            Ok(v) => v,
            Err(reason) => {
                log::error!("failed to create vertex array, frame skipped: {reason}");
                saved.restore(gl);
                return stats;
            }
        };

        self.setup_render_state(gl, &frame.geometry, fb_width, fb_height, vertex_array);

        for batch in &frame.batches {
            stats.batches += 1;

            gl.buffer_data(glow::ARRAY_BUFFER, batch.vertices, glow::STREAM_DRAW);
            gl.buffer_data(glow::ELEMENT_ARRAY_BUFFER, batch.indices, glow::STREAM_DRAW);

            for cmd in &batch.commands {
                if cmd.vtx_offset != 0 && !self.vtx_offset_warned {
                    log::warn!("draw command vertex offsets are not supported; drawing from vertex 0");
                    self.vtx_offset_warned = true;
                }

                let Some(scissor) = project_clip(cmd.clip_rect, &frame.geometry, fb_width, fb_height)
                else {
                    stats.commands_culled += 1;
                    continue;
                };

                gl.scissor(scissor.x, scissor.y, scissor.width, scissor.height);
                gl.bind_texture(glow::TEXTURE_2D, cmd.texture_id.name());
                gl.draw_elements(
                    glow::TRIANGLES,
                    cmd.count as i32,
                    glow::UNSIGNED_SHORT,
                    (cmd.idx_offset * INDEX_SIZE) as i32,
                );
                stats.commands_drawn += 1;
            }
        }

        gl.delete_vertex_array(vertex_array);
        saved.restore(gl);

        log::trace!(
            "frame: {} batches, {} drawn, {} culled",
            stats.batches,
            stats.commands_drawn,
            stats.commands_culled
        );
        stats
    }

    fn setup_render_state<G: GlApi + ?Sized>(
        &self,
        gl: &G,
        geometry: &DisplayGeometry,
        fb_width: i32,
        fb_height: i32,
        vertex_array: u32,
    ) {
        gl.enable(glow::BLEND);
        gl.blend_equation_separate(glow::FUNC_ADD, glow::FUNC_ADD);
        gl.blend_func_separate(
            glow::SRC_ALPHA,
            glow::ONE_MINUS_SRC_ALPHA,
            glow::SRC_ALPHA,
            glow::ONE_MINUS_SRC_ALPHA,
        );
        gl.disable(glow::CULL_FACE);
        gl.disable(glow::DEPTH_TEST);
        gl.enable(glow::SCISSOR_TEST);

        gl.viewport(0, 0, fb_width, fb_height);

        gl.use_program(self.objects.program());
        gl.uniform_1_i32(self.objects.loc_texture, 0);
        gl.uniform_matrix_4_f32(self.objects.loc_proj_mtx, &ortho_projection(geometry));

        gl.bind_vertex_array(vertex_array);
        gl.bind_buffer(glow::ARRAY_BUFFER, self.objects.vertex_buffer);
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.objects.index_buffer);

        for (&location, attr) in self.objects.attrib_locations.iter().zip(VERTEX_ATTRIBUTES.iter()) {
            gl.enable_vertex_attrib_array(location);
            gl.vertex_attrib_pointer(
                location,
                attr.components,
                attr.data_type,
                attr.normalized,
                VERTEX_STRIDE,
                attr.offset,
            );
        }
    }

    /// Releases every GL object and, if installed, the viewport hook.
    pub fn dispose<G, H>(mut self, gl: &G, host: &mut H)
    where
        G: GlApi + ?Sized,
        H: GuiHost + ?Sized,
    {
        self.objects.destroy(gl);
        if self.viewport_hook {
            host.destroy_platform_windows();
            self.viewport_hook = false;
        }
        self.disposed = true;
        log::debug!("{BACKEND_NAME} disposed");
    }
}

impl ViewportRenderer for GlRenderer {
    fn render_viewport<G: GlApi + ?Sized>(
        &mut self,
        gl: &G,
        viewport: &Viewport,
        frame: &DrawFrame<'_>,
    ) -> RenderStats {
        if !viewport.flags.contains(ViewportFlags::NO_RENDERER_CLEAR) {
            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
        }
        self.render(gl, frame)
    }
}

impl Drop for GlRenderer {
    fn drop(&mut self) {
        if !self.disposed {
            log::warn!("{BACKEND_NAME} dropped without dispose(); GL objects leaked");
        }
    }
}
