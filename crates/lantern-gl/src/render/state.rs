//! Save/restore of the GL state the renderer modifies.

use crate::gl::GlApi;

/// Caller-visible GL state captured before a frame and restored after it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct GlStateSnapshot {
    pub active_texture: u32,
    pub program: u32,
    /// 2D texture bound on unit 0.
    pub texture: u32,
    pub array_buffer: u32,
    pub vertex_array: u32,
    pub viewport: [i32; 4],
    pub scissor_box: [i32; 4],
    pub blend_src_rgb: u32,
    pub blend_dst_rgb: u32,
    pub blend_src_alpha: u32,
    pub blend_dst_alpha: u32,
    pub blend_equation_rgb: u32,
    pub blend_equation_alpha: u32,
    pub blend: bool,
    pub cull_face: bool,
    pub depth_test: bool,
    pub scissor_test: bool,
}

#[inline]
fn get_u32<G: GlApi + ?Sized>(gl: &G, pname: u32) -> u32 {
    gl.get_integer(pname) as u32
}

impl GlStateSnapshot {
    /// Reads the state. Leaves `TEXTURE0` as the active unit.
    pub fn capture<G: GlApi + ?Sized>(gl: &G) -> Self {
        let active_texture = get_u32(gl, glow::ACTIVE_TEXTURE);
        gl.active_texture(glow::TEXTURE0);

        Self {
            active_texture,
            program: get_u32(gl, glow::CURRENT_PROGRAM),
            texture: get_u32(gl, glow::TEXTURE_BINDING_2D),
            array_buffer: get_u32(gl, glow::ARRAY_BUFFER_BINDING),
            vertex_array: get_u32(gl, glow::VERTEX_ARRAY_BINDING),
            viewport: gl.get_integer4(glow::VIEWPORT),
            scissor_box: gl.get_integer4(glow::SCISSOR_BOX),
            blend_src_rgb: get_u32(gl, glow::BLEND_SRC_RGB),
            blend_dst_rgb: get_u32(gl, glow::BLEND_DST_RGB),
            blend_src_alpha: get_u32(gl, glow::BLEND_SRC_ALPHA),
            blend_dst_alpha: get_u32(gl, glow::BLEND_DST_ALPHA),
            blend_equation_rgb: get_u32(gl, glow::BLEND_EQUATION_RGB),
            blend_equation_alpha: get_u32(gl, glow::BLEND_EQUATION_ALPHA),
            blend: gl.is_enabled(glow::BLEND),
            cull_face: gl.is_enabled(glow::CULL_FACE),
            depth_test: gl.is_enabled(glow::DEPTH_TEST),
            scissor_test: gl.is_enabled(glow::SCISSOR_TEST),
        }
    }

    /// Writes every captured field back, one call each.
    pub fn restore<G: GlApi + ?Sized>(&self, gl: &G) {
        gl.use_program(self.program);
        gl.bind_texture(glow::TEXTURE_2D, self.texture);
        gl.active_texture(self.active_texture);
        gl.bind_vertex_array(self.vertex_array);
        gl.bind_buffer(glow::ARRAY_BUFFER, self.array_buffer);
        gl.blend_equation_separate(self.blend_equation_rgb, self.blend_equation_alpha);
        gl.blend_func_separate(
            self.blend_src_rgb,
            self.blend_dst_rgb,
            self.blend_src_alpha,
            self.blend_dst_alpha,
        );
        set_capability(gl, glow::BLEND, self.blend);
        set_capability(gl, glow::CULL_FACE, self.cull_face);
        set_capability(gl, glow::DEPTH_TEST, self.depth_test);
        set_capability(gl, glow::SCISSOR_TEST, self.scissor_test);
        let [x, y, w, h] = self.viewport;
        gl.viewport(x, y, w, h);
        let [x, y, w, h] = self.scissor_box;
        gl.scissor(x, y, w, h);
    }
}

#[inline]
fn set_capability<G: GlApi + ?Sized>(gl: &G, cap: u32, enabled: bool) {
    if enabled {
        gl.enable(cap);
    } else {
        gl.disable(cap);
    }
}

/// The three bindings touched while creating device objects.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub(crate) struct BindingBackup {
    texture: u32,
    array_buffer: u32,
    vertex_array: u32,
}

impl BindingBackup {
    pub fn capture<G: GlApi + ?Sized>(gl: &G) -> Self {
        Self {
            texture: get_u32(gl, glow::TEXTURE_BINDING_2D),
            array_buffer: get_u32(gl, glow::ARRAY_BUFFER_BINDING),
            vertex_array: get_u32(gl, glow::VERTEX_ARRAY_BINDING),
        }
    }

    pub fn restore<G: GlApi + ?Sized>(&self, gl: &G) {
        gl.bind_texture(glow::TEXTURE_2D, self.texture);
        gl.bind_buffer(glow::ARRAY_BUFFER, self.array_buffer);
        gl.bind_vertex_array(self.vertex_array);
    }
}
