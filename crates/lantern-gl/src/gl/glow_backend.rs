//! [`GlApi`] for a native `glow` context.

use std::num::NonZeroU32;

use glow::HasContext;

use super::GlApi;

#[inline]
fn shader(name: u32) -> Option<glow::NativeShader> {
    NonZeroU32::new(name).map(glow::NativeShader)
}

#[inline]
fn program(name: u32) -> Option<glow::NativeProgram> {
    NonZeroU32::new(name).map(glow::NativeProgram)
}

#[inline]
fn buffer(name: u32) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(name).map(glow::NativeBuffer)
}

#[inline]
fn texture(name: u32) -> Option<glow::NativeTexture> {
    NonZeroU32::new(name).map(glow::NativeTexture)
}

#[inline]
fn vertex_array(name: u32) -> Option<glow::NativeVertexArray> {
    NonZeroU32::new(name).map(glow::NativeVertexArray)
}

#[inline]
fn uniform(location: Option<u32>) -> Option<glow::NativeUniformLocation> {
    location.map(glow::NativeUniformLocation)
}

// Every call below forwards to the driver. The caller guarantees that this
// context is current on the calling thread (see `GlApi`), which is the only
// precondition `glow` places on these entry points.
impl GlApi for glow::Context {
    fn get_integer(&self, pname: u32) -> i32 {
        unsafe { self.get_parameter_i32(pname) }
    }

    fn get_integer4(&self, pname: u32) -> [i32; 4] {
        let mut out = [0; 4];
        unsafe { self.get_parameter_i32_slice(pname, &mut out) };
        out
    }

    fn is_enabled(&self, cap: u32) -> bool {
        unsafe { HasContext::is_enabled(self, cap) }
    }

    fn enable(&self, cap: u32) {
        unsafe { HasContext::enable(self, cap) }
    }

    fn disable(&self, cap: u32) {
        unsafe { HasContext::disable(self, cap) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { HasContext::active_texture(self, unit) }
    }

    fn blend_equation_separate(&self, mode_rgb: u32, mode_alpha: u32) {
        unsafe { HasContext::blend_equation_separate(self, mode_rgb, mode_alpha) }
    }

    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        unsafe { HasContext::blend_func_separate(self, src_rgb, dst_rgb, src_alpha, dst_alpha) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn scissor(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::scissor(self, x, y, width, height) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { HasContext::clear_color(self, r, g, b, a) }
    }

    fn clear(&self, mask: u32) {
        unsafe { HasContext::clear(self, mask) }
    }

    fn pixel_store_i32(&self, pname: u32, value: i32) {
        unsafe { HasContext::pixel_store_i32(self, pname, value) }
    }

    fn use_program(&self, name: u32) {
        unsafe { HasContext::use_program(self, program(name)) }
    }

    fn bind_texture(&self, target: u32, name: u32) {
        unsafe { HasContext::bind_texture(self, target, texture(name)) }
    }

    fn bind_buffer(&self, target: u32, name: u32) {
        unsafe { HasContext::bind_buffer(self, target, buffer(name)) }
    }

    fn bind_vertex_array(&self, name: u32) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array(name)) }
    }

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        unsafe { HasContext::create_shader(self, shader_type) }.map(|s| s.0.get())
    }

    fn shader_source(&self, name: u32, source: &str) {
        if let Some(s) = shader(name) {
            unsafe { HasContext::shader_source(self, s, source) }
        }
    }

    fn compile_shader(&self, name: u32) {
        if let Some(s) = shader(name) {
            unsafe { HasContext::compile_shader(self, s) }
        }
    }

    fn shader_compile_status(&self, name: u32) -> bool {
        shader(name).is_some_and(|s| unsafe { self.get_shader_compile_status(s) })
    }

    fn shader_info_log(&self, name: u32) -> String {
        shader(name)
            .map(|s| unsafe { self.get_shader_info_log(s) })
            .unwrap_or_default()
    }

    fn delete_shader(&self, name: u32) {
        if let Some(s) = shader(name) {
            unsafe { HasContext::delete_shader(self, s) }
        }
    }

    fn create_program(&self) -> Result<u32, String> {
        unsafe { HasContext::create_program(self) }.map(|p| p.0.get())
    }

    fn attach_shader(&self, prog: u32, sh: u32) {
        if let (Some(p), Some(s)) = (program(prog), shader(sh)) {
            unsafe { HasContext::attach_shader(self, p, s) }
        }
    }

    fn detach_shader(&self, prog: u32, sh: u32) {
        if let (Some(p), Some(s)) = (program(prog), shader(sh)) {
            unsafe { HasContext::detach_shader(self, p, s) }
        }
    }

    fn link_program(&self, name: u32) {
        if let Some(p) = program(name) {
            unsafe { HasContext::link_program(self, p) }
        }
    }

    fn program_link_status(&self, name: u32) -> bool {
        program(name).is_some_and(|p| unsafe { self.get_program_link_status(p) })
    }

    fn program_info_log(&self, name: u32) -> String {
        program(name)
            .map(|p| unsafe { self.get_program_info_log(p) })
            .unwrap_or_default()
    }

    fn delete_program(&self, name: u32) {
        if let Some(p) = program(name) {
            unsafe { HasContext::delete_program(self, p) }
        }
    }

    fn uniform_location(&self, prog: u32, name: &str) -> Option<u32> {
        let p = program(prog)?;
        unsafe { self.get_uniform_location(p, name) }.map(|l| l.0)
    }

    fn attrib_location(&self, prog: u32, name: &str) -> Option<u32> {
        let p = program(prog)?;
        unsafe { self.get_attrib_location(p, name) }
    }

    fn uniform_1_i32(&self, location: Option<u32>, value: i32) {
        let loc = uniform(location);
        unsafe { HasContext::uniform_1_i32(self, loc.as_ref(), value) }
    }

    fn uniform_matrix_4_f32(&self, location: Option<u32>, value: &[f32; 16]) {
        let loc = uniform(location);
        unsafe { self.uniform_matrix_4_f32_slice(loc.as_ref(), false, value) }
    }

    fn create_buffer(&self) -> Result<u32, String> {
        unsafe { HasContext::create_buffer(self) }.map(|b| b.0.get())
    }

    fn delete_buffer(&self, name: u32) {
        if let Some(b) = buffer(name) {
            unsafe { HasContext::delete_buffer(self, b) }
        }
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { self.buffer_data_u8_slice(target, data, usage) }
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        unsafe { HasContext::create_vertex_array(self) }.map(|v| v.0.get())
    }

    fn delete_vertex_array(&self, name: u32) {
        if let Some(v) = vertex_array(name) {
            unsafe { HasContext::delete_vertex_array(self, v) }
        }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe { self.vertex_attrib_pointer_f32(index, size, data_type, normalized, stride, offset) }
    }

    fn create_texture(&self) -> Result<u32, String> {
        unsafe { HasContext::create_texture(self) }.map(|t| t.0.get())
    }

    fn delete_texture(&self, name: u32) {
        if let Some(t) = texture(name) {
            unsafe { HasContext::delete_texture(self, t) }
        }
    }

    fn tex_parameter_i32(&self, target: u32, pname: u32, value: i32) {
        unsafe { HasContext::tex_parameter_i32(self, target, pname, value) }
    }

    fn tex_image_2d_rgba8(&self, width: i32, height: i32, pixels: &[u8]) {
        unsafe {
            self.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            )
        }
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        unsafe { HasContext::draw_elements(self, mode, count, element_type, offset) }
    }
}
