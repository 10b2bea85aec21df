/// OpenGL ES 3 entry points used by the renderer.
///
/// Object names are raw GL names; `0` is the null object. Every method must be
/// called on the thread that owns the current context, with that context
/// current. Errors are only observable through the status/info-log queries,
/// exactly as with the driver.
pub trait GlApi {
    // ── queries ───────────────────────────────────────────────────────────

    fn get_integer(&self, pname: u32) -> i32;
    /// Four-component integer query (`VIEWPORT`, `SCISSOR_BOX`).
    fn get_integer4(&self, pname: u32) -> [i32; 4];
    fn is_enabled(&self, cap: u32) -> bool;

    // ── fixed-function state ──────────────────────────────────────────────

    fn enable(&self, cap: u32);
    fn disable(&self, cap: u32);
    fn active_texture(&self, unit: u32);
    fn blend_equation_separate(&self, mode_rgb: u32, mode_alpha: u32);
    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn scissor(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear(&self, mask: u32);
    fn pixel_store_i32(&self, pname: u32, value: i32);

    // ── bindings ──────────────────────────────────────────────────────────

    fn use_program(&self, program: u32);
    fn bind_texture(&self, target: u32, texture: u32);
    fn bind_buffer(&self, target: u32, buffer: u32);
    fn bind_vertex_array(&self, vertex_array: u32);

    // ── shaders & programs ────────────────────────────────────────────────

    fn create_shader(&self, shader_type: u32) -> Result<u32, String>;
    fn shader_source(&self, shader: u32, source: &str);
    fn compile_shader(&self, shader: u32);
    fn shader_compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32) -> String;
    fn delete_shader(&self, shader: u32);

    fn create_program(&self) -> Result<u32, String>;
    fn attach_shader(&self, program: u32, shader: u32);
    fn detach_shader(&self, program: u32, shader: u32);
    fn link_program(&self, program: u32);
    fn program_link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32) -> String;
    fn delete_program(&self, program: u32);

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32>;
    fn attrib_location(&self, program: u32, name: &str) -> Option<u32>;
    fn uniform_1_i32(&self, location: Option<u32>, value: i32);
    /// Column-major 4x4 matrix, not transposed.
    fn uniform_matrix_4_f32(&self, location: Option<u32>, value: &[f32; 16]);

    // ── buffers & vertex arrays ───────────────────────────────────────────

    fn create_buffer(&self) -> Result<u32, String>;
    fn delete_buffer(&self, buffer: u32);
    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);

    fn create_vertex_array(&self) -> Result<u32, String>;
    fn delete_vertex_array(&self, vertex_array: u32);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self) -> Result<u32, String>;
    fn delete_texture(&self, texture: u32);
    fn tex_parameter_i32(&self, target: u32, pname: u32, value: i32);
    /// Uploads level 0 of the bound `TEXTURE_2D` as RGBA / UNSIGNED_BYTE.
    fn tex_image_2d_rgba8(&self, width: i32, height: i32, pixels: &[u8]);

    // ── drawing ───────────────────────────────────────────────────────────

    /// `offset` is a byte offset into the bound element buffer.
    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32);
}
