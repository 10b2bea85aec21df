//! In-memory GL used by the unit tests.
//!
//! Tracks the bits of context state the renderer touches (bindings, blend
//! state, capabilities, live objects) and records every call in order, so
//! tests can assert on both the final state and the exact call sequence.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

use super::GlApi;

pub(crate) const LOC_TEXTURE: u32 = 0;
pub(crate) const LOC_PROJ_MTX: u32 = 1;

/// One recorded driver call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Query(u32),
    Enable(u32),
    Disable(u32),
    ActiveTexture(u32),
    UseProgram(u32),
    BindTexture(u32, u32),
    BindBuffer(u32, u32),
    BindVertexArray(u32),
    BlendEquation(u32, u32),
    BlendFunc(u32, u32, u32, u32),
    Viewport([i32; 4]),
    Scissor([i32; 4]),
    ClearColor([f32; 4]),
    Clear(u32),
    PixelStore(u32, i32),
    CreateShader(u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    Uniform1i(Option<u32>, i32),
    UniformMatrix4(Option<u32>, [f32; 16]),
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BufferData { target: u32, len: usize, usage: u32 },
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    EnableAttrib(u32),
    AttribPointer { index: u32, size: i32, data_type: u32, normalized: bool, stride: i32, offset: i32 },
    CreateTexture(u32),
    DeleteTexture(u32),
    TexParameter(u32, u32, i32),
    TexImage { width: i32, height: i32, len: usize },
    DrawElements { mode: u32, count: i32, element_type: u32, offset: i32 },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeShader {
    pub kind: u32,
    pub source: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeProgram {
    pub attached: Vec<u32>,
    pub linked: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeState {
    pub active_texture: u32,
    pub program: u32,
    /// Texture bound to `TEXTURE_2D`, keyed by unit enum.
    pub texture_units: BTreeMap<u32, u32>,
    pub array_buffer: u32,
    pub element_buffer: u32,
    pub vertex_array: u32,
    pub viewport: [i32; 4],
    pub scissor: [i32; 4],
    pub blend_src_rgb: u32,
    pub blend_dst_rgb: u32,
    pub blend_src_alpha: u32,
    pub blend_dst_alpha: u32,
    pub blend_equation_rgb: u32,
    pub blend_equation_alpha: u32,
    pub caps: BTreeSet<u32>,
    pub unpack_alignment: i32,

    pub shaders: BTreeMap<u32, FakeShader>,
    pub programs: BTreeMap<u32, FakeProgram>,
    pub buffers: BTreeSet<u32>,
    pub textures: BTreeSet<u32>,
    pub vertex_arrays: BTreeSet<u32>,

    pub calls: Vec<Call>,

    /// Shader type whose compilation fails, with the log reported.
    pub fail_compile: Option<(u32, String)>,
    /// Link failure log.
    pub fail_link: Option<String>,
    pub fail_vertex_array: bool,
    pub fail_texture: bool,

    next_name: u32,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            active_texture: glow::TEXTURE0,
            program: 0,
            texture_units: BTreeMap::new(),
            array_buffer: 0,
            element_buffer: 0,
            vertex_array: 0,
            viewport: [0; 4],
            scissor: [0; 4],
            blend_src_rgb: glow::ONE,
            blend_dst_rgb: glow::ZERO,
            blend_src_alpha: glow::ONE,
            blend_dst_alpha: glow::ZERO,
            blend_equation_rgb: glow::FUNC_ADD,
            blend_equation_alpha: glow::FUNC_ADD,
            caps: BTreeSet::new(),
            unpack_alignment: 4,
            shaders: BTreeMap::new(),
            programs: BTreeMap::new(),
            buffers: BTreeSet::new(),
            textures: BTreeSet::new(),
            vertex_arrays: BTreeSet::new(),
            calls: Vec::new(),
            fail_compile: None,
            fail_link: None,
            fail_vertex_array: false,
            fail_texture: false,
            // Leave room below for names tests install as "caller" objects.
            next_name: 100,
        }
    }
}

impl FakeState {
    fn alloc(&mut self) -> u32 {
        let n = self.next_name;
        self.next_name += 1;
        n
    }

    /// Number of live GL objects of any kind.
    pub fn live_objects(&self) -> usize {
        self.shaders.len()
            + self.programs.len()
            + self.buffers.len()
            + self.textures.len()
            + self.vertex_arrays.len()
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeGl {
    pub state: RefCell<FakeState>,
}

impl FakeGl {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context whose bindings and blend state differ from every value the
    /// renderer sets, with culling and depth testing enabled.
    pub fn with_caller_state() -> Self {
        let gl = Self::new();
        {
            let mut s = gl.state.borrow_mut();
            s.active_texture = glow::TEXTURE3;
            s.program = 7;
            s.texture_units.insert(glow::TEXTURE0, 9);
            s.texture_units.insert(glow::TEXTURE3, 11);
            s.array_buffer = 12;
            s.vertex_array = 13;
            s.viewport = [1, 2, 300, 400];
            s.scissor = [5, 6, 70, 80];
            s.blend_src_rgb = glow::ONE;
            s.blend_dst_rgb = glow::ONE;
            s.blend_src_alpha = glow::ZERO;
            s.blend_dst_alpha = glow::ONE;
            s.blend_equation_rgb = glow::FUNC_SUBTRACT;
            s.blend_equation_alpha = glow::FUNC_REVERSE_SUBTRACT;
            s.caps.insert(glow::CULL_FACE);
            s.caps.insert(glow::DEPTH_TEST);
        }
        gl
    }

    pub fn failing_link(log: &str) -> Self {
        let gl = Self::new();
        gl.state.borrow_mut().fail_link = Some(log.to_string());
        gl
    }

    pub fn failing_compile(kind: u32, log: &str) -> Self {
        let gl = Self::new();
        gl.state.borrow_mut().fail_compile = Some((kind, log.to_string()));
        gl
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn snapshot(&self) -> FakeState {
        self.state.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

fn blend_value(s: &FakeState, pname: u32) -> Option<u32> {
    Some(match pname {
        glow::BLEND_SRC_RGB => s.blend_src_rgb,
        glow::BLEND_DST_RGB => s.blend_dst_rgb,
        glow::BLEND_SRC_ALPHA => s.blend_src_alpha,
        glow::BLEND_DST_ALPHA => s.blend_dst_alpha,
        glow::BLEND_EQUATION_RGB => s.blend_equation_rgb,
        glow::BLEND_EQUATION_ALPHA => s.blend_equation_alpha,
        _ => return None,
    })
}

impl GlApi for FakeGl {
    fn get_integer(&self, pname: u32) -> i32 {
        self.record(Call::Query(pname));
        let s = self.state.borrow();
        let active = s.active_texture;
        if let Some(v) = blend_value(&s, pname) {
            return v as i32;
        }
        match pname {
            glow::MAJOR_VERSION => 3,
            glow::MINOR_VERSION => 0,
            glow::ACTIVE_TEXTURE => active as i32,
            glow::CURRENT_PROGRAM => s.program as i32,
            glow::TEXTURE_BINDING_2D => s.texture_units.get(&active).copied().unwrap_or(0) as i32,
            glow::ARRAY_BUFFER_BINDING => s.array_buffer as i32,
            glow::ELEMENT_ARRAY_BUFFER_BINDING => s.element_buffer as i32,
            glow::VERTEX_ARRAY_BINDING => s.vertex_array as i32,
            glow::UNPACK_ALIGNMENT => s.unpack_alignment,
            other => panic!("FakeGl: unexpected integer query {other:#x}"),
        }
    }

    fn get_integer4(&self, pname: u32) -> [i32; 4] {
        self.record(Call::Query(pname));
        let s = self.state.borrow();
        match pname {
            glow::VIEWPORT => s.viewport,
            glow::SCISSOR_BOX => s.scissor,
            other => panic!("FakeGl: unexpected vector query {other:#x}"),
        }
    }

    fn is_enabled(&self, cap: u32) -> bool {
        self.record(Call::Query(cap));
        self.state.borrow().caps.contains(&cap)
    }

    fn enable(&self, cap: u32) {
        self.record(Call::Enable(cap));
        self.state.borrow_mut().caps.insert(cap);
    }

    fn disable(&self, cap: u32) {
        self.record(Call::Disable(cap));
        self.state.borrow_mut().caps.remove(&cap);
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
        self.state.borrow_mut().active_texture = unit;
    }

    fn blend_equation_separate(&self, mode_rgb: u32, mode_alpha: u32) {
        self.record(Call::BlendEquation(mode_rgb, mode_alpha));
        let mut s = self.state.borrow_mut();
        s.blend_equation_rgb = mode_rgb;
        s.blend_equation_alpha = mode_alpha;
    }

    fn blend_func_separate(&self, src_rgb: u32, dst_rgb: u32, src_alpha: u32, dst_alpha: u32) {
        self.record(Call::BlendFunc(src_rgb, dst_rgb, src_alpha, dst_alpha));
        let mut s = self.state.borrow_mut();
        s.blend_src_rgb = src_rgb;
        s.blend_dst_rgb = dst_rgb;
        s.blend_src_alpha = src_alpha;
        s.blend_dst_alpha = dst_alpha;
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport([x, y, width, height]));
        self.state.borrow_mut().viewport = [x, y, width, height];
    }

    fn scissor(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Scissor([x, y, width, height]));
        self.state.borrow_mut().scissor = [x, y, width, height];
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn pixel_store_i32(&self, pname: u32, value: i32) {
        self.record(Call::PixelStore(pname, value));
        if pname == glow::UNPACK_ALIGNMENT {
            self.state.borrow_mut().unpack_alignment = value;
        }
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
        self.state.borrow_mut().program = program;
    }

    fn bind_texture(&self, target: u32, texture: u32) {
        self.record(Call::BindTexture(target, texture));
        let mut s = self.state.borrow_mut();
        let unit = s.active_texture;
        s.texture_units.insert(unit, texture);
    }

    fn bind_buffer(&self, target: u32, buffer: u32) {
        self.record(Call::BindBuffer(target, buffer));
        let mut s = self.state.borrow_mut();
        match target {
            glow::ARRAY_BUFFER => s.array_buffer = buffer,
            glow::ELEMENT_ARRAY_BUFFER => s.element_buffer = buffer,
            _ => {}
        }
    }

    fn bind_vertex_array(&self, vertex_array: u32) {
        self.record(Call::BindVertexArray(vertex_array));
        self.state.borrow_mut().vertex_array = vertex_array;
    }

    fn create_shader(&self, shader_type: u32) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let name = s.alloc();
        s.shaders.insert(name, FakeShader { kind: shader_type, source: String::new() });
        s.calls.push(Call::CreateShader(name));
        Ok(name)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        self.record(Call::ShaderSource(shader));
        if let Some(sh) = self.state.borrow_mut().shaders.get_mut(&shader) {
            sh.source = source.to_string();
        }
    }

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let s = self.state.borrow();
        let kind = s.shaders.get(&shader).map(|sh| sh.kind);
        !matches!((&s.fail_compile, kind), (Some((k, _)), Some(kind)) if *k == kind)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let s = self.state.borrow();
        match (&s.fail_compile, s.shaders.get(&shader)) {
            (Some((k, log)), Some(sh)) if *k == sh.kind => log.clone(),
            _ => String::new(),
        }
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.state.borrow_mut().shaders.remove(&shader);
    }

    fn create_program(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let name = s.alloc();
        s.programs.insert(name, FakeProgram::default());
        s.calls.push(Call::CreateProgram(name));
        Ok(name)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.push(shader);
        }
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
        if let Some(p) = self.state.borrow_mut().programs.get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
        let mut s = self.state.borrow_mut();
        let ok = s.fail_link.is_none();
        if let Some(p) = s.programs.get_mut(&program) {
            p.linked = ok;
        }
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state.borrow().programs.get(&program).is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, _program: u32) -> String {
        self.state.borrow().fail_link.clone().unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.state.borrow_mut().programs.remove(&program);
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<u32> {
        match name {
            "Texture" => Some(LOC_TEXTURE),
            "ProjMtx" => Some(LOC_PROJ_MTX),
            _ => None,
        }
    }

    fn attrib_location(&self, _program: u32, name: &str) -> Option<u32> {
        match name {
            "Position" => Some(0),
            "UV" => Some(1),
            "Color" => Some(2),
            _ => None,
        }
    }

    fn uniform_1_i32(&self, location: Option<u32>, value: i32) {
        self.record(Call::Uniform1i(location, value));
    }

    fn uniform_matrix_4_f32(&self, location: Option<u32>, value: &[f32; 16]) {
        self.record(Call::UniformMatrix4(location, *value));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        let name = s.alloc();
        s.buffers.insert(name);
        s.calls.push(Call::CreateBuffer(name));
        Ok(name)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.state.borrow_mut().buffers.remove(&buffer);
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData { target, len: data.len(), usage });
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        if s.fail_vertex_array {
            return Err("out of memory".to_string());
        }
        let name = s.alloc();
        s.vertex_arrays.insert(name);
        s.calls.push(Call::CreateVertexArray(name));
        Ok(name)
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
        self.state.borrow_mut().vertex_arrays.remove(&vertex_array);
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableAttrib(index));
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
        self.record(Call::AttribPointer { index, size, data_type, normalized, stride, offset });
    }

    fn create_texture(&self) -> Result<u32, String> {
        let mut s = self.state.borrow_mut();
        if s.fail_texture {
            return Err("texture limit reached".to_string());
        }
        let name = s.alloc();
        s.textures.insert(name);
        s.calls.push(Call::CreateTexture(name));
        Ok(name)
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
        self.state.borrow_mut().textures.remove(&texture);
    }

    fn tex_parameter_i32(&self, target: u32, pname: u32, value: i32) {
        self.record(Call::TexParameter(target, pname, value));
    }

    fn tex_image_2d_rgba8(&self, width: i32, height: i32, pixels: &[u8]) {
        self.record(Call::TexImage { width, height, len: pixels.len() });
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(Call::DrawElements { mode, count, element_type, offset });
    }
}
